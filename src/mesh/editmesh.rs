//! The editable mesh and its structural operations.
//!
//! [`EditMesh`] is the in-memory working form of a polygon mesh: vertices,
//! edges, and faces with full adjacency (link) tables, selection flags, a
//! per-face material index, and per-edge attributes. It is built from the
//! persistent arrays by [`EditMesh::from_data`] and written back with
//! [`EditMesh::to_data`]; between the two, the four editing operations in
//! [`crate::algo`] query and mutate it.
//!
//! # Structure
//!
//! - Each vertex stores its unordered incident-edge list
//! - Each edge stores its two endpoint vertices and its 0–2 link faces
//!   (1 on a boundary, 2 interior, 0 for a wire edge)
//! - Each face stores its boundary as matching vertex and edge cycles:
//!   corner `i` runs from `verts[i]` to `verts[(i + 1) % n]` along `edges[i]`
//!
//! These link tables are the adjacency invariant: every edge's face list is
//! exactly the faces whose boundary contains it, and every vertex's edge list
//! is exactly the edges having it as an endpoint. Structural edits
//! ([`EditMesh::dissolve_edge`], [`EditMesh::dissolve_vertex`]) restore both
//! directions before returning; [`EditMesh::is_valid`] checks them.
//!
//! # Element removal
//!
//! Removed elements are tombstoned (`alive = false`) rather than compacted,
//! so element ids stay stable for the whole edit session. Compaction happens
//! once, in [`EditMesh::to_data`].

use std::collections::{BTreeSet, HashSet};

use nalgebra::Point3;

use crate::error::{MeshError, Result};

use super::attrib::{EdgeAttributes, MaterialSignature};
use super::index::{EdgeId, FaceId, MeshIndex, VertexId};

/// A vertex in the editable mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Selection flag.
    pub selected: bool,

    /// Unordered incident-edge list.
    pub(crate) edges: Vec<EdgeId<I>>,

    /// Tombstone flag; dead vertices are skipped by iteration and compaction.
    pub(crate) alive: bool,
}

/// An edge in the editable mesh.
#[derive(Debug, Clone)]
pub struct Edge<I: MeshIndex = u32> {
    /// Per-edge attribute bundle.
    pub attrib: EdgeAttributes,

    /// Selection flag.
    pub selected: bool,

    /// The two endpoint vertices.
    pub(crate) verts: [VertexId<I>; 2],

    /// Link faces: the faces whose boundary contains this edge.
    pub(crate) faces: Vec<FaceId<I>>,

    pub(crate) alive: bool,
}

/// A face in the editable mesh.
#[derive(Debug, Clone)]
pub struct Face<I: MeshIndex = u32> {
    /// Material slot index.
    pub material: u32,

    /// Selection flag.
    pub selected: bool,

    /// Boundary vertex cycle.
    pub(crate) verts: Vec<VertexId<I>>,

    /// Boundary edge cycle; `edges[i]` spans `verts[i]` to `verts[(i+1)%n]`.
    pub(crate) edges: Vec<EdgeId<I>>,

    pub(crate) alive: bool,
}

/// An editable polygon mesh with adjacency tables, selection state, and
/// material/attribute layers.
#[derive(Debug, Clone)]
pub struct EditMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for EditMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> EditMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.iter().filter(|v| v.alive).count()
    }

    /// Get the number of live edges.
    pub fn num_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.alive).count()
    }

    /// Get the number of live faces.
    pub fn num_faces(&self) -> usize {
        self.faces.iter().filter(|f| f.alive).count()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a mutable edge by ID.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId<I>) -> &mut Edge<I> {
        &mut self.edges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Check whether a vertex is live.
    #[inline]
    pub fn is_vertex_alive(&self, id: VertexId<I>) -> bool {
        id.index() < self.vertices.len() && self.vertices[id.index()].alive
    }

    /// Check whether an edge is live.
    #[inline]
    pub fn is_edge_alive(&self, id: EdgeId<I>) -> bool {
        id.index() < self.edges.len() && self.edges[id.index()].alive
    }

    /// Check whether a face is live.
    #[inline]
    pub fn is_face_alive(&self, id: FaceId<I>) -> bool {
        id.index() < self.faces.len() && self.faces[id.index()].alive
    }

    // ==================== Iteration ====================

    /// Iterate over all live vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.alive)
            .map(|(i, _)| VertexId::new(i))
    }

    /// Iterate over all live edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| EdgeId::new(i))
    }

    /// Iterate over all live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive)
            .map(|(i, _)| FaceId::new(i))
    }

    // ==================== Topology Queries ====================

    /// The edges incident to a vertex (unordered).
    #[inline]
    pub fn link_edges(&self, v: VertexId<I>) -> &[EdgeId<I>] {
        &self.vertex(v).edges
    }

    /// The faces whose boundary contains an edge.
    #[inline]
    pub fn link_faces(&self, e: EdgeId<I>) -> &[FaceId<I>] {
        &self.edge(e).faces
    }

    /// The two endpoint vertices of an edge.
    #[inline]
    pub fn edge_verts(&self, e: EdgeId<I>) -> [VertexId<I>; 2] {
        self.edge(e).verts
    }

    /// The boundary vertex cycle of a face.
    #[inline]
    pub fn face_verts(&self, f: FaceId<I>) -> &[VertexId<I>] {
        &self.face(f).verts
    }

    /// The boundary edge cycle of a face.
    #[inline]
    pub fn face_edges(&self, f: FaceId<I>) -> &[EdgeId<I>] {
        &self.face(f).edges
    }

    /// The endpoint of `e` that is not `v`.
    #[inline]
    pub fn other_vertex(&self, e: EdgeId<I>, v: VertexId<I>) -> VertexId<I> {
        let [a, b] = self.edge(e).verts;
        debug_assert!(a == v || b == v, "{:?} is not an endpoint of {:?}", v, e);
        if a == v {
            b
        } else {
            a
        }
    }

    /// The number of edges incident to a vertex.
    #[inline]
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex(v).edges.len()
    }

    /// Find the live edge connecting two vertices, if any.
    pub fn edge_between(&self, v0: VertexId<I>, v1: VertexId<I>) -> Option<EdgeId<I>> {
        self.vertex(v0)
            .edges
            .iter()
            .copied()
            .find(|&e| self.is_edge_alive(e) && self.other_vertex(e, v0) == v1)
    }

    /// The faces touching any edge incident to a vertex, in ascending id
    /// order without duplicates. Empty for wire and isolated vertices.
    pub fn vertex_link_faces(&self, v: VertexId<I>) -> Vec<FaceId<I>> {
        let set: BTreeSet<FaceId<I>> = self
            .vertex(v)
            .edges
            .iter()
            .flat_map(|&e| self.edge(e).faces.iter().copied())
            .collect();
        set.into_iter().collect()
    }

    // ==================== Material Signatures ====================

    /// The set of distinct materials among an edge's link faces.
    pub fn edge_signature(&self, e: EdgeId<I>) -> MaterialSignature {
        self.edge(e)
            .faces
            .iter()
            .map(|&f| self.face(f).material)
            .collect()
    }

    /// The set of distinct materials among the faces touching a vertex.
    pub fn vertex_signature(&self, v: VertexId<I>) -> MaterialSignature {
        self.vertex_link_faces(v)
            .iter()
            .map(|&f| self.face(f).material)
            .collect()
    }

    // ==================== Selection ====================

    /// Snapshot the live selected vertex ids into an owned list.
    ///
    /// Operations take this snapshot before mutating any selection flag so
    /// they never iterate a view of state they are changing.
    pub fn selected_vertex_ids(&self) -> Vec<VertexId<I>> {
        self.vertex_ids().filter(|&v| self.vertex(v).selected).collect()
    }

    /// Snapshot the live selected edge ids into an owned list.
    pub fn selected_edge_ids(&self) -> Vec<EdgeId<I>> {
        self.edge_ids().filter(|&e| self.edge(e).selected).collect()
    }

    /// Clear the selection flag on every vertex, edge, and face.
    pub fn deselect_all(&mut self) {
        for v in &mut self.vertices {
            v.selected = false;
        }
        for e in &mut self.edges {
            e.selected = false;
        }
        for f in &mut self.faces {
            f.selected = false;
        }
    }

    // ==================== Construction ====================

    pub(crate) fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex {
            position,
            selected: false,
            edges: Vec::new(),
            alive: true,
        });
        id
    }

    pub(crate) fn add_edge(
        &mut self,
        v0: VertexId<I>,
        v1: VertexId<I>,
        attrib: EdgeAttributes,
    ) -> EdgeId<I> {
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge {
            attrib,
            selected: false,
            verts: [v0, v1],
            faces: Vec::new(),
            alive: true,
        });
        self.vertex_mut(v0).edges.push(id);
        self.vertex_mut(v1).edges.push(id);
        id
    }

    pub(crate) fn add_face(
        &mut self,
        verts: Vec<VertexId<I>>,
        edges: Vec<EdgeId<I>>,
        material: u32,
    ) -> FaceId<I> {
        debug_assert_eq!(verts.len(), edges.len());
        let id = FaceId::new(self.faces.len());
        for &e in &edges {
            self.edge_mut(e).faces.push(id);
        }
        self.faces.push(Face {
            material,
            selected: false,
            verts,
            edges,
            alive: true,
        });
        id
    }

    // ==================== Structural Edits ====================

    /// Check whether an edge can be dissolved without producing degenerate
    /// or duplicate geometry.
    ///
    /// Requires two distinct live faces that share exactly this edge and no
    /// vertices beyond its endpoints. Boundary edges (one face), wire edges
    /// (no faces), doubled shared edges, and bowtie configurations all fail.
    pub fn can_dissolve_edge(&self, e: EdgeId<I>) -> bool {
        if !self.is_edge_alive(e) {
            return false;
        }
        let edge = self.edge(e);
        if edge.faces.len() != 2 {
            return false;
        }
        let (fa, fb) = (edge.faces[0], edge.faces[1]);
        if fa == fb || !self.is_face_alive(fa) || !self.is_face_alive(fb) {
            return false;
        }

        let fb_edges: HashSet<EdgeId<I>> = self.face(fb).edges.iter().copied().collect();
        let shared_edges = self
            .face(fa)
            .edges
            .iter()
            .filter(|id| fb_edges.contains(id))
            .count();
        if shared_edges != 1 {
            return false;
        }

        let fb_verts: HashSet<VertexId<I>> = self.face(fb).verts.iter().copied().collect();
        let shared_verts = self
            .face(fa)
            .verts
            .iter()
            .filter(|v| fb_verts.contains(v))
            .count();
        shared_verts == 2
    }

    /// Dissolve an edge: merge its two link faces into one and remove it.
    ///
    /// The first link face survives and absorbs the boundary of the second;
    /// the surviving face keeps its own material and id. Returns the merged
    /// face. Fails with [`MeshError::InvalidState`] when
    /// [`EditMesh::can_dissolve_edge`] does not hold.
    pub fn dissolve_edge(&mut self, e: EdgeId<I>) -> Result<FaceId<I>> {
        if !self.can_dissolve_edge(e) {
            return Err(MeshError::InvalidState(format!(
                "edge {:?} is not dissolvable",
                e
            )));
        }

        let [v0, v1] = self.edge(e).verts;
        let fa = self.edge(e).faces[0];
        let fb = self.edge(e).faces[1];

        let ia = self
            .face(fa)
            .edges
            .iter()
            .position(|&x| x == e)
            .ok_or_else(|| {
                MeshError::InvalidState(format!("edge {:?} missing from face {:?}", e, fa))
            })?;
        let ib = self
            .face(fb)
            .edges
            .iter()
            .position(|&x| x == e)
            .ok_or_else(|| {
                MeshError::InvalidState(format!("edge {:?} missing from face {:?}", e, fb))
            })?;

        let la = self.face(fa).verts.len();
        let lb = self.face(fb).verts.len();

        // Walk fa from the corner after e around to the corner before it,
        // then continue around fb the same way. Consistent winding makes the
        // two arcs meet at e's endpoints, yielding one closed cycle.
        let mut verts: Vec<VertexId<I>> = Vec::with_capacity(la + lb - 2);
        let mut edges: Vec<EdgeId<I>> = Vec::with_capacity(la + lb - 2);
        {
            let f = self.face(fa);
            for k in 1..la {
                let idx = (ia + k) % la;
                verts.push(f.verts[idx]);
                edges.push(f.edges[idx]);
            }
        }
        let mut fb_edges: Vec<EdgeId<I>> = Vec::with_capacity(lb - 1);
        {
            let f = self.face(fb);
            for k in 1..lb {
                let idx = (ib + k) % lb;
                verts.push(f.verts[idx]);
                edges.push(f.edges[idx]);
                fb_edges.push(f.edges[idx]);
            }
        }
        debug_assert_eq!(verts.len(), la + lb - 2);

        // Absorbed boundary edges now link to the surviving face.
        for be in fb_edges {
            for slot in self.edge_mut(be).faces.iter_mut() {
                if *slot == fb {
                    *slot = fa;
                }
            }
        }

        let fb_selected = self.face(fb).selected;
        {
            let f = self.face_mut(fa);
            f.verts = verts;
            f.edges = edges;
            f.selected |= fb_selected;
        }

        self.vertex_mut(v0).edges.retain(|&x| x != e);
        self.vertex_mut(v1).edges.retain(|&x| x != e);

        {
            let f = self.face_mut(fb);
            f.alive = false;
            f.verts.clear();
            f.edges.clear();
        }
        {
            let edge = self.edge_mut(e);
            edge.alive = false;
            edge.faces.clear();
        }

        Ok(fa)
    }

    /// Check whether a vertex can be join-dissolved.
    ///
    /// Requires exactly two distinct live incident edges leading to distinct
    /// far endpoints that are not already connected by an edge, with both
    /// incident edges bordering the same face set. Anything else (higher
    /// valence, would-be self-loops, would-be duplicate edges, triangles
    /// that would collapse to 2-gons) fails.
    pub fn can_dissolve_vertex(&self, v: VertexId<I>) -> bool {
        if !self.is_vertex_alive(v) {
            return false;
        }
        let vert = self.vertex(v);
        if vert.edges.len() != 2 {
            return false;
        }
        let (e1, e2) = (vert.edges[0], vert.edges[1]);
        if e1 == e2 || !self.is_edge_alive(e1) || !self.is_edge_alive(e2) {
            return false;
        }

        let x = self.other_vertex(e1, v);
        let y = self.other_vertex(e2, v);
        if x == y || self.edge_between(x, y).is_some() {
            return false;
        }

        let f1: BTreeSet<FaceId<I>> = self.edge(e1).faces.iter().copied().collect();
        let f2: BTreeSet<FaceId<I>> = self.edge(e2).faces.iter().copied().collect();
        f1 == f2
    }

    /// Join-dissolve a valence-2 vertex: merge its two incident edges into a
    /// single straight-through edge and remove the vertex.
    ///
    /// The first incident edge survives, retargeted to span the two far
    /// endpoints; attributes of the merged pair combine per
    /// [`EdgeAttributes::merged_with`] and the selection flag is kept if
    /// either edge carried it. Returns the surviving edge. Fails with
    /// [`MeshError::InvalidState`] when [`EditMesh::can_dissolve_vertex`]
    /// does not hold.
    pub fn dissolve_vertex(&mut self, v: VertexId<I>) -> Result<EdgeId<I>> {
        if !self.can_dissolve_vertex(v) {
            return Err(MeshError::InvalidState(format!(
                "vertex {:?} is not dissolvable",
                v
            )));
        }

        let e_keep = self.vertex(v).edges[0];
        let e_gone = self.vertex(v).edges[1];
        let x = self.other_vertex(e_keep, v);
        let y = self.other_vertex(e_gone, v);

        // Splice v out of every face that touches it. Both incident edges
        // border the same faces, so the kept edge's list covers them all.
        let faces: Vec<FaceId<I>> = self.edge(e_keep).faces.clone();
        for f in faces {
            let iv = self
                .face(f)
                .verts
                .iter()
                .position(|&w| w == v)
                .ok_or_else(|| {
                    MeshError::InvalidState(format!("vertex {:?} missing from face {:?}", v, f))
                })?;
            let n = self.face(f).verts.len();
            if n < 4 {
                return Err(MeshError::InvalidState(format!(
                    "dissolving {:?} would degenerate face {:?}",
                    v, f
                )));
            }
            let prev = (iv + n - 1) % n;
            let face = self.face_mut(f);
            face.edges[prev] = e_keep;
            face.verts.remove(iv);
            face.edges.remove(iv);
        }

        let merged = self
            .edge(e_keep)
            .attrib
            .merged_with(&self.edge(e_gone).attrib);
        let gone_selected = self.edge(e_gone).selected;
        {
            let edge = self.edge_mut(e_keep);
            edge.verts = [x, y];
            edge.attrib = merged;
            edge.selected |= gone_selected;
        }

        for slot in self.vertex_mut(y).edges.iter_mut() {
            if *slot == e_gone {
                *slot = e_keep;
            }
        }

        {
            let edge = self.edge_mut(e_gone);
            edge.alive = false;
            edge.faces.clear();
        }
        {
            let vert = self.vertex_mut(v);
            vert.alive = false;
            vert.edges.clear();
        }

        Ok(e_keep)
    }

    // ==================== Validation ====================

    /// Check that all adjacency tables are mutually consistent.
    pub fn is_valid(&self) -> bool {
        for (vi, v) in self.vertices.iter().enumerate() {
            if !v.alive {
                continue;
            }
            let vid = VertexId::new(vi);
            let mut seen = HashSet::new();
            for &e in &v.edges {
                if !self.is_edge_alive(e) || !seen.insert(e) {
                    return false;
                }
                if !self.edge(e).verts.contains(&vid) {
                    return false;
                }
            }
        }

        for (ei, edge) in self.edges.iter().enumerate() {
            if !edge.alive {
                continue;
            }
            let eid = EdgeId::new(ei);
            let [a, b] = edge.verts;
            if a == b || !self.is_vertex_alive(a) || !self.is_vertex_alive(b) {
                return false;
            }
            if !self.vertex(a).edges.contains(&eid) || !self.vertex(b).edges.contains(&eid) {
                return false;
            }
            if edge.faces.len() > 2 {
                return false;
            }
            let mut seen = HashSet::new();
            for &f in &edge.faces {
                if !self.is_face_alive(f) || !seen.insert(f) {
                    return false;
                }
                if !self.face(f).edges.contains(&eid) {
                    return false;
                }
            }
        }

        for (fi, face) in self.faces.iter().enumerate() {
            if !face.alive {
                continue;
            }
            let fid = FaceId::new(fi);
            let n = face.verts.len();
            if n < 3 || face.edges.len() != n {
                return false;
            }
            let distinct: HashSet<VertexId<I>> = face.verts.iter().copied().collect();
            if distinct.len() != n {
                return false;
            }
            for i in 0..n {
                let a = face.verts[i];
                let b = face.verts[(i + 1) % n];
                let e = face.edges[i];
                if !self.is_vertex_alive(a) || !self.is_edge_alive(e) {
                    return false;
                }
                let ev = self.edge(e).verts;
                if !(ev == [a, b] || ev == [b, a]) {
                    return false;
                }
                if !self.edge(e).faces.contains(&fid) {
                    return false;
                }
            }
        }

        true
    }
}
