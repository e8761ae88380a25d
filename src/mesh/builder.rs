//! Building the editable mesh from persistent arrays, and writing it back.
//!
//! [`EditMesh::from_data`] is the only way to obtain an [`EditMesh`]: it
//! validates the persistent arrays and constructs the full adjacency tables
//! in one pass, so a mesh with stale or missing lookup state cannot exist.
//! [`EditMesh::to_data`] compacts the session's tombstoned elements away and
//! emits fresh arrays with densely renumbered indices.

use std::collections::{HashMap, HashSet};

use crate::error::{MeshError, Result};
use crate::store::MeshData;

use super::editmesh::EditMesh;
use super::index::{EdgeId, MeshIndex, VertexId};

impl<I: MeshIndex> EditMesh<I> {
    /// Build an editable mesh from persistent arrays.
    ///
    /// Validates the input and constructs all adjacency tables. Wire edges
    /// (entries in the edge table that no face uses) are legal; faces whose
    /// boundary segments are missing from the edge table, degenerate or
    /// duplicate elements, edges with more than two faces, and inconsistent
    /// winding are rejected.
    pub fn from_data(data: &MeshData) -> Result<Self> {
        let nv = data.positions.len();
        let ne = data.edges.len();
        let nf = data.faces.len();

        check_layer("materials", nf, data.materials.len())?;
        check_layer("edge_attribs", ne, data.edge_attribs.len())?;
        check_layer("selected_verts", nv, data.selected_verts.len())?;
        check_layer("selected_edges", ne, data.selected_edges.len())?;
        check_layer("selected_faces", nf, data.selected_faces.len())?;

        let mut mesh = EditMesh::new();

        for (i, &position) in data.positions.iter().enumerate() {
            let v = mesh.add_vertex(position);
            mesh.vertex_mut(v).selected = data.selected_verts[i];
        }

        // Edge table: validated, then indexed by unordered vertex pair for
        // the face pass below.
        let mut pair_to_edge: HashMap<(usize, usize), EdgeId<I>> = HashMap::with_capacity(ne);
        for (i, &[a, b]) in data.edges.iter().enumerate() {
            for v in [a, b] {
                if v >= nv {
                    return Err(MeshError::InvalidEdgeVertex { edge: i, vertex: v });
                }
            }
            if a == b {
                return Err(MeshError::DegenerateEdge { edge: i });
            }
            let key = canonical_pair(a, b);
            if pair_to_edge.contains_key(&key) {
                return Err(MeshError::DuplicateEdge { v0: key.0, v1: key.1 });
            }
            let e = mesh.add_edge(VertexId::new(a), VertexId::new(b), data.edge_attribs[i]);
            mesh.edge_mut(e).selected = data.selected_edges[i];
            pair_to_edge.insert(key, e);
        }

        // Faces: every boundary segment must be in the edge table, used by at
        // most two faces, and traversed once per direction.
        let mut edge_uses: HashMap<(usize, usize), usize> = HashMap::new();
        let mut directed_uses: HashSet<(usize, usize)> = HashSet::new();
        for (fi, corners) in data.faces.iter().enumerate() {
            let n = corners.len();
            if n < 3 {
                return Err(MeshError::DegenerateFace { face: fi });
            }
            for &v in corners {
                if v >= nv {
                    return Err(MeshError::InvalidVertexIndex { face: fi, vertex: v });
                }
            }
            {
                let mut distinct = corners.clone();
                distinct.sort_unstable();
                distinct.dedup();
                if distinct.len() != n {
                    return Err(MeshError::DegenerateFace { face: fi });
                }
            }

            let mut verts: Vec<VertexId<I>> = Vec::with_capacity(n);
            let mut edges: Vec<EdgeId<I>> = Vec::with_capacity(n);
            for i in 0..n {
                let a = corners[i];
                let b = corners[(i + 1) % n];
                let key = canonical_pair(a, b);
                let &e = pair_to_edge
                    .get(&key)
                    .ok_or(MeshError::MissingEdge { v0: key.0, v1: key.1 })?;

                let uses = edge_uses.entry(key).or_insert(0);
                if *uses == 2 {
                    return Err(MeshError::NonManifoldEdge { v0: key.0, v1: key.1 });
                }
                if !directed_uses.insert((a, b)) {
                    return Err(MeshError::InconsistentWinding { v0: a, v1: b });
                }
                *uses += 1;

                verts.push(VertexId::new(a));
                edges.push(e);
            }

            let f = mesh.add_face(verts, edges, data.materials[fi]);
            mesh.face_mut(f).selected = data.selected_faces[fi];
        }

        debug_assert!(mesh.is_valid());
        Ok(mesh)
    }

    /// Compact the mesh and emit fresh persistent arrays.
    ///
    /// Dead elements are dropped and the survivors renumbered densely in id
    /// order; selection flags and attribute layers ride along.
    pub fn to_data(&self) -> MeshData {
        let mut vertex_map: Vec<usize> = vec![usize::MAX; self.vertices.len()];
        let mut data = MeshData::default();

        for (i, v) in self.vertices.iter().enumerate() {
            if !v.alive {
                continue;
            }
            vertex_map[i] = data.positions.len();
            data.positions.push(v.position);
            data.selected_verts.push(v.selected);
        }

        for e in &self.edges {
            if !e.alive {
                continue;
            }
            let [a, b] = e.verts;
            data.edges.push([vertex_map[a.index()], vertex_map[b.index()]]);
            data.edge_attribs.push(e.attrib);
            data.selected_edges.push(e.selected);
        }

        for f in &self.faces {
            if !f.alive {
                continue;
            }
            data.faces
                .push(f.verts.iter().map(|v| vertex_map[v.index()]).collect());
            data.materials.push(f.material);
            data.selected_faces.push(f.selected);
        }

        data
    }
}

fn check_layer(layer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(MeshError::LayerMismatch {
            layer,
            expected,
            actual,
        })
    }
}

#[inline]
fn canonical_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
