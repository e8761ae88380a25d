//! Two-phase dissolution of selected vertex loops.
//!
//! The selection describes one or more paths: interior path vertices are
//! selected and the edges along each path carry the edge selection flag. The
//! operation shortens each path by removing the "free" topology around it:
//! first the non-selected spoke edges that stick out of interior vertices
//! into a single-material region, then the interior vertices themselves once
//! they sit on a straight run inside one material.
//!
//! The two-phase order matters: dissolving spokes first drops interior
//! vertices to valence 2, which is what makes the subsequent straight-through
//! vertex join well defined. Nothing bordering two materials is ever
//! removed, and path endpoints (at most one selected incident edge) never
//! qualify as interior, so the ends of every loop survive.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::mesh::{EdgeId, EditMesh, MeshIndex, VertexId};

/// Counts of elements removed by [`dissolve_selected_loops`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DissolveReport {
    /// Spoke edges dissolved in phase 1.
    pub edges_dissolved: usize,

    /// Vertices dissolved across phase-1 cleanup and phase 2.
    pub verts_dissolved: usize,
}

impl DissolveReport {
    /// Whether the operation removed anything at all.
    pub fn is_noop(&self) -> bool {
        self.edges_dissolved == 0 && self.verts_dissolved == 0
    }
}

/// Dissolve the interior of the selected vertex loops.
///
/// Phase 1 removes, for every interior vertex (selected, more than one
/// selected incident edge), its non-selected incident edges whose material
/// signature has size exactly 1, then join-dissolves the non-selected
/// endpoints those removals left at valence 2 inside a single material.
/// Phase 2 recomputes the interior vertices against the changed topology
/// and join-dissolves the ones now at valence 2 inside a single material.
///
/// An empty or ineligible selection is a no-op, not an error. Candidate
/// sets are fully computed before any removal; every element is re-checked
/// against the live topology just before its own dissolve.
pub fn dissolve_selected_loops<I: MeshIndex>(mesh: &mut EditMesh<I>) -> Result<DissolveReport> {
    let mut report = DissolveReport::default();

    // ---- Phase 1: spoke edges ----
    let candidates = interior_candidates(mesh);

    let mut spokes: BTreeSet<EdgeId<I>> = BTreeSet::new();
    for &v in &candidates {
        for &e in mesh.link_edges(v) {
            if !mesh.edge(e).selected && mesh.edge_signature(e).len() == 1 {
                spokes.insert(e);
            }
        }
    }

    let mut touched: BTreeSet<VertexId<I>> = BTreeSet::new();
    for &e in &spokes {
        // Earlier merges may have changed this spoke's surroundings.
        if !mesh.is_edge_alive(e) || mesh.edge_signature(e).len() != 1 {
            continue;
        }
        if !mesh.can_dissolve_edge(e) {
            continue;
        }
        let [v0, v1] = mesh.edge_verts(e);
        mesh.dissolve_edge(e)?;
        report.edges_dissolved += 1;
        touched.insert(v0);
        touched.insert(v1);
    }

    // Spoke remnants: far endpoints left dangling at valence 2. Selected
    // (path) vertices are phase 2's business and are skipped here.
    for &v in &touched {
        if !mesh.is_vertex_alive(v) || mesh.vertex(v).selected {
            continue;
        }
        if mesh.valence(v) != 2 || mesh.vertex_signature(v).len() > 1 {
            continue;
        }
        if !mesh.can_dissolve_vertex(v) {
            continue;
        }
        mesh.dissolve_vertex(v)?;
        report.verts_dissolved += 1;
    }

    // ---- Phase 2: interior vertices ----
    let candidates = interior_candidates(mesh);
    for v in candidates {
        if !mesh.is_vertex_alive(v) || mesh.valence(v) != 2 {
            continue;
        }
        if mesh.vertex_signature(v).len() != 1 {
            continue;
        }
        if !mesh.can_dissolve_vertex(v) {
            continue;
        }
        mesh.dissolve_vertex(v)?;
        report.verts_dissolved += 1;
    }

    Ok(report)
}

/// Selected vertices with more than one selected incident edge.
///
/// Path endpoints have exactly one selected incident edge and isolated
/// selected vertices have none; both are excluded by construction.
fn interior_candidates<I: MeshIndex>(mesh: &EditMesh<I>) -> Vec<VertexId<I>> {
    mesh.selected_vertex_ids()
        .into_iter()
        .filter(|&v| {
            mesh.link_edges(v)
                .iter()
                .filter(|&&e| mesh.edge(e).selected)
                .count()
                > 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MeshData;
    use nalgebra::Point3;

    /// A strip of `n` unit quads, bottom vertices `0..=n`, top vertices
    /// `n+1..=2n+1`. Rung `i` joins bottom vertex `i` to top vertex
    /// `n+1+i`; the selected path runs along the bottom row.
    fn quad_strip(n: usize, materials: &[u32]) -> MeshData {
        let mut positions = Vec::with_capacity(2 * (n + 1));
        for i in 0..=n {
            positions.push(Point3::new(i as f64, 0.0, 0.0));
        }
        for i in 0..=n {
            positions.push(Point3::new(i as f64, 1.0, 0.0));
        }
        let top = n + 1;
        let faces: Vec<Vec<usize>> = (0..n)
            .map(|i| vec![i, i + 1, top + i + 1, top + i])
            .collect();
        MeshData::from_polygons(positions, faces, materials.to_vec())
    }

    /// Select the bottom-row path: all bottom edges, plus the interior
    /// bottom vertices (endpoints 0 and n stay unselected).
    fn select_bottom_path(data: &mut MeshData, n: usize) {
        for i in 1..n {
            data.selected_verts[i] = true;
        }
        for (ei, e) in data.edges.iter().enumerate() {
            let [a, b] = *e;
            if a <= n && b <= n {
                data.selected_edges[ei] = true;
            }
        }
    }

    fn strip_with_path(n: usize, materials: &[u32]) -> EditMesh {
        let mut data = quad_strip(n, materials);
        select_bottom_path(&mut data, n);
        EditMesh::from_data(&data).unwrap()
    }

    #[test]
    fn test_uniform_strip_collapses_to_one_face() {
        let mut mesh = strip_with_path(5, &[7; 5]);
        let report = dissolve_selected_loops(&mut mesh).unwrap();

        assert!(mesh.is_valid());
        assert_eq!(report.edges_dissolved, 4); // rungs 1..=4
        assert_eq!(report.verts_dissolved, 8); // bottom 1..=4 and top mirrors
        assert_eq!(mesh.num_faces(), 1);

        // The endpoints of the path survive.
        assert!(mesh.is_vertex_alive(VertexId::new(0)));
        assert!(mesh.is_vertex_alive(VertexId::new(5)));
        // The interior path vertices are gone.
        for i in 1..5 {
            assert!(!mesh.is_vertex_alive(VertexId::new(i)));
        }

        // One face spanning the strip: its corners are the four outer
        // corners of the original rectangle.
        let f = mesh.face_ids().next().unwrap();
        let mut corners: Vec<usize> = mesh.face_verts(f).iter().map(|v| v.index()).collect();
        corners.sort_unstable();
        assert_eq!(corners, vec![0, 5, 6, 11]);
        assert_eq!(mesh.num_edges(), 4);
    }

    #[test]
    fn test_material_break_limits_collapse() {
        // Face 3 (index 2) differs: the rungs on either side of it border
        // two materials and must survive, as must the vertices they pin.
        let mut mesh = strip_with_path(5, &[4, 4, 9, 4, 4]);
        let report = dissolve_selected_loops(&mut mesh).unwrap();

        assert!(mesh.is_valid());
        // Only the rungs interior to the homogeneous runs dissolve.
        assert_eq!(report.edges_dissolved, 2); // rungs 1 and 4

        // Rungs 2 and 3 still exist, pinning bottom vertices 2 and 3.
        assert!(mesh
            .edge_between(VertexId::new(2), VertexId::new(8))
            .is_some());
        assert!(mesh
            .edge_between(VertexId::new(3), VertexId::new(9))
            .is_some());
        assert!(mesh.is_vertex_alive(VertexId::new(2)));
        assert!(mesh.is_vertex_alive(VertexId::new(3)));

        // The vertices strictly inside the homogeneous runs are gone.
        assert!(!mesh.is_vertex_alive(VertexId::new(1)));
        assert!(!mesh.is_vertex_alive(VertexId::new(4)));

        // Three faces remain: the merged 0-1 run, face 2, the merged 3-4 run.
        assert_eq!(mesh.num_faces(), 3);
    }

    #[test]
    fn test_no_edge_crossing_materials_is_removed() {
        let data = {
            let mut d = quad_strip(6, &[1, 1, 2, 2, 3, 1]);
            select_bottom_path(&mut d, 6);
            d
        };
        let mesh_before: EditMesh = EditMesh::from_data(&data).unwrap();
        let border_pairs: Vec<[usize; 2]> = mesh_before
            .edge_ids()
            .filter(|&e| mesh_before.edge_signature(e).len() >= 2)
            .map(|e| {
                let [a, b] = mesh_before.edge_verts(e);
                [a.index(), b.index()]
            })
            .collect();
        assert!(!border_pairs.is_empty());

        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
        dissolve_selected_loops(&mut mesh).unwrap();
        assert!(mesh.is_valid());

        // Every border edge is still present with both endpoints alive.
        for [a, b] in border_pairs {
            assert!(mesh
                .edge_between(VertexId::new(a), VertexId::new(b))
                .is_some());
        }
    }

    #[test]
    fn test_endpoints_survive_any_path() {
        for n in 3..=7 {
            let mut mesh = strip_with_path(n, &vec![0; n]);
            dissolve_selected_loops(&mut mesh).unwrap();
            assert!(mesh.is_vertex_alive(VertexId::new(0)));
            assert!(mesh.is_vertex_alive(VertexId::new(n)));
            assert!(mesh.is_valid());
        }
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut mesh: EditMesh = EditMesh::from_data(&quad_strip(3, &[0; 3])).unwrap();
        let (nv, ne, nf) = (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces());
        let report = dissolve_selected_loops(&mut mesh).unwrap();
        assert!(report.is_noop());
        assert_eq!(
            (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces()),
            (nv, ne, nf)
        );
    }

    #[test]
    fn test_isolated_selected_vertex_is_ignored() {
        let mut data = quad_strip(3, &[0; 3]);
        // A selected vertex with no selected edges is not interior to any
        // path.
        data.selected_verts[1] = true;
        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
        let report = dissolve_selected_loops(&mut mesh).unwrap();
        assert!(report.is_noop());
        assert!(mesh.is_vertex_alive(VertexId::new(1)));
    }

    #[test]
    fn test_selected_endpoints_are_not_interior() {
        // Blender-style selections flag the endpoints too; with exactly one
        // selected incident edge they still never qualify as interior.
        let mut data = quad_strip(4, &[0; 4]);
        select_bottom_path(&mut data, 4);
        data.selected_verts[0] = true;
        data.selected_verts[4] = true;
        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();

        dissolve_selected_loops(&mut mesh).unwrap();
        assert!(mesh.is_vertex_alive(VertexId::new(0)));
        assert!(mesh.is_vertex_alive(VertexId::new(4)));
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn test_spokes_with_attribute_marks_still_dissolve() {
        // Loop dissolution gates on materials only; attribute marks on the
        // spokes do not protect them.
        let mut data = quad_strip(3, &[0; 3]);
        select_bottom_path(&mut data, 3);
        for (ei, e) in data.edges.iter().enumerate() {
            let [a, b] = *e;
            if (a <= 3) != (b <= 3) {
                data.edge_attribs[ei].crease = 1.0;
            }
        }
        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
        let report = dissolve_selected_loops(&mut mesh).unwrap();
        assert_eq!(report.edges_dissolved, 2);
    }

    #[test]
    fn test_path_along_material_boundary_keeps_boundary_vertices() {
        // Two rows of quads with different materials; the selected path runs
        // along the shared middle row. Spokes above and below are each
        // single-material and dissolve, but the path vertices then sit on a
        // {1, 2} boundary and must survive phase 2.
        let n = 4;
        let mut positions = Vec::new();
        for j in 0..3 {
            for i in 0..=n {
                positions.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        let row = n + 1;
        let mut faces = Vec::new();
        let mut materials = Vec::new();
        for j in 0..2 {
            for i in 0..n {
                let v = j * row + i;
                faces.push(vec![v, v + 1, v + row + 1, v + row]);
                materials.push(if j == 0 { 1 } else { 2 });
            }
        }
        let mut data = MeshData::from_polygons(positions, faces, materials);

        // Path: the middle row (vertices row..row+n), interior selected.
        for i in 1..n {
            data.selected_verts[row + i] = true;
        }
        for (ei, e) in data.edges.iter().enumerate() {
            let [a, b] = *e;
            if a >= row && a < 2 * row && b >= row && b < 2 * row {
                data.selected_edges[ei] = true;
            }
        }

        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
        let report = dissolve_selected_loops(&mut mesh).unwrap();
        assert!(mesh.is_valid());

        // Spokes dissolved on both sides of each interior path vertex.
        assert_eq!(report.edges_dissolved, 2 * (n - 1));
        // But the path vertices border materials {1, 2} and survive.
        for i in 1..n {
            let v = VertexId::new(row + i);
            assert!(mesh.is_vertex_alive(v));
            assert_eq!(mesh.vertex_signature(v).len(), 2);
        }
    }

    #[test]
    fn test_report_counts_match_element_counts() {
        let mut mesh = strip_with_path(4, &[0; 4]);
        let (nv, ne) = (mesh.num_vertices(), mesh.num_edges());
        let report = dissolve_selected_loops(&mut mesh).unwrap();

        // Each spoke dissolve removes one edge; each vertex join removes one
        // vertex and one edge.
        assert_eq!(
            mesh.num_vertices(),
            nv - report.verts_dissolved
        );
        assert_eq!(
            mesh.num_edges(),
            ne - report.edges_dissolved - report.verts_dissolved
        );
    }
}
