//! Narrowing an edge selection to dissolve candidates.
//!
//! Keeps only the edges that can be removed without losing information: a
//! single material on both sides and a clean attribute bundle (no crease, no
//! sharpness, no seam, no bevel weight, no freestyle mark). The operation
//! only repositions the selection; the actual dissolve is a separate,
//! caller-triggered step.

use crate::mesh::{EdgeId, EditMesh, MeshIndex};

/// Narrow the edge selection to clean single-material interior edges.
///
/// The kept set is always a subset of the input selection; everything else,
/// on all three element ranks, ends up deselected. Returns the number of
/// edges kept.
pub fn filter_dissolve_candidates<I: MeshIndex>(mesh: &mut EditMesh<I>) -> usize {
    // Snapshot before clearing: the clear below must not feed the scan.
    let seeds = mesh.selected_edge_ids();

    let keep: Vec<EdgeId<I>> = seeds
        .into_iter()
        .filter(|&e| mesh.edge_signature(e).len() <= 1 && mesh.edge(e).attrib.is_clean())
        .collect();

    mesh.deselect_all();
    for &e in &keep {
        mesh.edge_mut(e).selected = true;
    }
    keep.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexId;
    use crate::store::MeshData;
    use nalgebra::Point3;

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

    #[test]
    fn test_keeps_clean_interior_edges() {
        let mut mesh: EditMesh =
            EditMesh::from_data(&quad_strip(3, &[0, 0, 0])).unwrap();
        // Select the two interior rungs; both have signature {0}.
        for i in [1, 2] {
            let e = mesh
                .edge_between(VertexId::new(i), VertexId::new(4 + i))
                .unwrap();
            mesh.edge_mut(e).selected = true;
        }
        assert_eq!(filter_dissolve_candidates(&mut mesh), 2);
    }

    #[test]
    fn test_drops_material_border_edges() {
        let mut mesh: EditMesh =
            EditMesh::from_data(&quad_strip(3, &[0, 1, 0])).unwrap();
        for i in [1, 2] {
            let e = mesh
                .edge_between(VertexId::new(i), VertexId::new(4 + i))
                .unwrap();
            mesh.edge_mut(e).selected = true;
        }
        // Both interior rungs now border two materials.
        assert_eq!(filter_dissolve_candidates(&mut mesh), 0);
        assert!(mesh.selected_edge_ids().is_empty());
    }

    #[test]
    fn test_drops_marked_edges() {
        let mut data = quad_strip(5, &[0; 5]);
        // Rung i joins bottom vertex i to top vertex 6 + i.
        let rung: Vec<usize> = (0..6)
            .map(|i| {
                data.edges
                    .iter()
                    .position(|e| e.contains(&i) && e.contains(&(6 + i)))
                    .unwrap()
            })
            .collect();
        for i in 1..5 {
            data.selected_edges[rung[i]] = true;
        }
        data.edge_attribs[rung[1]].crease = 0.8;
        data.edge_attribs[rung[2]].smooth = false;
        data.edge_attribs[rung[3]].freestyle_mark = true;

        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
        // Only rung 4 survives: single material and fully clean.
        assert_eq!(filter_dissolve_candidates(&mut mesh), 1);
        let kept = mesh.selected_edge_ids();
        assert_eq!(kept.len(), 1);
        let [a, b] = mesh.edge_verts(kept[0]);
        let mut pair = [a.index(), b.index()];
        pair.sort_unstable();
        assert_eq!(pair, [4, 10]);
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let mut data = quad_strip(4, &[0, 0, 1, 1]);
        for s in data.selected_edges.iter_mut() {
            *s = true;
        }
        data.edge_attribs[0].seam = true;

        let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
        let input: std::collections::HashSet<_> =
            mesh.selected_edge_ids().into_iter().collect();
        filter_dissolve_candidates(&mut mesh);
        let output: std::collections::HashSet<_> =
            mesh.selected_edge_ids().into_iter().collect();
        assert!(output.is_subset(&input));
        assert!(output.len() < input.len());
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut mesh: EditMesh =
            EditMesh::from_data(&quad_strip(2, &[0, 0])).unwrap();
        assert_eq!(filter_dissolve_candidates(&mut mesh), 0);
        assert!(mesh.selected_edge_ids().is_empty());
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_never_structural() {
        let mut mesh: EditMesh =
            EditMesh::from_data(&quad_strip(3, &[0, 0, 0])).unwrap();
        let e = mesh
            .edge_between(VertexId::new(1), VertexId::new(5))
            .unwrap();
        mesh.edge_mut(e).selected = true;

        let (nv, ne, nf) = (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces());
        filter_dissolve_candidates(&mut mesh);
        assert_eq!(
            (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces()),
            (nv, ne, nf)
        );
    }
}
