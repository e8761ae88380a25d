//! Material-border edge selection.
//!
//! Recomputes the edge selection from the material signatures of the edges
//! currently selected. In [`BorderMode::Pairs`] the new selection is every
//! edge whose signature exactly matches one of the observed signatures; in
//! [`BorderMode::Combined`] it is every edge whose signature is a subset of
//! the union of all observed materials, which deliberately also matches
//! edges bordering new combinations of those materials.
//!
//! # Example
//!
//! ```
//! use meshpare::algo::{select_material_border, BorderMode, BorderSelectOptions};
//! use meshpare::mesh::EditMesh;
//! use meshpare::store::MeshData;
//! use nalgebra::Point3;
//!
//! // Two quads with different materials; select the shared edge.
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 1.0, 0.0),
//! ];
//! let mut data = MeshData::from_polygons(
//!     positions,
//!     vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4]],
//!     vec![0, 1],
//! );
//! data.selected_edges[1] = true; // the rung between the quads
//!
//! let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
//! let n = select_material_border(&mut mesh, &BorderSelectOptions::default());
//! assert_eq!(n, 1); // only the {0, 1} border edge matches
//! ```

use rayon::prelude::*;

use crate::mesh::{EdgeId, EditMesh, MaterialSignature, MeshIndex};

/// How observed signatures generalize to the new selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Match edges whose signature equals one of the observed signatures.
    #[default]
    Pairs,
    /// Match edges whose signature is any subset of the union of observed
    /// materials.
    Combined,
}

/// Options for material-border selection.
#[derive(Debug, Clone)]
pub struct BorderSelectOptions {
    /// Signature matching mode.
    pub mode: BorderMode,

    /// Whether to scan edge signatures in parallel (default: true).
    pub parallel: bool,
}

impl Default for BorderSelectOptions {
    fn default() -> Self {
        Self {
            mode: BorderMode::Pairs,
            parallel: true,
        }
    }
}

impl BorderSelectOptions {
    /// Create options with the given matching mode.
    pub fn with_mode(mode: BorderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Replace the edge selection with the edges matching the selected edges'
/// material signatures.
///
/// The previous selection on all three element ranks is cleared, not merged
/// into. An empty initial edge selection yields an empty result. Returns the
/// number of edges selected.
pub fn select_material_border<I: MeshIndex>(
    mesh: &mut EditMesh<I>,
    options: &BorderSelectOptions,
) -> usize {
    // Snapshot the seed edges before touching any flag.
    let seeds = mesh.selected_edge_ids();

    let matches: Vec<EdgeId<I>> = match options.mode {
        BorderMode::Pairs => {
            let targets: std::collections::HashSet<MaterialSignature> =
                seeds.iter().map(|&e| mesh.edge_signature(e)).collect();
            matching_edges(mesh, options.parallel, |sig| targets.contains(sig))
        }
        BorderMode::Combined => {
            let mut union = MaterialSignature::new();
            for &e in &seeds {
                union.merge(&mesh.edge_signature(e));
            }
            matching_edges(mesh, options.parallel, |sig| sig.is_subset_of(&union))
        }
    };

    mesh.deselect_all();
    if seeds.is_empty() {
        return 0;
    }
    for &e in &matches {
        mesh.edge_mut(e).selected = true;
    }
    matches.len()
}

/// Scan every live edge and keep those whose signature satisfies `keep`.
fn matching_edges<I, F>(mesh: &EditMesh<I>, parallel: bool, keep: F) -> Vec<EdgeId<I>>
where
    I: MeshIndex,
    F: Fn(&MaterialSignature) -> bool + Sync,
{
    let ids: Vec<EdgeId<I>> = mesh.edge_ids().collect();
    if parallel {
        ids.par_iter()
            .filter(|&&e| keep(&mesh.edge_signature(e)))
            .copied()
            .collect()
    } else {
        ids.iter()
            .filter(|&&e| keep(&mesh.edge_signature(e)))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MeshData;
    use nalgebra::Point3;

    /// A strip of `n` unit quads with the given per-face materials.
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

    fn strip_mesh(n: usize, materials: &[u32]) -> EditMesh {
        EditMesh::from_data(&quad_strip(n, materials)).unwrap()
    }

    fn select_rung(mesh: &mut EditMesh, i: usize, n: usize) {
        use crate::mesh::VertexId;
        let e = mesh
            .edge_between(VertexId::new(i), VertexId::new(n + 1 + i))
            .unwrap();
        mesh.edge_mut(e).selected = true;
    }

    fn signature_of_each_selected(mesh: &EditMesh) -> Vec<MaterialSignature> {
        mesh.selected_edge_ids()
            .into_iter()
            .map(|e| mesh.edge_signature(e))
            .collect()
    }

    #[test]
    fn test_pairs_selects_exact_signature_matches() {
        // Materials 0,1,0,1: every rung between unlike faces has signature
        // {0, 1}.
        let mut mesh = strip_mesh(4, &[0, 1, 0, 1]);
        select_rung(&mut mesh, 1, 4);

        let n = select_material_border(&mut mesh, &BorderSelectOptions::default().sequential());
        assert_eq!(n, 3); // rungs 1, 2, 3 all border {0, 1}

        let pair: MaterialSignature = [0, 1].into_iter().collect();
        for sig in signature_of_each_selected(&mesh) {
            assert_eq!(sig, pair);
        }
    }

    #[test]
    fn test_pairs_does_not_select_submatches() {
        // A {1, 2} seed selects only edges whose own signature equals
        // {1, 2}, not {1} or {2} interiors.
        let mut mesh = strip_mesh(4, &[1, 2, 2, 1]);
        select_rung(&mut mesh, 1, 4); // between materials 1 and 2

        select_material_border(&mut mesh, &BorderSelectOptions::default().sequential());

        let pair: MaterialSignature = [1, 2].into_iter().collect();
        let selected = signature_of_each_selected(&mesh);
        assert!(!selected.is_empty());
        assert!(selected.iter().all(|s| *s == pair));
        // The interior rung between the two material-2 faces stays out.
        use crate::mesh::VertexId;
        let interior = mesh
            .edge_between(VertexId::new(2), VertexId::new(7))
            .unwrap();
        assert!(!mesh.edge(interior).selected);
    }

    #[test]
    fn test_pairs_idempotent() {
        let mut mesh = strip_mesh(4, &[0, 1, 0, 1]);
        select_rung(&mut mesh, 1, 4);

        let opts = BorderSelectOptions::default().sequential();
        select_material_border(&mut mesh, &opts);
        let first: Vec<_> = mesh.selected_edge_ids();
        select_material_border(&mut mesh, &opts);
        let second: Vec<_> = mesh.selected_edge_ids();
        assert_eq!(first, second);
    }

    #[test]
    fn test_combined_is_superset_of_pairs() {
        let mut mesh = strip_mesh(5, &[0, 1, 2, 1, 0]);
        select_rung(&mut mesh, 1, 5); // {0,1}
        select_rung(&mut mesh, 2, 5); // {1,2}

        let mut pairs_mesh = mesh.clone();
        select_material_border(
            &mut pairs_mesh,
            &BorderSelectOptions::with_mode(BorderMode::Pairs).sequential(),
        );
        let pairs: std::collections::HashSet<_> =
            pairs_mesh.selected_edge_ids().into_iter().collect();

        select_material_border(
            &mut mesh,
            &BorderSelectOptions::with_mode(BorderMode::Combined).sequential(),
        );
        let combined: std::collections::HashSet<_> =
            mesh.selected_edge_ids().into_iter().collect();

        assert!(pairs.is_subset(&combined));
        assert!(combined.len() > pairs.len());
    }

    #[test]
    fn test_combined_matches_subset_signatures() {
        // Union {0, 1} also matches pure-{0} and pure-{1} interiors and the
        // open boundary edges of those faces.
        let mut mesh = strip_mesh(3, &[0, 1, 2]);
        select_rung(&mut mesh, 1, 3); // {0,1}

        select_material_border(
            &mut mesh,
            &BorderSelectOptions::with_mode(BorderMode::Combined).sequential(),
        );

        for sig in signature_of_each_selected(&mesh) {
            assert!(sig.is_subset_of(&[0, 1].into_iter().collect()));
        }
        // Nothing bordering material 2 alone or {1, 2} is selected.
        use crate::mesh::VertexId;
        let rung_12 = mesh
            .edge_between(VertexId::new(2), VertexId::new(6))
            .unwrap();
        assert!(!mesh.edge(rung_12).selected);
    }

    #[test]
    fn test_empty_selection_selects_nothing() {
        let mut mesh = strip_mesh(3, &[0, 0, 0]);
        let n = select_material_border(&mut mesh, &BorderSelectOptions::default().sequential());
        assert_eq!(n, 0);
        assert!(mesh.selected_edge_ids().is_empty());

        let n = select_material_border(
            &mut mesh,
            &BorderSelectOptions::with_mode(BorderMode::Combined).sequential(),
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn test_previous_selection_replaced_not_merged() {
        let mut mesh = strip_mesh(4, &[0, 0, 1, 1]);
        use crate::mesh::{FaceId, VertexId};
        // Seed on the {0,1} rung, plus stray vertex/face selections that
        // must vanish with the recompute.
        select_rung(&mut mesh, 2, 4);
        mesh.vertex_mut(VertexId::new(0)).selected = true;
        mesh.face_mut(FaceId::new(0)).selected = true;

        select_material_border(&mut mesh, &BorderSelectOptions::default().sequential());

        assert!(!mesh.vertex(VertexId::new(0)).selected);
        assert!(!mesh.face(FaceId::new(0)).selected);
        let pair: MaterialSignature = [0, 1].into_iter().collect();
        let selected = signature_of_each_selected(&mesh);
        assert_eq!(selected.len(), 1); // only the middle rung borders {0, 1}
        assert!(selected.iter().all(|s| *s == pair));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut a = strip_mesh(6, &[0, 1, 0, 2, 1, 0]);
        select_rung(&mut a, 1, 6);
        select_rung(&mut a, 3, 6);
        let mut b = a.clone();

        select_material_border(&mut a, &BorderSelectOptions::default());
        select_material_border(&mut b, &BorderSelectOptions::default().sequential());
        assert_eq!(a.selected_edge_ids(), b.selected_edge_ids());
    }

    #[test]
    fn test_boundary_edge_signatures_participate() {
        // A single-face mesh: its boundary edges have signature {0}; seeding
        // one of them selects all of them in pairs mode.
        let mut mesh = strip_mesh(1, &[0]);
        use crate::mesh::VertexId;
        let e = mesh
            .edge_between(VertexId::new(0), VertexId::new(1))
            .unwrap();
        mesh.edge_mut(e).selected = true;

        let n = select_material_border(&mut mesh, &BorderSelectOptions::default().sequential());
        assert_eq!(n, 4);
    }
}
