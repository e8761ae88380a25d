//! Expanding a vertex selection to its incident edges.
//!
//! The "edgehog" expansion: every edge touching a selected vertex becomes
//! selected. Purely additive (nothing is deselected and no topology
//! changes), so repeated runs are no-ops beyond the first.

use crate::mesh::{EdgeId, EditMesh, MeshIndex};

/// Select every live edge incident to a selected vertex.
///
/// Existing edge selections are preserved. Returns the number of edges that
/// were newly selected.
pub fn expand_edge_halo<I: MeshIndex>(mesh: &mut EditMesh<I>) -> usize {
    let seeds = mesh.selected_vertex_ids();

    let mut halo: Vec<EdgeId<I>> = Vec::new();
    for v in seeds {
        halo.extend_from_slice(mesh.link_edges(v));
    }

    let mut newly = 0;
    for e in halo {
        let edge = mesh.edge_mut(e);
        if !edge.selected {
            edge.selected = true;
            newly += 1;
        }
    }
    newly
}
