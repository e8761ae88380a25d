//! The four commands, as load→mutate→commit cycles over a [`MeshStore`].
//!
//! Each command loads the stored mesh into an editable working copy, runs
//! exactly one algorithm against it, and commits the whole result back. The
//! [`EditSession`] bracket guarantees the store's prior mode is restored on
//! every exit path, including early error returns, and that a failed command
//! leaves the persisted mesh untouched. Nothing is cached across calls.

use crate::algo::{
    dissolve_selected_loops, expand_edge_halo, filter_dissolve_candidates,
    select_material_border, BorderMode, BorderSelectOptions, DissolveReport,
};
use crate::error::Result;
use crate::store::{EditSession, MeshStore, SelectMode};

/// Dissolve the interior of the selected vertex loops.
///
/// Runs the two-phase loop dissolution and reports what was removed.
pub fn dissolve_loops(store: &mut MeshStore) -> Result<DissolveReport> {
    let mut session = EditSession::begin(store)?;
    let report = dissolve_selected_loops(session.mesh_mut())?;
    session.commit()?;
    Ok(report)
}

/// Narrow the edge selection to clean single-material dissolve candidates.
///
/// Selection-only: the mesh topology is untouched, and the subsequent
/// dissolve (if any) is the caller's move. Returns the number of edges kept.
pub fn select_dissolvable_edges(store: &mut MeshStore) -> Result<usize> {
    let mut session = EditSession::begin(store)?;
    let kept = filter_dissolve_candidates(session.mesh_mut());
    session.commit()?;
    Ok(kept)
}

/// Replace the edge selection with the material-border match set.
///
/// `mode` is the caller-owned choice between exact signature matching and
/// the permissive combined-materials matching. Returns the number of edges
/// selected.
pub fn select_material_borders(store: &mut MeshStore, mode: BorderMode) -> Result<usize> {
    let mut session = EditSession::begin(store)?;
    let options = BorderSelectOptions::with_mode(mode);
    let selected = select_material_border(session.mesh_mut(), &options);
    session.commit()?;
    Ok(selected)
}

/// Expand the vertex selection to all incident edges.
///
/// Additive and idempotent; also switches the store's selection granularity
/// to edges. Returns the number of edges newly selected.
pub fn select_vertex_edges(store: &mut MeshStore) -> Result<usize> {
    let mut session = EditSession::begin(store)?;
    let newly = expand_edge_halo(session.mesh_mut());
    session.set_select_mode(SelectMode::EDGE);
    session.commit()?;
    Ok(newly)
}
