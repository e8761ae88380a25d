//! Mesh editing algorithms.
//!
//! Four independent operations share the [`crate::mesh::EditMesh`] substrate:
//!
//! - **Material-border selection** ([`select_material_border`]): recompute
//!   the edge selection from the material signatures of the selected edges
//! - **Dissolve-candidate filtering** ([`filter_dissolve_candidates`]):
//!   narrow an edge selection to clean single-material interior edges
//! - **Loop dissolution** ([`dissolve_selected_loops`]): structurally remove
//!   the free topology around selected vertex paths
//! - **Edge-halo expansion** ([`expand_edge_halo`]): grow a vertex selection
//!   outward to its incident edges
//!
//! All four snapshot the selection state they read before mutating anything,
//! so no operation ever iterates a selection view it is changing.

pub mod border_select;
pub mod dissolve_filter;
pub mod edge_halo;
pub mod loop_dissolve;

pub use border_select::{select_material_border, BorderMode, BorderSelectOptions};
pub use dissolve_filter::filter_dissolve_candidates;
pub use edge_halo::expand_edge_halo;
pub use loop_dissolve::{dissolve_selected_loops, DissolveReport};
