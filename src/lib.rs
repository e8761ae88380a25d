//! # Meshpare
//!
//! Material-aware topology simplification for polygon meshes.
//!
//! Meshpare operates on a boundary-representation polygon mesh whose faces
//! carry material indices and whose edges carry attribute layers (crease,
//! bevel weight, sharpness, seam, freestyle mark). Its editing operations
//! are driven by material-boundary semantics: edges and vertices strictly
//! inside a single material region are "free" topology that can be selected,
//! filtered, and dissolved without changing the visible material layout.
//!
//! ## Operations
//!
//! - **Loop dissolution**: collapse selected vertex paths by removing their
//!   single-material spoke edges and interior vertices, preserving path
//!   endpoints and every material boundary
//! - **Material-border selection**: recompute the edge selection from the
//!   material signatures of the currently selected edges
//! - **Dissolve-candidate filtering**: narrow an edge selection to clean,
//!   single-material interior edges
//! - **Edge-halo expansion**: grow a vertex selection to its incident edges
//!
//! ## Quick Start
//!
//! ```
//! use meshpare::ops;
//! use meshpare::store::{MeshData, MeshStore};
//! use nalgebra::Point3;
//!
//! // A strip of two quads sharing one material.
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4]];
//! let mut data = MeshData::from_polygons(positions, faces, vec![0, 0]);
//!
//! // Select the bottom path: vertex 1 between endpoints 0 and 2.
//! data.selected_verts[1] = true;
//! for (i, e) in data.edges.iter().enumerate() {
//!     if e[0] <= 2 && e[1] <= 2 {
//!         data.selected_edges[i] = true;
//!     }
//! }
//!
//! let mut store = MeshStore::with_mesh(data);
//! let report = ops::dissolve_loops(&mut store).unwrap();
//!
//! assert_eq!(report.edges_dissolved, 1); // the interior rung
//! assert_eq!(store.mesh().unwrap().faces.len(), 1);
//! ```
//!
//! ## Working Directly with the Mesh
//!
//! The command layer in [`ops`] brackets each edit in a store session; the
//! algorithms in [`algo`] can also run directly against an editable mesh:
//!
//! ```
//! use meshpare::algo::{select_material_border, BorderSelectOptions};
//! use meshpare::mesh::EditMesh;
//! use meshpare::store::MeshData;
//! use nalgebra::Point3;
//!
//! # let positions = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let data = MeshData::from_polygons(positions, vec![vec![0, 1, 2]], vec![0]);
//! let mut mesh: EditMesh = EditMesh::from_data(&data).unwrap();
//! select_material_border(&mut mesh, &BorderSelectOptions::default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod store;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use meshpare::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        dissolve_selected_loops, expand_edge_halo, filter_dissolve_candidates,
        select_material_border, BorderMode, BorderSelectOptions, DissolveReport,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        EdgeAttributes, EdgeId, EditMesh, FaceId, MaterialSignature, MeshIndex, VertexId,
    };
    pub use crate::store::{EditSession, MeshData, MeshStore, Mode, SelectMode};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
