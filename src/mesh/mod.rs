//! Core mesh data structures.
//!
//! This module provides the editable polygon-mesh representation and related
//! types for material-aware topology editing.
//!
//! # Overview
//!
//! The primary type is [`EditMesh`], a boundary representation with explicit
//! adjacency (link) tables: vertices know their incident edges, edges know
//! their endpoint vertices and link faces, faces store their ordered vertex
//! and edge cycles. On top of the plain topology it carries the state the
//! editing operations work with: selection flags on all three element ranks,
//! a per-face material index, and the per-edge [`EdgeAttributes`] bundle.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`]
//! trait), allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! An [`EditMesh`] is always built from the persistent arrays of a
//! [`crate::store::MeshData`], which also builds the adjacency tables:
//!
//! ```
//! use meshpare::mesh::EditMesh;
//! use meshpare::store::MeshData;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let data = MeshData::from_polygons(positions, vec![vec![0, 1, 2, 3]], vec![0]);
//!
//! let mesh: EditMesh = EditMesh::from_data(&data).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! assert_eq!(mesh.num_edges(), 4);
//! ```

mod attrib;
mod builder;
mod editmesh;
mod index;

pub use attrib::{EdgeAttributes, MaterialSignature};
pub use editmesh::{Edge, EditMesh, Face, Vertex};
pub use index::{EdgeId, FaceId, MeshIndex, VertexId};
