//! Error types for meshpare.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The store holds no mesh to edit.
    #[error("no active mesh in the store")]
    NoActiveMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// An edge references an invalid vertex index.
    #[error("edge {edge} references invalid vertex index {vertex}")]
    InvalidEdgeVertex {
        /// The edge index.
        edge: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// An edge connects a vertex to itself.
    #[error("edge {edge} is degenerate (connects a vertex to itself)")]
    DegenerateEdge {
        /// The edge index.
        edge: usize,
    },

    /// The same vertex pair appears twice in the edge table.
    #[error("duplicate edge between vertices {v0} and {v1}")]
    DuplicateEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A face has fewer than three corners or repeats a vertex.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A face boundary segment has no entry in the edge table.
    #[error("face boundary ({v0}, {v1}) has no entry in the edge table")]
    MissingEdge {
        /// First vertex of the segment.
        v0: usize,
        /// Second vertex of the segment.
        v1: usize,
    },

    /// An edge has more than two incident faces.
    #[error("edge ({v0}, {v1}) has more than two incident faces")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// Two faces traverse the same edge in the same direction.
    #[error("faces traverse edge ({v0}, {v1}) with inconsistent winding")]
    InconsistentWinding {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// An attribute or selection layer has the wrong length.
    #[error("layer {layer:?} has length {actual}, expected {expected}")]
    LayerMismatch {
        /// Name of the layer.
        layer: &'static str,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        actual: usize,
    },

    /// Invalid mesh state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),
}
