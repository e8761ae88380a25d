//! The host-side mesh store and the scoped edit session.
//!
//! Persistent mesh state lives in [`MeshData`]: plain vertex/edge/face arrays
//! plus per-face material indices, per-edge attribute layers, and per-rank
//! selection layers. A [`MeshStore`] owns at most one such mesh together with
//! the host's interaction state (object/edit [`Mode`] and the active
//! [`SelectMode`] granularity).
//!
//! Edits are bracketed by an [`EditSession`]: beginning a session captures
//! the prior mode, switches the store into edit mode, and loads the mesh
//! into an [`EditMesh`] with freshly built adjacency tables. Committing
//! writes the compacted result back; dropping the session without a commit
//! discards the edit buffer and leaves the persisted mesh untouched. The
//! prior mode is restored on every exit path, commit or not.

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{EdgeAttributes, EditMesh};

/// The host's interaction mode around an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Object mode: the mesh is not being edited.
    #[default]
    Object,
    /// Edit mode: an edit session owns the mesh.
    Edit,
}

/// Which element granularities respond to selection.
///
/// At least one flag should be set; the constants cover the three
/// single-rank modes the commands use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectMode {
    /// Vertices are selectable.
    pub vertex: bool,
    /// Edges are selectable.
    pub edge: bool,
    /// Faces are selectable.
    pub face: bool,
}

impl SelectMode {
    /// Vertex-only selection.
    pub const VERTEX: SelectMode = SelectMode {
        vertex: true,
        edge: false,
        face: false,
    };

    /// Edge-only selection.
    pub const EDGE: SelectMode = SelectMode {
        vertex: false,
        edge: true,
        face: false,
    };

    /// Face-only selection.
    pub const FACE: SelectMode = SelectMode {
        vertex: false,
        edge: false,
        face: true,
    };
}

impl Default for SelectMode {
    fn default() -> Self {
        SelectMode::VERTEX
    }
}

/// Persistent mesh arrays.
///
/// This is the form the host stores and the form every command reads and
/// writes; it carries no adjacency. The edge table is explicit so that wire
/// edges (no adjacent face) and per-edge attribute layers have a home, the
/// way host applications keep them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Edge endpoint pairs, indexing into `positions`.
    pub edges: Vec<[usize; 2]>,
    /// Polygon corner lists, indexing into `positions`.
    pub faces: Vec<Vec<usize>>,
    /// Per-face material slot index.
    pub materials: Vec<u32>,
    /// Per-edge attribute layer.
    pub edge_attribs: Vec<EdgeAttributes>,
    /// Per-vertex selection layer.
    pub selected_verts: Vec<bool>,
    /// Per-edge selection layer.
    pub selected_edges: Vec<bool>,
    /// Per-face selection layer.
    pub selected_faces: Vec<bool>,
}

impl MeshData {
    /// Build mesh arrays from positions and polygon corner lists.
    ///
    /// The edge table is derived from the face boundaries in first-seen
    /// order; attributes default to clean and nothing is selected. Validation
    /// happens when the mesh is loaded into an [`EditMesh`].
    pub fn from_polygons(
        positions: Vec<Point3<f64>>,
        faces: Vec<Vec<usize>>,
        materials: Vec<u32>,
    ) -> MeshData {
        let mut edges: Vec<[usize; 2]> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for corners in &faces {
            let n = corners.len();
            for i in 0..n {
                let a = corners[i];
                let b = corners[(i + 1) % n];
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    edges.push([a, b]);
                }
            }
        }

        let nv = positions.len();
        let ne = edges.len();
        let nf = faces.len();
        MeshData {
            positions,
            edges,
            faces,
            materials,
            edge_attribs: vec![EdgeAttributes::default(); ne],
            selected_verts: vec![false; nv],
            selected_edges: vec![false; ne],
            selected_faces: vec![false; nf],
        }
    }
}

/// The host store: at most one mesh plus interaction state.
#[derive(Debug, Default)]
pub struct MeshStore {
    mesh: Option<MeshData>,
    mode: Mode,
    select_mode: SelectMode,
}

impl MeshStore {
    /// Create an empty store in object mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given mesh.
    pub fn with_mesh(mesh: MeshData) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::default()
        }
    }

    /// The stored mesh, if any.
    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// Replace the stored mesh.
    pub fn set_mesh(&mut self, mesh: MeshData) {
        self.mesh = Some(mesh);
    }

    /// Remove and return the stored mesh.
    pub fn take_mesh(&mut self) -> Option<MeshData> {
        self.mesh.take()
    }

    /// The current interaction mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the interaction mode.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// The active selection granularity.
    pub fn select_mode(&self) -> SelectMode {
        self.select_mode
    }

    /// Switch the active selection granularity.
    pub fn set_select_mode(&mut self, select_mode: SelectMode) {
        self.select_mode = select_mode;
    }
}

/// A scoped edit over a [`MeshStore`].
///
/// Holds the editable working copy and the mode captured at entry. Exactly
/// one of two things happens to the working copy: [`EditSession::commit`]
/// writes it back as the store's new mesh, or the session is dropped and the
/// copy is discarded. Either way the captured mode is restored when the
/// session ends, so an early error return can never leave the store in edit
/// mode.
///
/// # Example
///
/// ```
/// use meshpare::store::{EditSession, MeshData, MeshStore, Mode};
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let data = MeshData::from_polygons(positions, vec![vec![0, 1, 2]], vec![0]);
/// let mut store = MeshStore::with_mesh(data);
///
/// let mut session = EditSession::begin(&mut store).unwrap();
/// session.mesh_mut().deselect_all();
/// session.commit().unwrap();
///
/// assert_eq!(store.mode(), Mode::Object);
/// ```
#[derive(Debug)]
pub struct EditSession<'a> {
    store: &'a mut MeshStore,
    mesh: EditMesh,
    prior_mode: Mode,
}

impl<'a> EditSession<'a> {
    /// Load the store's mesh into an editable working copy and enter edit
    /// mode.
    ///
    /// Fails with [`MeshError::NoActiveMesh`] on an empty store, and with a
    /// build error if the persisted arrays are invalid; in both cases the
    /// store is left exactly as it was.
    pub fn begin(store: &'a mut MeshStore) -> Result<EditSession<'a>> {
        let data = store.mesh().ok_or(MeshError::NoActiveMesh)?;
        let mesh = EditMesh::from_data(data)?;
        let prior_mode = store.mode();
        store.set_mode(Mode::Edit);
        Ok(EditSession {
            store,
            mesh,
            prior_mode,
        })
    }

    /// The editable working copy.
    pub fn mesh(&self) -> &EditMesh {
        &self.mesh
    }

    /// The editable working copy, mutably.
    pub fn mesh_mut(&mut self) -> &mut EditMesh {
        &mut self.mesh
    }

    /// Switch the store's selection granularity.
    pub fn set_select_mode(&mut self, select_mode: SelectMode) {
        self.store.set_select_mode(select_mode);
    }

    /// Compact the working copy and write it back as the store's mesh.
    ///
    /// This is the single flush point: nothing reaches the store before it,
    /// and the whole mutated mesh lands at once.
    pub fn commit(mut self) -> Result<()> {
        let data = self.mesh.to_data();
        self.store.set_mesh(data);
        Ok(())
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        self.store.set_mode(self.prior_mode);
    }
}
