use crate::math::{Point, Real};
use parry::shape::{TriMesh, TriMeshBuilderError};

/// Error raised when a [`BvhModel`] is built out of order or from inconsistent buffers.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum BvhError {
    /// `begin_model` was called while the model was already being built.
    #[error("the BVH model is already being built")]
    AlreadyBuilding,
    /// A sub-model was added, or the model ended, without calling `begin_model` first.
    #[error("the BVH model must be begun before adding sub-models or ending it")]
    NotBuilding,
    /// A triangle references a vertex that does not exist in its own sub-model.
    #[error("triangle {triangle} of the sub-model references vertex {vertex}, but the sub-model only has {num_vertices} vertices")]
    VertexOutOfBounds {
        /// The index of the faulty triangle within the sub-model.
        triangle: usize,
        /// The faulty vertex index.
        vertex: u32,
        /// The number of vertices of the sub-model.
        num_vertices: usize,
    },
    /// The accumulated triangles do not form a valid triangle mesh.
    #[error("invalid triangle mesh: {0}")]
    TriMesh(#[from] TriMeshBuilderError),
}

/// The build state of a [`BvhModel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BvhBuildState {
    /// No triangle was ever added.
    Empty,
    /// Between `begin_model` and `end_model`.
    Begun,
    /// `end_model` succeeded: the acceleration structure is ready.
    Processed,
}

/// A triangle mesh with a bounding volume hierarchy, built incrementally.
///
/// The model follows an explicit lifecycle: [`BvhModel::begin_model`], any number of
/// [`BvhModel::add_sub_model`], then [`BvhModel::end_model`] which builds the
/// hierarchy. Sub-model triangles index into their own vertex buffer and are
/// re-indexed when appended.
#[derive(Clone)]
pub struct BvhModel {
    vertices: Vec<Point<Real>>,
    triangles: Vec<[u32; 3]>,
    state: BvhBuildState,
    mesh: Option<TriMesh>,
}

impl core::fmt::Debug for BvhModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BvhModel")
            .field("num_vertices", &self.vertices.len())
            .field("num_triangles", &self.triangles.len())
            .field("state", &self.state)
            .finish()
    }
}

impl Default for BvhModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BvhModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            vertices: vec![],
            triangles: vec![],
            state: BvhBuildState::Empty,
            mesh: None,
        }
    }

    /// Builds a processed model from a single vertex and triangle buffer.
    pub fn from_mesh(vertices: &[Point<Real>], triangles: &[[u32; 3]]) -> Result<Self, BvhError> {
        let mut model = Self::new();
        model.begin_model()?;
        model.add_sub_model(vertices, triangles)?;
        model.end_model()?;
        Ok(model)
    }

    /// Starts (or restarts) building this model, discarding any previous content.
    pub fn begin_model(&mut self) -> Result<(), BvhError> {
        if self.state == BvhBuildState::Begun {
            return Err(BvhError::AlreadyBuilding);
        }

        self.vertices.clear();
        self.triangles.clear();
        self.mesh = None;
        self.state = BvhBuildState::Begun;
        Ok(())
    }

    /// Appends a sub-model. Its triangles index into `vertices`.
    pub fn add_sub_model(
        &mut self,
        vertices: &[Point<Real>],
        triangles: &[[u32; 3]],
    ) -> Result<(), BvhError> {
        if self.state != BvhBuildState::Begun {
            return Err(BvhError::NotBuilding);
        }

        for (triangle, idx) in triangles.iter().enumerate() {
            if let Some(&vertex) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(BvhError::VertexOutOfBounds {
                    triangle,
                    vertex,
                    num_vertices: vertices.len(),
                });
            }
        }

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.triangles
            .extend(triangles.iter().map(|t| [t[0] + base, t[1] + base, t[2] + base]));
        Ok(())
    }

    /// Finishes building this model and computes its bounding volume hierarchy.
    pub fn end_model(&mut self) -> Result<(), BvhError> {
        if self.state != BvhBuildState::Begun {
            return Err(BvhError::NotBuilding);
        }

        let mesh = TriMesh::new(self.vertices.clone(), self.triangles.clone())?;
        self.mesh = Some(mesh);
        self.state = BvhBuildState::Processed;
        Ok(())
    }

    /// The current build state.
    pub fn state(&self) -> BvhBuildState {
        self.state
    }

    /// The accumulated vertices.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The accumulated triangles, indexing [`Self::vertices`].
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The processed mesh, if `end_model` succeeded.
    pub fn mesh(&self) -> Option<&TriMesh> {
        self.mesh.as_ref()
    }
}
