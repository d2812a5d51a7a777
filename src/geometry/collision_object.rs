use crate::geometry::{CollisionGeometry, GeometryError};
use crate::math::{Isometry, Real, Rotation, Translation, Vector};
use alloc::sync::Arc;
use parry::shape::{Shape, SharedShape};

/// A canonical geometry placed in space.
///
/// The backend shape is built once, when the object is created; only the pose changes
/// afterwards.
#[derive(Clone)]
pub struct CollisionObject {
    geometry: Arc<CollisionGeometry>,
    shape: SharedShape,
    // Maps the backend shape's frame to the geometry's frame.
    shape_offset: Isometry<Real>,
    pose: Isometry<Real>,
}

impl core::fmt::Debug for CollisionObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollisionObject")
            .field("geometry", &self.geometry.geometry_type())
            .field("pose", &self.pose)
            .finish()
    }
}

impl CollisionObject {
    /// Creates a collision object from a geometry and its pose.
    pub fn new(geometry: CollisionGeometry, pose: Isometry<Real>) -> Result<Self, GeometryError> {
        Self::from_shared(Arc::new(geometry), pose)
    }

    /// Creates a collision object from a geometry, a position and an orientation.
    pub fn with_position(
        geometry: CollisionGeometry,
        position: Vector<Real>,
        orientation: Rotation,
    ) -> Result<Self, GeometryError> {
        Self::new(geometry, Isometry::from_parts(Translation::from(position), orientation))
    }

    /// Creates a collision object sharing an existing geometry.
    pub fn from_shared(
        geometry: Arc<CollisionGeometry>,
        pose: Isometry<Real>,
    ) -> Result<Self, GeometryError> {
        let (shape, shape_offset) = geometry.to_backend_shape()?;
        Ok(Self {
            geometry,
            shape,
            shape_offset,
            pose,
        })
    }

    /// The canonical geometry of this object.
    pub fn geometry(&self) -> &CollisionGeometry {
        &self.geometry
    }

    /// The shared handle to the canonical geometry of this object.
    pub fn shared_geometry(&self) -> &Arc<CollisionGeometry> {
        &self.geometry
    }

    /// The pose of this object.
    pub fn pose(&self) -> &Isometry<Real> {
        &self.pose
    }

    /// The position of this object.
    pub fn translation(&self) -> Vector<Real> {
        self.pose.translation.vector
    }

    /// The orientation of this object.
    pub fn rotation(&self) -> Rotation {
        self.pose.rotation
    }

    /// Moves this object.
    pub fn set_transformation(&mut self, pose: Isometry<Real>) {
        self.pose = pose;
    }

    /// The backend shape.
    pub fn shape(&self) -> &dyn Shape {
        &*self.shape
    }

    /// The pose of the backend shape, in world-space.
    pub fn shape_pose(&self) -> Isometry<Real> {
        self.pose * self.shape_offset
    }
}
