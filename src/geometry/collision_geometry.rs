use crate::geometry::{BvhError, BvhModel};
use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use core::fmt;
use parry::shape::SharedShape;

/// Error raised when a [`CollisionGeometry`] cannot be turned into a collision-backend shape.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Half-spaces are part of the canonical set, but the backend does not handle them.
    #[error("half-space geometries are not supported by the collision backend")]
    UnsupportedHalfspace,
    /// The vertices and faces of a convex geometry do not describe a convex polyhedron.
    #[error("the convex geometry is not a valid convex mesh")]
    InvalidConvexMesh,
    /// The triangle mesh has not been processed (`end_model` was not called).
    #[error("the triangle mesh BVH has not been built")]
    UnprocessedMesh,
    /// The triangle mesh could not be built.
    #[error(transparent)]
    Bvh(#[from] BvhError),
}

/// Enum representing the type of a canonical geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum GeometryType {
    /// A box.
    Box,
    /// A sphere.
    Sphere,
    /// A capsule.
    Capsule,
    /// A cylinder.
    Cylinder,
    /// A convex polyhedron.
    Convex,
    /// A triangle mesh with a bounding volume hierarchy.
    TriangleMesh,
    /// A half-space.
    Halfspace,
}

/// The canonical collision geometries.
///
/// Capsules and cylinders have their long axis along the local `z` axis.
#[derive(Clone, Debug)]
pub enum CollisionGeometry {
    /// A box given by its full side lengths.
    Box {
        /// The full size of the box along each local axis.
        side: Vector<Real>,
    },
    /// A sphere centered at the local origin.
    Sphere {
        /// The sphere radius.
        radius: Real,
    },
    /// A capsule aligned with the local `z` axis.
    Capsule {
        /// The radius of the capsule.
        radius: Real,
        /// The full length of the capsule's segment.
        lz: Real,
    },
    /// A cylinder aligned with the local `z` axis.
    Cylinder {
        /// The radius of the cylinder.
        radius: Real,
        /// The full height of the cylinder.
        lz: Real,
    },
    /// A convex polyhedron given by its vertices and triangular faces.
    Convex {
        /// The vertices.
        vertices: Vec<Point<Real>>,
        /// The faces, indexing `vertices`.
        faces: Vec<[u32; 3]>,
    },
    /// A triangle mesh.
    TriangleMesh(BvhModel),
    /// The half-space `{ x | normal · x <= offset }`.
    Halfspace {
        /// The outward normal.
        normal: UnitVector,
        /// The offset along the normal.
        offset: Real,
    },
}

impl CollisionGeometry {
    /// The type tag of this geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            CollisionGeometry::Box { .. } => GeometryType::Box,
            CollisionGeometry::Sphere { .. } => GeometryType::Sphere,
            CollisionGeometry::Capsule { .. } => GeometryType::Capsule,
            CollisionGeometry::Cylinder { .. } => GeometryType::Cylinder,
            CollisionGeometry::Convex { .. } => GeometryType::Convex,
            CollisionGeometry::TriangleMesh(_) => GeometryType::TriangleMesh,
            CollisionGeometry::Halfspace { .. } => GeometryType::Halfspace,
        }
    }

    /// Builds the backend shape of this geometry.
    ///
    /// The returned isometry maps the backend shape's local frame to the canonical one.
    /// It is the identity except for cylinders: the backend's cylinders are aligned
    /// with `y` instead of `z`.
    pub(crate) fn to_backend_shape(&self) -> Result<(SharedShape, Isometry<Real>), GeometryError> {
        let shape = match self {
            CollisionGeometry::Box { side } => {
                let half = side * 0.5;
                SharedShape::cuboid(half.x, half.y, half.z)
            }
            CollisionGeometry::Sphere { radius } => SharedShape::ball(*radius),
            CollisionGeometry::Capsule { radius, lz } => SharedShape::capsule_z(lz * 0.5, *radius),
            CollisionGeometry::Cylinder { radius, lz } => {
                let y_to_z = Isometry::rotation(Vector::x() * core::f64::consts::FRAC_PI_2 as Real);
                return Ok((SharedShape::cylinder(lz * 0.5, *radius), y_to_z));
            }
            CollisionGeometry::Convex { vertices, faces } => {
                if faces.iter().flatten().any(|i| *i as usize >= vertices.len()) {
                    return Err(GeometryError::InvalidConvexMesh);
                }
                SharedShape::convex_mesh(vertices.clone(), faces)
                    .ok_or(GeometryError::InvalidConvexMesh)?
            }
            CollisionGeometry::TriangleMesh(bvh) => {
                let mesh = bvh.mesh().ok_or(GeometryError::UnprocessedMesh)?;
                SharedShape::new(mesh.clone())
            }
            CollisionGeometry::Halfspace { .. } => return Err(GeometryError::UnsupportedHalfspace),
        };

        Ok((shape, Isometry::identity()))
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeometryType::Box => "box",
            GeometryType::Sphere => "sphere",
            GeometryType::Capsule => "capsule",
            GeometryType::Cylinder => "cylinder",
            GeometryType::Convex => "convex",
            GeometryType::TriangleMesh => "triangle mesh",
            GeometryType::Halfspace => "half-space",
        };
        f.pad(name)
    }
}
