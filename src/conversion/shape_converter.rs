use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::geometry::{BvhError, BvhModel, CollisionGeometry, CollisionObject, GeometryError};
use crate::math::{Isometry, Real, Vector};
use crate::sim::{RigidComponent, SimCollisionShape, SimShapeKind};

/// Error raised when a native collision shape cannot be converted.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ConversionError {
    /// Convex meshes must have a unit scale: vertices are never rescaled.
    #[error("convex mesh of '{owner}' has a non-unit scale {scale:?}, its vertices would need rescaling")]
    NonUnitScale {
        /// The owner of the shape.
        owner: String,
        /// The offending scale.
        scale: Vector<Real>,
    },
    /// The triangle mesh BVH could not be built.
    #[error("triangle mesh of '{owner}' could not be built: {source}")]
    Bvh {
        /// The owner of the shape.
        owner: String,
        /// The build failure.
        source: BvhError,
    },
    /// The geometry has no backend representation.
    #[error("collision shape of '{owner}' is invalid: {source}")]
    Geometry {
        /// The owner of the shape.
        owner: String,
        /// The geometry failure.
        source: GeometryError,
    },
}

/// The frame in which converted geometries are expressed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FrameMode {
    /// The shapes belong to an articulation link: they stay in the link's local frame.
    /// The articulation's forward kinematics places them in world-space later.
    Link,
    /// The shapes belong to an independent entity with the given world pose: they are
    /// placed in world-space immediately.
    World(Isometry<Real>),
}

/// The rotation mapping the simulation's `x`-aligned capsules and cylinders onto the
/// canonical `z`-aligned ones: 90° about the local `y` axis.
pub fn axis_correction() -> Isometry<Real> {
    Isometry::rotation(Vector::y() * core::f64::consts::FRAC_PI_2 as Real)
}

fn needs_axis_correction(kind: &SimShapeKind) -> bool {
    matches!(
        kind,
        SimShapeKind::Capsule { .. } | SimShapeKind::Cylinder { .. }
    )
}

/// The world pose of the canonical geometry of `shape`, owned by a frame at `frame_pose`.
pub fn shape_world_pose(frame_pose: &Isometry<Real>, shape: &SimCollisionShape) -> Isometry<Real> {
    let pose = frame_pose * shape.local_pose;
    if needs_axis_correction(&shape.kind) {
        pose * axis_correction()
    } else {
        pose
    }
}

/// Converts one native shape to its canonical geometry and corrected pose.
///
/// `base_pose` is the pose of the shape before the capsule/cylinder axis correction.
/// Returns `Ok(None)` for shapes without canonical geometry (planes).
pub fn convert_shape(
    owner: &str,
    kind: &SimShapeKind,
    base_pose: Isometry<Real>,
) -> Result<Option<(CollisionGeometry, Isometry<Real>)>, ConversionError> {
    let converted = match kind {
        SimShapeKind::Box { half_size } => (
            CollisionGeometry::Box {
                side: half_size * 2.0,
            },
            base_pose,
        ),
        SimShapeKind::Sphere { radius } => (CollisionGeometry::Sphere { radius: *radius }, base_pose),
        SimShapeKind::Capsule {
            radius,
            half_length,
        } => (
            CollisionGeometry::Capsule {
                radius: *radius,
                lz: half_length * 2.0,
            },
            base_pose * axis_correction(),
        ),
        SimShapeKind::Cylinder {
            radius,
            half_length,
        } => (
            CollisionGeometry::Cylinder {
                radius: *radius,
                lz: half_length * 2.0,
            },
            base_pose * axis_correction(),
        ),
        SimShapeKind::ConvexMesh {
            scale,
            vertices,
            triangles,
        } => {
            if !relative_eq!(*scale, Vector::repeat(1.0)) {
                return Err(ConversionError::NonUnitScale {
                    owner: owner.to_string(),
                    scale: *scale,
                });
            }

            (
                CollisionGeometry::Convex {
                    vertices: vertices.clone(),
                    faces: triangles.clone(),
                },
                base_pose,
            )
        }
        SimShapeKind::TriangleMesh {
            vertices,
            triangles,
        } => {
            let bvh_error = |source| ConversionError::Bvh {
                owner: owner.to_string(),
                source,
            };
            let mut bvh = BvhModel::new();
            bvh.begin_model().map_err(bvh_error)?;
            bvh.add_sub_model(vertices, triangles).map_err(bvh_error)?;
            bvh.end_model().map_err(bvh_error)?;
            (CollisionGeometry::TriangleMesh(bvh), base_pose)
        }
        // TODO: emit `CollisionGeometry::Halfspace` once half-space queries are supported by the backend.
        SimShapeKind::Plane => return Ok(None),
    };

    Ok(Some(converted))
}

/// Converts every collision shape of a rigid-body component into collision objects.
///
/// One object is produced per supported shape, in enumeration order. Dropped planes and
/// components with more than one shape are reported to `diagnostics`.
pub fn convert_collision_shapes(
    owner: &str,
    component: &RigidComponent,
    frame: FrameMode,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<CollisionObject>, ConversionError> {
    let shapes = &component.collision_shapes;

    if shapes.len() > 1 {
        diagnostics.warn(DiagnosticKind::MultipleShapes {
            owner: owner.to_string(),
            count: shapes.len(),
        });
    }

    let mut objects = Vec::with_capacity(shapes.len());

    for shape in shapes {
        let base_pose = match frame {
            FrameMode::Link => shape.local_pose,
            FrameMode::World(frame_pose) => frame_pose * shape.local_pose,
        };

        match convert_shape(owner, &shape.kind, base_pose)? {
            Some((geometry, pose)) => {
                let object = CollisionObject::new(geometry, pose).map_err(|source| {
                    ConversionError::Geometry {
                        owner: owner.to_string(),
                        source,
                    }
                })?;
                objects.push(object);
            }
            None => diagnostics.warn(DiagnosticKind::UnsupportedPlane {
                owner: owner.to_string(),
            }),
        }
    }

    Ok(objects)
}
