use crate::math::{Isometry, Point, Real, Vector};

/// The native description of a collision shape, as exposed by the simulation.
///
/// Capsules and cylinders follow the simulation's convention: their long axis is the
/// local `x` axis.
#[derive(Clone, Debug, PartialEq)]
pub enum SimShapeKind {
    /// A box given by its half extents.
    Box {
        /// Half extents along each local axis.
        half_size: Vector<Real>,
    },
    /// A sphere.
    Sphere {
        /// The radius.
        radius: Real,
    },
    /// A capsule along the local `x` axis.
    Capsule {
        /// The radius.
        radius: Real,
        /// Half the length of the capsule's segment.
        half_length: Real,
    },
    /// A cylinder along the local `x` axis.
    Cylinder {
        /// The radius.
        radius: Real,
        /// Half the height of the cylinder.
        half_length: Real,
    },
    /// A convex mesh.
    ConvexMesh {
        /// The per-axis scale applied by the simulation to `vertices`.
        scale: Vector<Real>,
        /// The unscaled vertices.
        vertices: Vec<Point<Real>>,
        /// The triangles.
        triangles: Vec<[u32; 3]>,
    },
    /// An arbitrary triangle mesh.
    TriangleMesh {
        /// The vertices.
        vertices: Vec<Point<Real>>,
        /// The triangles.
        triangles: Vec<[u32; 3]>,
    },
    /// An infinite plane, with normal along the local `x` axis.
    Plane,
}

/// A collision shape with its pose relative to its owning frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SimCollisionShape {
    /// The shape.
    pub kind: SimShapeKind,
    /// The pose of the shape in the frame of its owner (entity or link).
    pub local_pose: Isometry<Real>,
}

impl SimCollisionShape {
    /// A shape at the given local pose.
    pub fn new(kind: SimShapeKind, local_pose: Isometry<Real>) -> Self {
        Self { kind, local_pose }
    }

    /// A shape at the origin of its owner.
    pub fn at_origin(kind: SimShapeKind) -> Self {
        Self::new(kind, Isometry::identity())
    }
}

/// The category of a rigid-body component.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RigidComponentKind {
    /// A body that never moves.
    Static,
    /// A body moved by the physics.
    Dynamic,
    /// A body moved by the user.
    Kinematic,
    /// A link of an articulation.
    ArticulationLink,
}

/// A rigid-body component and its collision shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct RigidComponent {
    /// The category of this component.
    pub kind: RigidComponentKind,
    /// The collision shapes, in enumeration order.
    pub collision_shapes: Vec<SimCollisionShape>,
}

impl RigidComponent {
    /// A component of the given category with no shape.
    pub fn new(kind: RigidComponentKind) -> Self {
        Self {
            kind,
            collision_shapes: vec![],
        }
    }

    /// Adds a collision shape to this component.
    pub fn with_shape(mut self, shape: SimCollisionShape) -> Self {
        self.collision_shapes.push(shape);
        self
    }
}

/// A named entity of the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimEntity {
    /// The unique name of the entity.
    pub name: String,
    /// The world pose of the entity.
    pub pose: Isometry<Real>,
    /// The rigid-body components attached to the entity.
    pub components: Vec<RigidComponent>,
}

impl SimEntity {
    /// An entity with no component.
    pub fn new(name: impl Into<String>, pose: Isometry<Real>) -> Self {
        Self {
            name: name.into(),
            pose,
            components: vec![],
        }
    }

    /// Adds a component to this entity.
    pub fn with_component(mut self, component: RigidComponent) -> Self {
        self.components.push(component);
        self
    }

    /// The first rigid-body component of this entity.
    pub fn rigid_component(&self) -> Option<&RigidComponent> {
        self.components.first()
    }

    /// The rigid-body component of this entity, mutably.
    pub fn rigid_component_mut(&mut self) -> Option<&mut RigidComponent> {
        self.components.first_mut()
    }
}
