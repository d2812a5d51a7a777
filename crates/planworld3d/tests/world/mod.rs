use planworld3d::math::{Isometry, Real, Vector};
use planworld3d::sim::{
    RigidComponent, RigidComponentKind, SceneSnapshot, SimArticulation, SimCollisionShape,
    SimEntity, SimJoint, SimLink, SimShapeKind,
};

mod attached_objects;
mod collision_queries;
mod construction;
mod world_queries;

pub fn ball(radius: Real) -> SimShapeKind {
    SimShapeKind::Sphere { radius }
}

pub fn entity(name: &str, pose: Isometry<Real>, shapes: Vec<SimCollisionShape>) -> SimEntity {
    let component = shapes
        .into_iter()
        .fold(RigidComponent::new(RigidComponentKind::Dynamic), |c, s| {
            c.with_shape(s)
        });
    SimEntity::new(name, pose).with_component(component)
}

pub fn ball_entity(name: &str, position: Vector<Real>, radius: Real) -> SimEntity {
    entity(
        name,
        Isometry::translation(position.x, position.y, position.z),
        vec![SimCollisionShape::at_origin(ball(radius))],
    )
}

fn link_component(kind: SimShapeKind, local_pose: Isometry<Real>) -> Option<RigidComponent> {
    Some(
        RigidComponent::new(RigidComponentKind::ArticulationLink)
            .with_shape(SimCollisionShape::new(kind, local_pose)),
    )
}

/// A planar arm named `name`:
/// - `base`: a ball of radius 0.2 at the origin;
/// - `upper`: rotates about `z` at height 0.5 (`shoulder`), carries a ball of radius 0.1
///   0.5 along its `x` axis;
/// - `hand`: fixed 1.0 along the `x` axis of `upper`, a ball of radius 0.1.
pub fn arm(name: &str) -> SimArticulation {
    SimArticulation {
        name: name.to_string(),
        root_pose: Isometry::identity(),
        links: vec![
            SimLink {
                name: "base".to_string(),
                parent: None,
                joint: SimJoint::fixed("base_fixed", Isometry::identity()),
                component: link_component(ball(0.2), Isometry::identity()),
            },
            SimLink {
                name: "upper".to_string(),
                parent: Some(0),
                joint: SimJoint::revolute(
                    "shoulder",
                    Vector::z_axis(),
                    Isometry::translation(0.0, 0.0, 0.5),
                ),
                component: link_component(ball(0.1), Isometry::translation(0.5, 0.0, 0.0)),
            },
            SimLink {
                name: "hand".to_string(),
                parent: Some(1),
                joint: SimJoint::fixed("wrist", Isometry::translation(1.0, 0.0, 0.0)),
                component: link_component(ball(0.1), Isometry::identity()),
            },
        ],
        qpos: vec![0.0],
        disabled_collisions: vec![],
    }
}

pub fn arm_scene() -> SceneSnapshot {
    SceneSnapshot::new().with_articulation(arm("arm"))
}

pub fn half_pi() -> Real {
    core::f64::consts::FRAC_PI_2 as Real
}
