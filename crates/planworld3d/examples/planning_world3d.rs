#[macro_use]
extern crate approx; // for relative_eq!

use planworld3d::math::{Isometry, Vector};
use planworld3d::sim::{
    RigidComponent, RigidComponentKind, SceneSnapshot, SimCollisionShape, SimEntity, SimShapeKind,
};
use planworld3d::{PlanningWorld, QueryTarget, WorldOptions};

fn ball_entity(name: &str, x: f32) -> SimEntity {
    SimEntity::new(name, Isometry::translation(x, 0.0, 0.0)).with_component(
        RigidComponent::new(RigidComponentKind::Dynamic).with_shape(SimCollisionShape::at_origin(
            SimShapeKind::Sphere { radius: 1.0 },
        )),
    )
}

fn main() {
    let mut scene = SceneSnapshot::new()
        .with_actor(ball_entity("a", 0.0))
        .with_actor(ball_entity("b", 10.0));
    let mut world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();
    let (a, b) = (QueryTarget::entity("a"), QueryTarget::entity("b"));

    assert!(world.check_collision(&a, &b).unwrap().is_empty());
    let dist = world.distance_to_collision(&a, &b).unwrap();
    assert!(relative_eq!(dist.min_distance, 8.0, epsilon = 1.0e-5));

    // The simulation moved `b`: the world only sees it after a refresh.
    scene.actor_mut("b").unwrap().pose = Isometry::translation(1.5, 0.0, 0.0);
    world.refresh_from_simulation(&scene, false).unwrap();

    let contacts = world.check_collision(&a, &b).unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].collision_type.as_str(), "sceneobject_sceneobject");
    assert_eq!(
        world.normal_object("b").unwrap().pose().translation.vector,
        Vector::new(1.5, 0.0, 0.0)
    );
}
