use super::{arm_scene, ball_entity};
use planworld3d::math::{Real, Vector};
use planworld3d::sim::SceneSnapshot;
use planworld3d::{CollisionCategory, PlanningWorld, WorldOptions};

const HAND: usize = 2;

fn world_with(scene: SceneSnapshot) -> PlanningWorld {
    PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap()
}

#[test]
fn self_distance_skips_adjacent_links() {
    let world = world_with(arm_scene());

    // Only `base` and `hand` are not adjacent.
    assert!(world.check_self_collision().unwrap().is_empty());
    let res = world.distance_self().unwrap();
    assert!(relative_eq!(
        res.min_distance,
        (1.25 as Real).sqrt() - 0.3,
        epsilon = 1.0e-5
    ));
    assert_eq!(res.distance_type, Some(CollisionCategory::SelfCollision));
    assert_eq!((res.link_name1.as_str(), res.link_name2.as_str()), ("base", "hand"));
}

#[test]
fn others_are_every_free_scene_object() {
    let world = world_with(
        arm_scene()
            .with_actor(ball_entity("box", Vector::new(3.0, 0.0, 0.5), 0.5))
            .with_actor(ball_entity("wall", Vector::new(0.0, 3.0, 0.0), 0.5)),
    );

    assert!(world.check_collision_with_others().unwrap().is_empty());
    let res = world.distance_with_others().unwrap();
    assert!(relative_eq!(res.min_distance, 1.4, epsilon = 1.0e-5));
    assert_eq!(res.distance_type, Some(CollisionCategory::SelfSceneObject));
    assert_eq!(res.object_name2, "box");
    assert_eq!(res.link_name1, "hand");

    // The self distance is smaller than 1.4.
    assert_eq!(world.distance_full().unwrap(), world.distance_self().unwrap());
    assert!(!world.is_colliding().unwrap());
}

#[test]
fn full_collision_joins_self_and_others() {
    let world = world_with(arm_scene().with_actor(ball_entity("box", Vector::new(1.15, 0.0, 0.5), 0.1)));

    let others = world.check_collision_with_others().unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].collision_type, CollisionCategory::SelfSceneObject);
    assert_eq!(others[0].link_name1, "hand");
    assert_eq!(world.check_collision_full().unwrap(), others);
    assert!(world.is_colliding().unwrap());
    assert_eq!(world.min_distance().unwrap(), 0.0);
}

#[test]
fn attached_objects_are_checked_against_free_objects() {
    let scene = arm_scene()
        .with_actor(ball_entity("cup", Vector::new(1.1, 0.0, 0.5), 0.05))
        .with_actor(ball_entity("box", Vector::new(1.25, 0.0, 0.5), 0.12));
    let mut world = world_with(scene);
    world.attach_object_in_place("cup", HAND, vec![]).unwrap();

    // The hand stays 0.03 away from the box, the cup overlaps it.
    let res = world.check_collision_with_others().unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].collision_type, CollisionCategory::AttachSceneObject);
    assert_eq!(res[0].collision_type.as_str(), "attach_sceneobject");
    assert_eq!((res[0].object_name1.as_str(), res[0].object_name2.as_str()), ("cup", "box"));

    let res = world.distance_with_others().unwrap();
    assert_eq!(res.min_distance, 0.0);
    assert_eq!(res.distance_type, Some(CollisionCategory::AttachSceneObject));
    assert!(world.check_self_collision().unwrap().is_empty());
}

#[test]
fn attached_objects_count_in_the_self_distance() {
    let mut world = world_with(arm_scene().with_actor(ball_entity("cup", Vector::new(0.0, 0.0, 0.3), 0.05)));

    // Carried by the hand, right above the base.
    world.attach_object_in_place("cup", HAND, vec![]).unwrap();
    let res = world.distance_self().unwrap();
    assert!(relative_eq!(res.min_distance, 0.05, epsilon = 1.0e-5));
    assert_eq!(res.distance_type, Some(CollisionCategory::SelfAttach));
    assert_eq!((res.link_name1.as_str(), res.link_name2.as_str()), ("base", "cup"));
    assert_eq!(world.distance_full().unwrap(), res);
}

#[test]
fn unplanned_articulations_are_not_swept() {
    let options = WorldOptions {
        planned: false,
        ..WorldOptions::default()
    };
    let scene = arm_scene().with_actor(ball_entity("box", Vector::new(1.15, 0.0, 0.5), 0.1));
    let world = PlanningWorld::from_simulation(&scene, options).unwrap();

    assert!(world.check_collision_full().unwrap().is_empty());
    assert!(world.distance_full().unwrap().is_none());
    assert!(!world.is_colliding().unwrap());
    assert_eq!(world.min_distance().unwrap(), Real::INFINITY);
}
