use super::{arm_scene, ball, ball_entity, entity, half_pi};
use planworld3d::math::{Isometry, Vector};
use planworld3d::sim::{SceneSnapshot, SimCollisionShape};
use planworld3d::{CollisionCategory, PlanningWorld, QueryTarget, WorldError, WorldOptions};

const HAND: usize = 2;

// A small cup touching the hand.
fn scene() -> SceneSnapshot {
    arm_scene().with_actor(ball_entity("cup", Vector::new(1.1, 0.0, 0.5), 0.05))
}

#[test]
fn attached_objects_may_touch_their_link() {
    let mut world = PlanningWorld::from_simulation(&scene(), WorldOptions::default()).unwrap();
    let (arm, cup) = (QueryTarget::articulation("arm"), QueryTarget::entity("cup"));

    let res = world.check_collision(&arm, &cup).unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].link_name1, "hand");

    world.attach_object_in_place("cup", HAND, vec![]).unwrap();
    assert!(world.is_normal_object_attached("cup"));
    assert!(world.normal_object("cup").is_none());
    assert!(world.check_collision(&arm, &cup).unwrap().is_empty());
    assert!(world.check_self_collision().unwrap().is_empty());

    let attached = world.attached_object("cup").unwrap();
    assert_eq!(attached.attached_link_id(), HAND);
    assert_eq!(attached.attached_link_name(), "hand");
    assert!(relative_eq!(
        attached.attached_pose().translation.vector,
        Vector::new(0.1, 0.0, 0.0),
        epsilon = 1.0e-6
    ));
}

#[test]
fn touch_links_are_allowed_too() {
    let mut world = PlanningWorld::from_simulation(&scene(), WorldOptions::default()).unwrap();
    let (arm, cup) = (QueryTarget::articulation("arm"), QueryTarget::entity("cup"));

    // Right on the ball of `upper`.
    let on_upper = Isometry::translation(-0.5, 0.0, 0.0);
    world.attach_object("cup", HAND, on_upper, vec![]).unwrap();
    let res = world.check_collision(&cup, &arm).unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].collision_type, CollisionCategory::SelfAttach);
    assert_eq!(res[0].link_name1, "upper");
    assert_eq!(world.check_self_collision().unwrap(), res);

    world
        .attach_object("cup", HAND, on_upper, vec!["upper".to_string()])
        .unwrap();
    assert!(world.check_collision(&cup, &arm).unwrap().is_empty());
    assert_eq!(world.attached_object("cup").unwrap().touch_links(), ["upper"]);
}

#[test]
fn attached_objects_are_carried_by_their_link() {
    let mut scene = scene();
    let mut world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();
    world.attach_object_in_place("cup", HAND, vec![]).unwrap();

    // The cup drifted away in the simulation while the arm moved.
    scene.articulation_mut("arm").unwrap().qpos = vec![half_pi()];
    scene.actor_mut("cup").unwrap().pose = Isometry::translation(3.0, 3.0, 3.0);

    world.refresh_from_simulation(&scene, false).unwrap();
    let cup = world.attached_object("cup").unwrap();
    assert!(relative_eq!(
        cup.pose().translation.vector,
        Vector::new(0.0, 1.1, 0.5),
        epsilon = 1.0e-6
    ));
    assert!(relative_eq!(
        cup.attached_pose().translation.vector,
        Vector::new(0.1, 0.0, 0.0),
        epsilon = 1.0e-6
    ));
}

#[test]
fn attached_objects_can_be_re_anchored() {
    let mut scene = scene();
    let mut world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();
    world.attach_object_in_place("cup", HAND, vec![]).unwrap();

    scene.articulation_mut("arm").unwrap().qpos = vec![half_pi()];
    scene.actor_mut("cup").unwrap().pose = Isometry::translation(3.0, 3.0, 3.0);

    world.refresh_from_simulation(&scene, true).unwrap();
    let cup = world.attached_object("cup").unwrap();
    assert!(relative_eq!(
        cup.pose().translation.vector,
        Vector::new(3.0, 3.0, 3.0),
        epsilon = 1.0e-5
    ));
    // In the hand frame, rotated by 90° about z.
    assert!(relative_eq!(
        cup.attached_pose().translation.vector,
        Vector::new(2.0, -3.0, 2.5),
        epsilon = 1.0e-5
    ));

    // The new offset is kept when the arm moves on.
    world.set_qpos(&[0.0]).unwrap();
    assert!(relative_eq!(
        world.attached_object("cup").unwrap().pose().translation.vector,
        Vector::new(3.0, -3.0, 3.0),
        epsilon = 1.0e-5
    ));
}

#[test]
fn detached_objects_stay_in_place() {
    let mut world = PlanningWorld::from_simulation(&scene(), WorldOptions::default()).unwrap();
    world.attach_object_in_place("cup", HAND, vec![]).unwrap();
    world.set_qpos(&[half_pi()]).unwrap();

    assert!(world.detach_object("cup", false));
    assert!(!world.detach_object("cup", false));
    assert!(!world.is_normal_object_attached("cup"));

    let cup = world.normal_object("cup").unwrap();
    assert!(relative_eq!(
        cup.pose().translation.vector,
        Vector::new(0.0, 1.1, 0.5),
        epsilon = 1.0e-6
    ));
    let acm = world.articulation("arm").unwrap().allowed_collision_matrix();
    assert!(!acm.has_entry("hand", "cup"));

    world.attach_object_in_place("cup", HAND, vec![]).unwrap();
    assert!(world.detach_object("cup", true));
    assert!(world.scene_object("cup").is_none());
}

#[test]
fn attachment_errors() {
    let shapes = vec![
        SimCollisionShape::at_origin(ball(0.1)),
        SimCollisionShape::at_origin(ball(0.2)),
    ];
    let mut world = PlanningWorld::from_simulation(
        &scene().with_actor(entity("tray", Isometry::identity(), shapes)),
        WorldOptions::default(),
    )
    .unwrap();

    assert_eq!(
        world.attach_object("tray", HAND, Isometry::identity(), vec![]),
        Err(WorldError::AttachComposite("tray".to_string()))
    );
    assert_eq!(
        world.attach_object("mug", HAND, Isometry::identity(), vec![]),
        Err(WorldError::UnknownObject("mug".to_string()))
    );
    assert_eq!(
        world.attach_object("cup", 7, Isometry::identity(), vec![]),
        Err(WorldError::UnknownLink(7))
    );
    assert!(world.attached_objects().next().is_none());
}
