use super::{arm_scene, ball, ball_entity, entity};
use planworld3d::math::{Isometry, Vector};
use planworld3d::sim::{RigidComponent, RigidComponentKind, SceneSnapshot, SimCollisionShape};
use planworld3d::{CollisionCategory, PlanningWorld, QueryError, QueryTarget, WorldOptions};

fn world_with(scene: SceneSnapshot) -> PlanningWorld {
    PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap()
}

#[test]
fn distant_spheres_do_not_collide() {
    let world = world_with(
        SceneSnapshot::new()
            .with_actor(ball_entity("a", Vector::zeros(), 1.0))
            .with_actor(ball_entity("b", Vector::new(10.0, 0.0, 0.0), 1.0)),
    );

    let res = world
        .check_collision(&QueryTarget::entity("a"), &QueryTarget::entity("b"))
        .unwrap();
    assert!(res.is_empty());
}

#[test]
fn overlapping_spheres_collide_once() {
    let world = world_with(
        SceneSnapshot::new()
            .with_actor(ball_entity("a", Vector::zeros(), 1.0))
            .with_actor(ball_entity("b", Vector::new(1.0, 0.0, 0.0), 1.0)),
    );

    let res = world
        .check_collision(&QueryTarget::entity("a"), &QueryTarget::entity("b"))
        .unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].collision_type.as_str(), "sceneobject_sceneobject");
    assert_eq!(res[0].object_name1, "a");
    assert_eq!(res[0].object_name2, "b");
    assert_eq!(res[0].link_name1, "a");
    assert_eq!(res[0].link_name2, "b");
    assert!(res[0].res.is_collision());
}

#[test]
fn unregistered_names_give_no_result() {
    let world = world_with(arm_scene().with_actor(ball_entity("a", Vector::zeros(), 1.0)));

    for (a, b) in [
        (QueryTarget::entity("a"), QueryTarget::entity("ghost")),
        (QueryTarget::entity("ghost"), QueryTarget::entity("a")),
        (QueryTarget::articulation("arm"), QueryTarget::entity("ghost")),
        (QueryTarget::articulation("robot"), QueryTarget::entity("a")),
        (QueryTarget::link("finger"), QueryTarget::entity("a")),
    ] {
        assert!(world.check_collision(&a, &b).unwrap().is_empty());
    }
}

#[test]
fn articulation_pairs_are_rejected() {
    let world = world_with(arm_scene());
    let arm = QueryTarget::articulation("arm");
    assert_eq!(
        world.check_collision(&arm, &arm),
        Err(QueryError::ArticulationPair)
    );
}

#[test]
fn articulation_is_always_the_left_operand() {
    // Overlaps the hand only.
    let world = world_with(arm_scene().with_actor(ball_entity(
        "probe",
        Vector::new(1.2, 0.0, 0.5),
        0.2,
    )));
    let (arm, probe) = (QueryTarget::articulation("arm"), QueryTarget::entity("probe"));

    let forward = world.check_collision(&arm, &probe).unwrap();
    let backward = world.check_collision(&probe, &arm).unwrap();
    assert_eq!(forward, backward);

    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0].collision_type, CollisionCategory::SelfSceneObject);
    assert_eq!(forward[0].object_name1, "arm");
    assert_eq!(forward[0].link_name1, "hand");
    assert_eq!(forward[0].object_name2, "probe");
    assert_eq!(forward[0].link_name2, "probe");
}

#[test]
fn link_targets_only_use_their_own_objects() {
    let world = world_with(arm_scene().with_actor(ball_entity(
        "probe",
        Vector::new(1.2, 0.0, 0.5),
        0.2,
    )));
    let probe = QueryTarget::entity("probe");

    let res = world
        .check_collision(&QueryTarget::link("hand"), &probe)
        .unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].object_name1, "hand");
    assert_eq!(res[0].link_name1, "hand");

    assert!(world
        .check_collision(&QueryTarget::link("base"), &probe)
        .unwrap()
        .is_empty());
}

#[test]
fn articulation_against_its_own_link() {
    let (arm, hand) = (QueryTarget::articulation("arm"), QueryTarget::link("hand"));

    // Adjacent links are allowed to touch, the base is far away.
    let world = world_with(arm_scene());
    assert!(world.check_collision(&arm, &hand).unwrap().is_empty());

    // A hand big enough to reach the base.
    let mut articulation = super::arm("arm");
    articulation.links[2].component = Some(
        RigidComponent::new(RigidComponentKind::ArticulationLink)
            .with_shape(SimCollisionShape::at_origin(super::ball(1.0))),
    );
    let world = world_with(SceneSnapshot::new().with_articulation(articulation.clone()));

    let res = world.check_collision(&hand, &arm).unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].collision_type, CollisionCategory::SelfCollision);
    assert_eq!(res[0].link_name1, "base");
    assert_eq!(res[0].link_name2, "hand");
    assert_eq!(world.check_self_collision().unwrap(), res);

    articulation.disabled_collisions = vec![("hand".to_string(), "base".to_string())];
    let world = world_with(SceneSnapshot::new().with_articulation(articulation));
    assert!(world.check_collision(&hand, &arm).unwrap().is_empty());
}

#[test]
fn articulation_against_a_composite_reports_each_colliding_part() {
    let shapes = [
        Vector::new(3.0, 0.0, 0.5),
        Vector::new(1.15, 0.0, 0.5),
        Vector::new(0.0, 0.0, -2.0),
    ]
    .iter()
    .map(|p| SimCollisionShape::new(ball(0.1), Isometry::translation(p.x, p.y, p.z)))
    .collect();
    let world = world_with(arm_scene().with_actor(entity("cluster", Isometry::identity(), shapes)));

    let res = world
        .check_collision(&QueryTarget::articulation("arm"), &QueryTarget::entity("cluster"))
        .unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].collision_type, CollisionCategory::SelfSceneObject);
    assert_eq!(res[0].object_name2, "cluster");
    assert_eq!((res[0].link_name1.as_str(), res[0].link_name2.as_str()), ("hand", "cluster_1"));
}
