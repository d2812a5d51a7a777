use super::{arm, arm_scene, ball, ball_entity, entity};
use planworld3d::conversion::ConversionError;
use planworld3d::math::{Isometry, Point, Real, Vector};
use planworld3d::sim::{
    RigidComponent, RigidComponentKind, SceneSnapshot, SimCollisionShape, SimEntity, SimShapeKind,
};
use planworld3d::{DiagnosticKind, PlanningWorld, Severity, WorldError, WorldOptions};

#[test]
fn articulation_is_registered_and_planned() {
    let world = PlanningWorld::from_simulation(&arm_scene(), WorldOptions::default()).unwrap();

    let model = world.articulation("arm").unwrap();
    assert!(model.is_planned());
    assert_eq!(model.joint_names(), ["shoulder"]);
    assert_eq!(model.link_names(), ["base", "upper", "hand"]);
    assert_eq!(model.qpos(), [0.0]);
    assert_eq!(*model.gravity(), Vector::new(0.0, 0.0, -9.81));
    assert!(world.articulation("other").is_none());

    // Adjacent links may touch.
    let acm = model.allowed_collision_matrix();
    assert!(acm.is_allowed("base", "upper"));
    assert!(acm.is_allowed("hand", "upper"));
    assert!(!acm.is_allowed("base", "hand"));

    let hand = model
        .link_collision_objects()
        .iter()
        .find(|lco| lco.link_name() == "hand")
        .unwrap();
    assert!(relative_eq!(
        hand.object().translation(),
        Vector::new(1.0, 0.0, 0.5),
        epsilon = 1.0e-6
    ));
}

#[test]
fn articulation_starts_at_the_simulated_configuration() {
    let mut articulation = arm("arm");
    articulation.qpos = vec![super::half_pi()];
    articulation.disabled_collisions = vec![("base".to_string(), "hand".to_string())];
    let scene = SceneSnapshot::new().with_articulation(articulation);

    let world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();
    let model = world.articulation("arm").unwrap();
    let hand = model.link_pose(2).unwrap();
    assert!(relative_eq!(
        hand.translation.vector,
        Vector::new(0.0, 1.0, 0.5),
        epsilon = 1.0e-6
    ));
    assert!(model.allowed_collision_matrix().is_allowed("hand", "base"));
}

#[test]
fn two_articulations_fail_before_any_object() {
    // The entity without component would fail on its own if it were ever reached.
    let scene = SceneSnapshot::new()
        .with_articulation(arm("left"))
        .with_articulation(arm("right"))
        .with_actor(SimEntity::new("broken", Isometry::identity()));

    let res = PlanningWorld::from_simulation(&scene, WorldOptions::default());
    assert!(matches!(res, Err(WorldError::TooManyArticulations(2))));
}

#[test]
fn single_shape_entities_become_normal_objects() {
    let scene = SceneSnapshot::new().with_actor(ball_entity("cup", Vector::new(1.0, 2.0, 3.0), 0.1));
    let world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();

    let cup = world.normal_object("cup").unwrap();
    assert_eq!(cup.name(), "cup");
    assert_eq!(cup.pose().translation.vector, Vector::new(1.0, 2.0, 3.0));
    assert!(world.composite_parts("cup").is_none());
    assert!(world.diagnostics().is_empty());
}

#[test]
fn multi_shape_entities_become_composites() {
    let shapes = (0..4)
        .map(|i| {
            SimCollisionShape::new(ball(0.1), Isometry::translation(i as Real, 0.0, 0.0))
        })
        .collect();
    let scene = SceneSnapshot::new().with_actor(entity(
        "shelf",
        Isometry::translation(0.0, 0.0, 1.0),
        shapes,
    ));
    let world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();

    let parts = world.composite_parts("shelf").unwrap();
    let names: Vec<_> = parts.iter().map(|p| p.name()).collect();
    assert_eq!(names, ["shelf_0", "shelf_1", "shelf_2", "shelf_3"]);
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(
            part.pose().translation.vector,
            Vector::new(i as Real, 0.0, 1.0)
        );
    }

    assert!(world.normal_object("shelf").is_none());
    assert_eq!(
        world.diagnostics().records()[0].kind,
        DiagnosticKind::MultipleShapes {
            owner: "shelf".to_string(),
            count: 4
        }
    );
}

#[test]
fn capsules_are_rotated_about_y() {
    let scene = SceneSnapshot::new().with_actor(entity(
        "rod",
        Isometry::identity(),
        vec![SimCollisionShape::at_origin(SimShapeKind::Capsule {
            radius: 0.1,
            half_length: 1.0,
        })],
    ));
    let world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();

    let rod = world.normal_object("rod").unwrap();
    let expected = Isometry::rotation(Vector::y() * super::half_pi());
    assert!(relative_eq!(*rod.pose(), expected, epsilon = 1.0e-6));
}

#[test]
fn ground_without_shapes_is_skipped() {
    let ground = entity(
        "ground",
        Isometry::identity(),
        vec![SimCollisionShape::at_origin(SimShapeKind::Plane)],
    );
    let scene = SceneSnapshot::new().with_actor(ground);
    let mut world = PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap();

    assert_eq!(world.scene_objects().count(), 0);
    assert_eq!(world.diagnostics().at_least(Severity::Warning).count(), 2);

    let kinds: Vec<_> = world.take_diagnostics().into_iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::UnsupportedPlane {
                owner: "ground".to_string()
            },
            DiagnosticKind::IgnoredGround {
                name: "ground".to_string()
            },
        ]
    );
    assert!(world.diagnostics().is_empty());
}

#[test]
fn other_entities_without_shapes_fail() {
    let floor = entity(
        "floor",
        Isometry::identity(),
        vec![SimCollisionShape::at_origin(SimShapeKind::Plane)],
    );
    let scene = SceneSnapshot::new().with_actor(floor);
    assert_eq!(
        PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap_err(),
        WorldError::NoCollisionShapes("floor".to_string())
    );

    // Unless it is the configured ground.
    let options = WorldOptions::default().with_ground_name("floor");
    assert!(PlanningWorld::from_simulation(&scene, options).is_ok());
}

#[test]
fn entities_need_exactly_one_non_link_component() {
    let bare = SimEntity::new("bare", Isometry::identity());
    let res = PlanningWorld::from_simulation(
        &SceneSnapshot::new().with_actor(bare),
        WorldOptions::default(),
    );
    assert_eq!(
        res.unwrap_err(),
        WorldError::MissingRigidComponent("bare".to_string())
    );

    let twice = ball_entity("twice", Vector::zeros(), 0.1)
        .with_component(RigidComponent::new(RigidComponentKind::Static));
    let res = PlanningWorld::from_simulation(
        &SceneSnapshot::new().with_actor(twice),
        WorldOptions::default(),
    );
    assert_eq!(
        res.unwrap_err(),
        WorldError::MultipleRigidComponents {
            name: "twice".to_string(),
            count: 2
        }
    );

    let link = SimEntity::new("stray_link", Isometry::identity()).with_component(
        RigidComponent::new(RigidComponentKind::ArticulationLink)
            .with_shape(SimCollisionShape::at_origin(ball(0.1))),
    );
    let res = PlanningWorld::from_simulation(
        &SceneSnapshot::new().with_actor(link),
        WorldOptions::default(),
    );
    assert_eq!(
        res.unwrap_err(),
        WorldError::LinkComponentOnEntity("stray_link".to_string())
    );
}

#[test]
fn part_names_cannot_be_reused() {
    let shapes = vec![
        SimCollisionShape::at_origin(ball(0.1)),
        SimCollisionShape::at_origin(ball(0.2)),
    ];
    let scene = SceneSnapshot::new()
        .with_actor(ball_entity("shelf_1", Vector::zeros(), 0.1))
        .with_actor(entity("shelf", Isometry::identity(), shapes));

    assert_eq!(
        PlanningWorld::from_simulation(&scene, WorldOptions::default()).unwrap_err(),
        WorldError::DuplicateObjectName("shelf_1".to_string())
    );
}

#[test]
fn scaled_convex_meshes_fail() {
    let hull = SimShapeKind::ConvexMesh {
        scale: Vector::new(1.0, 1.0, 2.0),
        vertices: vec![
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ],
        triangles: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    };
    let scene = SceneSnapshot::new().with_actor(entity(
        "hull",
        Isometry::identity(),
        vec![SimCollisionShape::at_origin(hull)],
    ));

    let res = PlanningWorld::from_simulation(&scene, WorldOptions::default());
    assert!(matches!(
        res,
        Err(WorldError::Conversion(ConversionError::NonUnitScale { .. }))
    ));
}
