use crate::articulation::{
    AllowedCollisionMatrix, KinematicChain, KinematicDescription, KinematicsError, KinematicsSolver,
};
use crate::collision::{
    self, CollisionCategory, QueryError, WorldCollisionResult, WorldDistanceResult,
};
use crate::geometry::CollisionObject;
use crate::math::{Isometry, Real, Vector};

/// A collision object rigidly attached to a link.
#[derive(Clone, Debug)]
pub struct LinkCollisionObject {
    link_name: String,
    link_id: usize,
    local_pose: Isometry<Real>,
    object: CollisionObject,
}

impl LinkCollisionObject {
    /// The name of the link carrying this object.
    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    /// The id of the link carrying this object.
    pub fn link_id(&self) -> usize {
        self.link_id
    }

    /// The pose of this object relative to its link.
    pub fn local_pose(&self) -> &Isometry<Real> {
        &self.local_pose
    }

    /// The collision object, at its current world pose.
    pub fn object(&self) -> &CollisionObject {
        &self.object
    }
}

/// An articulation: a kinematic tree of links carrying collision objects.
///
/// Setting the joint configuration runs the forward kinematics and moves every link
/// collision object accordingly.
pub struct ArticulatedModel {
    name: String,
    kinematics: Box<dyn KinematicsSolver>,
    acm: AllowedCollisionMatrix,
    collision_objects: Vec<LinkCollisionObject>,
    gravity: Vector<Real>,
    qpos: Vec<Real>,
    planned: bool,
}

impl core::fmt::Debug for ArticulatedModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArticulatedModel")
            .field("name", &self.name)
            .field("links", &self.kinematics.link_names())
            .field("qpos", &self.qpos)
            .field("planned", &self.planned)
            .finish()
    }
}

impl ArticulatedModel {
    /// Creates an articulation from any kinematics solver.
    ///
    /// The collision objects of `collision_links` are given in their link's local frame.
    pub fn new(
        name: impl Into<String>,
        kinematics: Box<dyn KinematicsSolver>,
        acm: AllowedCollisionMatrix,
        collision_links: Vec<(String, Vec<CollisionObject>)>,
        gravity: Vector<Real>,
    ) -> Result<Self, KinematicsError> {
        let mut collision_objects = vec![];

        for (link_name, objects) in collision_links {
            let link_id = kinematics
                .link_id(&link_name)
                .ok_or_else(|| KinematicsError::UnknownLink(link_name.clone()))?;
            collision_objects.extend(objects.into_iter().map(|object| LinkCollisionObject {
                link_name: link_name.clone(),
                link_id,
                local_pose: *object.pose(),
                object,
            }));
        }

        let mut model = Self {
            name: name.into(),
            qpos: vec![0.0; kinematics.dof()],
            kinematics,
            acm,
            collision_objects,
            gravity,
            planned: false,
        };
        model.update_collision_objects();
        Ok(model)
    }

    /// Creates an articulation driven by a [`KinematicChain`] built from `description`.
    ///
    /// Empty `joint_names` or `link_names` select the description order.
    pub fn from_description(
        name: impl Into<String>,
        description: KinematicDescription,
        acm: AllowedCollisionMatrix,
        collision_links: Vec<(String, Vec<CollisionObject>)>,
        gravity: Vector<Real>,
        joint_names: &[String],
        link_names: &[String],
    ) -> Result<Self, KinematicsError> {
        let chain = KinematicChain::new(description, joint_names, link_names)?;
        Self::new(name, Box::new(chain), acm, collision_links, gravity)
    }

    /// The name of this articulation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current joint configuration.
    pub fn qpos(&self) -> &[Real] {
        &self.qpos
    }

    /// Sets the joint configuration, then updates link poses and link collision objects.
    pub fn set_qpos(&mut self, qpos: &[Real]) -> Result<(), KinematicsError> {
        self.kinematics.compute_forward_kinematics(qpos)?;
        self.qpos.clear();
        self.qpos.extend_from_slice(qpos);
        self.update_collision_objects();
        Ok(())
    }

    fn update_collision_objects(&mut self) {
        for lco in &mut self.collision_objects {
            if let Some(link_pose) = self.kinematics.link_pose(lco.link_id) {
                lco.object.set_transformation(link_pose * lco.local_pose);
            }
        }
    }

    /// The number of degrees of freedom.
    pub fn dof(&self) -> usize {
        self.kinematics.dof()
    }

    /// The link names, indexed by link id.
    pub fn link_names(&self) -> &[String] {
        self.kinematics.link_names()
    }

    /// The active joint names, in joint configuration order.
    pub fn joint_names(&self) -> &[String] {
        self.kinematics.joint_names()
    }

    /// The id of the link named `name`.
    pub fn link_id(&self, name: &str) -> Option<usize> {
        self.kinematics.link_id(name)
    }

    /// The current world pose of link `link_id`.
    pub fn link_pose(&self, link_id: usize) -> Option<Isometry<Real>> {
        self.kinematics.link_pose(link_id)
    }

    /// The kinematics solver.
    pub fn kinematics(&self) -> &dyn KinematicsSolver {
        &*self.kinematics
    }

    /// The gravity vector.
    pub fn gravity(&self) -> &Vector<Real> {
        &self.gravity
    }

    /// The allowed collision matrix of this articulation.
    pub fn allowed_collision_matrix(&self) -> &AllowedCollisionMatrix {
        &self.acm
    }

    /// The allowed collision matrix of this articulation, mutably.
    pub fn allowed_collision_matrix_mut(&mut self) -> &mut AllowedCollisionMatrix {
        &mut self.acm
    }

    /// Every link collision object, grouped by link in construction order.
    pub fn link_collision_objects(&self) -> &[LinkCollisionObject] {
        &self.collision_objects
    }

    /// The collision objects carried by the link named `link_name`.
    pub fn collision_objects_of_link<'a>(
        &'a self,
        link_name: &'a str,
    ) -> impl Iterator<Item = &'a LinkCollisionObject> + 'a {
        self.collision_objects
            .iter()
            .filter(move |lco| lco.link_name == link_name)
    }

    /// Is this articulation planned?
    pub fn is_planned(&self) -> bool {
        self.planned
    }

    /// Marks this articulation as planned or not.
    pub fn set_planned(&mut self, planned: bool) {
        self.planned = planned
    }

    /// Checks for collisions between the links of this articulation.
    ///
    /// Pairs on the same link and pairs allowed by the collision matrix are skipped.
    pub fn check_self_collision(&self) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let mut results = vec![];

        for (i, lco1) in self.collision_objects.iter().enumerate() {
            for lco2 in &self.collision_objects[i + 1..] {
                if lco1.link_id == lco2.link_id || self.acm.is_allowed(&lco1.link_name, &lco2.link_name)
                {
                    continue;
                }

                let res = collision::collide(&lco1.object, &lco2.object)?;
                if res.is_collision() {
                    results.push(WorldCollisionResult {
                        res,
                        collision_type: CollisionCategory::SelfCollision,
                        object_name1: self.name.clone(),
                        object_name2: self.name.clone(),
                        link_name1: lco1.link_name.clone(),
                        link_name2: lco2.link_name.clone(),
                    });
                }
            }
        }

        Ok(results)
    }

    /// The smallest distance between two links of this articulation.
    ///
    /// Skips the same pairs as [`ArticulatedModel::check_self_collision`]. Returns the
    /// "no result" sentinel if no pair is left.
    pub fn distance_self(&self) -> Result<WorldDistanceResult, QueryError> {
        let mut best = WorldDistanceResult::default();

        for (i, lco1) in self.collision_objects.iter().enumerate() {
            for lco2 in &self.collision_objects[i + 1..] {
                if lco1.link_id == lco2.link_id || self.acm.is_allowed(&lco1.link_name, &lco2.link_name)
                {
                    continue;
                }

                let res = collision::distance(&lco1.object, &lco2.object)?;
                best.keep_closest(WorldDistanceResult {
                    res,
                    min_distance: res.min_distance,
                    distance_type: Some(CollisionCategory::SelfCollision),
                    object_name1: self.name.clone(),
                    object_name2: self.name.clone(),
                    link_name1: lco1.link_name.clone(),
                    link_name2: lco2.link_name.clone(),
                });
            }
        }

        Ok(best)
    }

    fn is_link_allowed(&self, link_name: &str, object_name: &str, part_name: &str) -> bool {
        self.acm.is_allowed(link_name, object_name) || self.acm.is_allowed(link_name, part_name)
    }

    /// Checks every link collision object against `object`.
    ///
    /// `object_name` is the name of the scene object `object` belongs to, `part_name` the
    /// name of `object` itself. Links allowed to touch either of them are skipped.
    pub fn collide_with_object(
        &self,
        object_name: &str,
        part_name: &str,
        object: &CollisionObject,
        category: CollisionCategory,
    ) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let mut results = vec![];

        for lco in &self.collision_objects {
            if self.is_link_allowed(&lco.link_name, object_name, part_name) {
                continue;
            }

            let res = collision::collide(&lco.object, object)?;
            if res.is_collision() {
                results.push(WorldCollisionResult {
                    res,
                    collision_type: category,
                    object_name1: self.name.clone(),
                    object_name2: object_name.to_string(),
                    link_name1: lco.link_name.clone(),
                    link_name2: part_name.to_string(),
                });
            }
        }

        Ok(results)
    }

    /// The smallest distance between a link collision object and `object`.
    ///
    /// Returns the "no result" sentinel if every link is allowed to touch the object.
    pub fn distance_with_object(
        &self,
        object_name: &str,
        part_name: &str,
        object: &CollisionObject,
        category: CollisionCategory,
    ) -> Result<WorldDistanceResult, QueryError> {
        let mut best = WorldDistanceResult::default();

        for lco in &self.collision_objects {
            if self.is_link_allowed(&lco.link_name, object_name, part_name) {
                continue;
            }

            let res = collision::distance(&lco.object, object)?;
            if res.min_distance < best.min_distance {
                best = WorldDistanceResult {
                    res,
                    min_distance: res.min_distance,
                    distance_type: Some(category),
                    object_name1: self.name.clone(),
                    object_name2: object_name.to_string(),
                    link_name1: lco.link_name.clone(),
                    link_name2: part_name.to_string(),
                };
            }
        }

        Ok(best)
    }

    /// Checks the collision objects of the link `link_name` against every other link.
    pub fn collide_with_link(
        &self,
        link_name: &str,
    ) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let mut results = vec![];

        for target in self.collision_objects_of_link(link_name) {
            for lco in &self.collision_objects {
                if lco.link_name == link_name || self.acm.is_allowed(&lco.link_name, link_name) {
                    continue;
                }

                let res = collision::collide(&lco.object, &target.object)?;
                if res.is_collision() {
                    results.push(WorldCollisionResult {
                        res,
                        collision_type: CollisionCategory::SelfCollision,
                        object_name1: self.name.clone(),
                        object_name2: self.name.clone(),
                        link_name1: lco.link_name.clone(),
                        link_name2: link_name.to_string(),
                    });
                }
            }
        }

        Ok(results)
    }

    /// The smallest distance between the link `link_name` and every other link.
    pub fn distance_with_link(&self, link_name: &str) -> Result<WorldDistanceResult, QueryError> {
        let mut best = WorldDistanceResult::default();

        for target in self.collision_objects_of_link(link_name) {
            for lco in &self.collision_objects {
                if lco.link_name == link_name || self.acm.is_allowed(&lco.link_name, link_name) {
                    continue;
                }

                let res = collision::distance(&lco.object, &target.object)?;
                if res.min_distance < best.min_distance {
                    best = WorldDistanceResult {
                        res,
                        min_distance: res.min_distance,
                        distance_type: Some(CollisionCategory::SelfCollision),
                        object_name1: self.name.clone(),
                        object_name2: self.name.clone(),
                        link_name1: lco.link_name.clone(),
                        link_name2: link_name.to_string(),
                    };
                }
            }
        }

        Ok(best)
    }
}
