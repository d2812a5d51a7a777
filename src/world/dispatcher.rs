use crate::articulation::ArticulatedModel;
use crate::collision::{
    self, CollisionCategory, QueryError, WorldCollisionResult, WorldDistanceResult,
};
use crate::geometry::CollisionObject;
use crate::math::Real;
use crate::world::{NormalObject, PlanningWorld};
use smallvec::SmallVec;

/// An argument of a collision or distance query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum QueryTarget {
    /// The whole articulation with this name.
    Articulation(String),
    /// The collision objects of the articulation link with this name.
    Link(String),
    /// The scene object with this name, with all its parts.
    Entity(String),
}

impl QueryTarget {
    /// Targets the articulation named `name`.
    pub fn articulation(name: impl Into<String>) -> Self {
        QueryTarget::Articulation(name.into())
    }

    /// Targets the link named `name`.
    pub fn link(name: impl Into<String>) -> Self {
        QueryTarget::Link(name.into())
    }

    /// Targets the scene object named `name`.
    pub fn entity(name: impl Into<String>) -> Self {
        QueryTarget::Entity(name.into())
    }

    /// The name of the target.
    pub fn name(&self) -> &str {
        match self {
            QueryTarget::Articulation(name)
            | QueryTarget::Link(name)
            | QueryTarget::Entity(name) => name,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TargetKind {
    Link,
    Free,
    Attached,
}

/// A query argument resolved to named collision objects.
struct ResolvedObjects<'a> {
    name: &'a str,
    kind: TargetKind,
    parts: SmallVec<[(&'a str, &'a CollisionObject); 4]>,
}

enum ResolvedPair<'a> {
    ArticulationObjects(&'a ArticulatedModel, ResolvedObjects<'a>),
    Objects(ResolvedObjects<'a>, ResolvedObjects<'a>),
}

impl PlanningWorld {
    fn resolve_objects<'a>(&'a self, target: &'a QueryTarget) -> Option<ResolvedObjects<'a>> {
        match target {
            QueryTarget::Articulation(_) => None,
            QueryTarget::Link(name) => {
                let model = self.articulation.as_ref()?;
                let _ = model.link_id(name)?;
                Some(ResolvedObjects {
                    name,
                    kind: TargetKind::Link,
                    parts: model
                        .collision_objects_of_link(name)
                        .map(|lco| (lco.link_name(), lco.object()))
                        .collect(),
                })
            }
            QueryTarget::Entity(name) => {
                let object = self.objects.get(name)?;
                Some(ResolvedObjects {
                    name,
                    kind: if object.is_attached() {
                        TargetKind::Attached
                    } else {
                        TargetKind::Free
                    },
                    parts: object
                        .parts()
                        .iter()
                        .map(|part| (part.name(), part.object()))
                        .collect(),
                })
            }
        }
    }

    // The articulation, if any, always ends up on the left.
    fn resolve_pair<'a>(
        &'a self,
        a: &'a QueryTarget,
        b: &'a QueryTarget,
    ) -> Result<Option<ResolvedPair<'a>>, QueryError> {
        match (a, b) {
            (QueryTarget::Articulation(_), QueryTarget::Articulation(_)) => {
                Err(QueryError::ArticulationPair)
            }
            (QueryTarget::Articulation(name), other) | (other, QueryTarget::Articulation(name)) => {
                Ok(self
                    .articulation(name)
                    .zip(self.resolve_objects(other))
                    .map(|(model, objects)| ResolvedPair::ArticulationObjects(model, objects)))
            }
            (a, b) => Ok(self
                .resolve_objects(a)
                .zip(self.resolve_objects(b))
                .map(|(a, b)| ResolvedPair::Objects(a, b))),
        }
    }

    /// Checks for collisions between two query targets.
    ///
    /// Returns every colliding pair of collision objects, or an empty list if either
    /// target is not registered. Two articulations cannot be checked against each other.
    pub fn check_collision(
        &self,
        a: &QueryTarget,
        b: &QueryTarget,
    ) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let Some(pair) = self.resolve_pair(a, b)? else {
            return Ok(vec![]);
        };

        match pair {
            ResolvedPair::ArticulationObjects(model, objects) => {
                if objects.kind == TargetKind::Link {
                    return model.collide_with_link(objects.name);
                }

                let category = articulation_category(objects.kind);
                let mut results = vec![];
                for &(part_name, object) in &objects.parts {
                    results.extend(model.collide_with_object(
                        objects.name,
                        part_name,
                        object,
                        category,
                    )?);
                }
                Ok(results)
            }
            ResolvedPair::Objects(a, b) => {
                let mut results = vec![];
                for &(part_a, object_a) in &a.parts {
                    for &(part_b, object_b) in &b.parts {
                        let res = collision::collide(object_a, object_b)?;
                        if res.is_collision() {
                            results.push(WorldCollisionResult {
                                res,
                                collision_type: CollisionCategory::SceneObjectSceneObject,
                                object_name1: a.name.to_string(),
                                object_name2: b.name.to_string(),
                                link_name1: part_a.to_string(),
                                link_name2: part_b.to_string(),
                            });
                        }
                    }
                }
                Ok(results)
            }
        }
    }

    /// Computes the smallest distance between two query targets.
    ///
    /// Returns the "no result" sentinel (infinite distance, no names) if either target is
    /// not registered. Two articulations cannot be checked against each other.
    pub fn distance_to_collision(
        &self,
        a: &QueryTarget,
        b: &QueryTarget,
    ) -> Result<WorldDistanceResult, QueryError> {
        let mut best = WorldDistanceResult::default();
        let Some(pair) = self.resolve_pair(a, b)? else {
            return Ok(best);
        };

        match pair {
            ResolvedPair::ArticulationObjects(model, objects) => {
                if objects.kind == TargetKind::Link {
                    return model.distance_with_link(objects.name);
                }

                let category = articulation_category(objects.kind);
                for &(part_name, object) in &objects.parts {
                    best.keep_closest(model.distance_with_object(
                        objects.name,
                        part_name,
                        object,
                        category,
                    )?);
                }
            }
            ResolvedPair::Objects(a, b) => {
                for &(part_a, object_a) in &a.parts {
                    for &(part_b, object_b) in &b.parts {
                        let res = collision::distance(object_a, object_b)?;
                        // Distance and names are always replaced together.
                        if res.min_distance < best.min_distance {
                            best = WorldDistanceResult {
                                res,
                                min_distance: res.min_distance,
                                distance_type: Some(CollisionCategory::SceneObjectSceneObject),
                                object_name1: a.name.to_string(),
                                object_name2: b.name.to_string(),
                                link_name1: part_a.to_string(),
                                link_name2: part_b.to_string(),
                            };
                        }
                    }
                }
            }
        }

        Ok(best)
    }

    /// The planned articulation, if any.
    fn planned_articulation(&self) -> Option<&ArticulatedModel> {
        self.articulation.as_ref().filter(|model| model.is_planned())
    }

    /// The parts of every scene object not attached to the articulation.
    fn free_parts(&self) -> impl Iterator<Item = (&str, &NormalObject)> {
        self.objects
            .values()
            .filter(|object| !object.is_attached())
            .flat_map(|object| object.parts().iter().map(move |part| (object.name(), part)))
    }

    /// Checks the planned articulation against itself and against the objects attached
    /// to it.
    ///
    /// Returns an empty list if the world has no planned articulation.
    pub fn check_self_collision(&self) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let Some(model) = self.planned_articulation() else {
            return Ok(vec![]);
        };

        let mut results = model.check_self_collision()?;
        for attached in self.attached_objects() {
            results.extend(model.collide_with_object(
                attached.name(),
                attached.name(),
                attached.object(),
                CollisionCategory::SelfAttach,
            )?);
        }

        Ok(results)
    }

    /// The smallest distance between two links of the planned articulation, or between a
    /// link and an attached object.
    pub fn distance_self(&self) -> Result<WorldDistanceResult, QueryError> {
        let Some(model) = self.planned_articulation() else {
            return Ok(WorldDistanceResult::default());
        };

        let mut best = model.distance_self()?;
        for attached in self.attached_objects() {
            best.keep_closest(model.distance_with_object(
                attached.name(),
                attached.name(),
                attached.object(),
                CollisionCategory::SelfAttach,
            )?);
        }

        Ok(best)
    }

    /// Checks the planned articulation and its attached objects against every free scene
    /// object.
    ///
    /// Pairs allowed by the collision matrix are skipped.
    pub fn check_collision_with_others(&self) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let Some(model) = self.planned_articulation() else {
            return Ok(vec![]);
        };
        let acm = model.allowed_collision_matrix();

        let mut results = vec![];
        for (name, part) in self.free_parts() {
            results.extend(model.collide_with_object(
                name,
                part.name(),
                part.object(),
                CollisionCategory::SelfSceneObject,
            )?);

            for attached in self.attached_objects() {
                if acm.is_allowed(attached.name(), name) || acm.is_allowed(attached.name(), part.name())
                {
                    continue;
                }

                let res = collision::collide(attached.object(), part.object())?;
                if res.is_collision() {
                    results.push(WorldCollisionResult {
                        res,
                        collision_type: CollisionCategory::AttachSceneObject,
                        object_name1: attached.name().to_string(),
                        object_name2: name.to_string(),
                        link_name1: attached.name().to_string(),
                        link_name2: part.name().to_string(),
                    });
                }
            }
        }

        Ok(results)
    }

    /// The smallest distance between the planned articulation, or its attached objects,
    /// and a free scene object.
    pub fn distance_with_others(&self) -> Result<WorldDistanceResult, QueryError> {
        let mut best = WorldDistanceResult::default();
        let Some(model) = self.planned_articulation() else {
            return Ok(best);
        };
        let acm = model.allowed_collision_matrix();

        for (name, part) in self.free_parts() {
            best.keep_closest(model.distance_with_object(
                name,
                part.name(),
                part.object(),
                CollisionCategory::SelfSceneObject,
            )?);

            for attached in self.attached_objects() {
                if acm.is_allowed(attached.name(), name) || acm.is_allowed(attached.name(), part.name())
                {
                    continue;
                }

                let res = collision::distance(attached.object(), part.object())?;
                best.keep_closest(WorldDistanceResult {
                    res,
                    min_distance: res.min_distance,
                    distance_type: Some(CollisionCategory::AttachSceneObject),
                    object_name1: attached.name().to_string(),
                    object_name2: name.to_string(),
                    link_name1: attached.name().to_string(),
                    link_name2: part.name().to_string(),
                });
            }
        }

        Ok(best)
    }

    /// Every collision of the planned articulation: with itself, then with the other
    /// objects of the world.
    pub fn check_collision_full(&self) -> Result<Vec<WorldCollisionResult>, QueryError> {
        let mut results = self.check_self_collision()?;
        results.extend(self.check_collision_with_others()?);
        Ok(results)
    }

    /// The smallest of [`PlanningWorld::distance_self`] and
    /// [`PlanningWorld::distance_with_others`].
    pub fn distance_full(&self) -> Result<WorldDistanceResult, QueryError> {
        let mut best = self.distance_self()?;
        best.keep_closest(self.distance_with_others()?);
        Ok(best)
    }

    /// Is the planned articulation, in its current configuration, colliding with anything?
    pub fn is_colliding(&self) -> Result<bool, QueryError> {
        Ok(!self.check_collision_full()?.is_empty())
    }

    /// The distance from the planned articulation to its nearest collision.
    ///
    /// Infinite if nothing can collide with it.
    pub fn min_distance(&self) -> Result<Real, QueryError> {
        Ok(self.distance_full()?.min_distance)
    }
}

fn articulation_category(kind: TargetKind) -> CollisionCategory {
    match kind {
        TargetKind::Attached => CollisionCategory::SelfAttach,
        TargetKind::Free | TargetKind::Link => CollisionCategory::SelfSceneObject,
    }
}
