use crate::math::{Point, Real};
use core::fmt;
use parry::query::Contact;

/// The categories of the two objects involved in a world collision or distance result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CollisionCategory {
    /// Two links of the same articulation.
    SelfCollision,
    /// A link of an articulation and an object attached to it.
    SelfAttach,
    /// A link of an articulation and a free scene object.
    SelfSceneObject,
    /// Two free scene objects (or parts of them).
    SceneObjectSceneObject,
    /// An object attached to the articulation and a free scene object.
    AttachSceneObject,
}

impl CollisionCategory {
    /// The tag identifying this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionCategory::SelfCollision => "self",
            CollisionCategory::SelfAttach => "self_attach",
            CollisionCategory::SelfSceneObject => "self_sceneobject",
            CollisionCategory::SceneObjectSceneObject => "sceneobject_sceneobject",
            CollisionCategory::AttachSceneObject => "attach_sceneobject",
        }
    }
}

impl fmt::Display for CollisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The outcome of a collision test between two collision objects.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct CollisionResult {
    /// Whether the two objects are intersecting.
    pub intersecting: bool,
    /// The deepest contact, in world-space, when the backend can compute it.
    pub contact: Option<Contact>,
}

impl CollisionResult {
    /// Are the two objects colliding?
    pub fn is_collision(&self) -> bool {
        self.intersecting
    }

    /// The penetration depth, if a contact is known.
    pub fn penetration_depth(&self) -> Option<Real> {
        self.contact.map(|c| -c.dist)
    }
}

/// The outcome of a distance query between two collision objects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceResult {
    /// The distance separating the two objects, `0.0` if they intersect.
    pub min_distance: Real,
    /// The closest points on each object, in world-space, when they are disjoint.
    pub nearest_points: Option<[Point<Real>; 2]>,
}

impl Default for DistanceResult {
    fn default() -> Self {
        Self {
            min_distance: Real::INFINITY,
            nearest_points: None,
        }
    }
}

/// A collision between two named objects of a planning world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldCollisionResult {
    /// The backend result.
    pub res: CollisionResult,
    /// The categories of the two objects.
    pub collision_type: CollisionCategory,
    /// The name of the first object (articulation or scene object).
    pub object_name1: String,
    /// The name of the second object.
    pub object_name2: String,
    /// The link (or part) of the first object involved.
    pub link_name1: String,
    /// The link (or part) of the second object involved.
    pub link_name2: String,
}

/// The smallest distance found between two named objects of a planning world.
///
/// The default value is the "no result" sentinel: infinite distance, no category, no names.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldDistanceResult {
    /// The backend result of the closest pair.
    pub res: DistanceResult,
    /// The smallest distance found.
    pub min_distance: Real,
    /// The categories of the two closest objects.
    pub distance_type: Option<CollisionCategory>,
    /// The name of the first object.
    pub object_name1: String,
    /// The name of the second object.
    pub object_name2: String,
    /// The link (or part) of the first object.
    pub link_name1: String,
    /// The link (or part) of the second object.
    pub link_name2: String,
}

impl Default for WorldDistanceResult {
    fn default() -> Self {
        Self {
            res: DistanceResult::default(),
            min_distance: Real::INFINITY,
            distance_type: None,
            object_name1: String::new(),
            object_name2: String::new(),
            link_name1: String::new(),
            link_name2: String::new(),
        }
    }
}

impl WorldDistanceResult {
    /// Is this the "no result" sentinel?
    pub fn is_none(&self) -> bool {
        self.distance_type.is_none()
    }

    /// Replaces `self` by `candidate` if `candidate` is strictly closer.
    pub fn keep_closest(&mut self, candidate: WorldDistanceResult) {
        if candidate.min_distance < self.min_distance {
            *self = candidate;
        }
    }
}
