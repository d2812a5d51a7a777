//! Pairwise collision and distance queries, and the named results reported by a planning world.

pub use self::pairwise::{collide, distance};
pub use self::results::{
    CollisionCategory, CollisionResult, DistanceResult, WorldCollisionResult, WorldDistanceResult,
};

use crate::geometry::GeometryType;

mod pairwise;
mod results;

/// Error raised by a collision or distance query.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Both query arguments designate a whole articulation.
    #[error("no support for checking between two articulations yet")]
    ArticulationPair,
    /// The collision backend has no algorithm for this pair of geometries.
    #[error("query not supported between a {0} and a {1}")]
    Unsupported(GeometryType, GeometryType),
}
