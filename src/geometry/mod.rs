//! Canonical collision geometries and the collision objects placing them in space.

pub use self::bvh_model::{BvhBuildState, BvhError, BvhModel};
pub use self::collision_geometry::{CollisionGeometry, GeometryError, GeometryType};
pub use self::collision_object::CollisionObject;

mod bvh_model;
mod collision_geometry;
mod collision_object;
