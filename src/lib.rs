/*!
planworld
=========

**planworld** is a collision world model for motion planning, kept in sync with a
live rigid-body simulation and queried through **parry**.

A [`PlanningWorld`](world::PlanningWorld) is built once from a simulation snapshot.
Native collision shapes are converted to the canonical [`CollisionGeometry`](geometry::CollisionGeometry)
set, the (single) articulation becomes an [`ArticulatedModel`](articulation::ArticulatedModel),
and every other entity becomes a scene object. After each simulation step, the caller
refreshes the world explicitly and then issues pairwise collision and distance queries.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::type_complexity)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

extern crate alloc;

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;
#[cfg(feature = "f32")]
pub extern crate parry3d as parry;
#[cfg(feature = "f64")]
pub extern crate parry3d_f64 as parry;

pub mod articulation;
pub mod collision;
pub mod conversion;
pub mod diagnostics;
pub mod geometry;
pub mod sim;
pub mod world;

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use parry::math::{Isometry, Point, Real, Translation, Vector, DEFAULT_EPSILON};
    pub use na::{Unit, UnitQuaternion};

    /// The rotation type.
    pub type Rotation = UnitQuaternion<Real>;

    /// The unit vector type.
    pub type UnitVector = Unit<Vector<Real>>;
}

pub use crate::articulation::{AllowedCollisionMatrix, ArticulatedModel};
pub use crate::collision::{
    CollisionCategory, QueryError, WorldCollisionResult, WorldDistanceResult,
};
pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use crate::geometry::{CollisionGeometry, CollisionObject};
pub use crate::world::{PlanningWorld, QueryTarget, WorldError, WorldOptions};
