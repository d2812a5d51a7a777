//! The planning world: construction from a simulation, synchronization and queries.

pub use self::dispatcher::QueryTarget;
pub use self::error::WorldError;
pub use self::options::WorldOptions;
pub use self::planning_world::PlanningWorld;
pub use self::scene_object::{AttachedObject, Attachment, NormalObject, SceneObject};

mod dispatcher;
mod error;
mod options;
mod planning_world;
mod scene_object;
mod synchronizer;
