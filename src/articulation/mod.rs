//! Articulations: kinematic trees of links carrying collision objects.

pub use self::allowed_collision_matrix::{AllowedCollision, AllowedCollisionMatrix};
pub use self::articulated_model::{ArticulatedModel, LinkCollisionObject};
pub use self::kinematics::{
    JointDescription, JointKind, KinematicChain, KinematicDescription, KinematicsError,
    KinematicsSolver, LinkDescription,
};

mod allowed_collision_matrix;
mod articulated_model;
mod kinematics;
