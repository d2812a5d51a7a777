use crate::articulation::KinematicsError;
use crate::conversion::ConversionError;

/// Error raised while building, refreshing or editing a planning world.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum WorldError {
    /// A world supports at most one articulation.
    #[error("a planning world supports a single articulation, the scene has {0}")]
    TooManyArticulations(usize),
    /// An entity has no rigid-body component.
    #[error("entity '{0}' has no rigid-body component")]
    MissingRigidComponent(String),
    /// An entity has more than one rigid-body component.
    #[error("entity '{name}' has {count} rigid-body components, expected exactly one")]
    MultipleRigidComponents {
        /// The entity.
        name: String,
        /// The number of components found.
        count: usize,
    },
    /// An entity outside of any articulation carries an articulation link component.
    #[error("entity '{0}' carries an articulation link component")]
    LinkComponentOnEntity(String),
    /// An entity other than the ground has no supported collision shape.
    #[error("entity '{0}' has no supported collision shape")]
    NoCollisionShapes(String),
    /// An object (or object part) with this name is already registered.
    #[error("an object named '{0}' already exists")]
    DuplicateObjectName(String),
    /// A simulation entity has no counterpart in the world.
    #[error("entity '{0}' is not registered in the planning world")]
    UnknownEntity(String),
    /// No articulation with this name.
    #[error("no articulation named '{0}'")]
    UnknownArticulation(String),
    /// The world has no articulation.
    #[error("the planning world has no articulation")]
    NoArticulation,
    /// No object with this name.
    #[error("no object named '{0}'")]
    UnknownObject(String),
    /// The articulation has no link with this id.
    #[error("the articulation has no link {0}")]
    UnknownLink(usize),
    /// Objects made of several parts cannot be attached.
    #[error("object '{0}' has several collision shapes and cannot be attached")]
    AttachComposite(String),
    /// A collision shape could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// The articulation kinematics failed.
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}
