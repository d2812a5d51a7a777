//! The view of a live rigid-body simulation consumed by a planning world.
//!
//! The simulation itself is owned elsewhere. A [`PlanningWorld`](crate::world::PlanningWorld)
//! only reads it, through the [`SimulationScene`] trait, when it is built and whenever it is
//! explicitly refreshed. [`SceneSnapshot`] is a plain in-memory implementation.

pub use self::articulation::{SimArticulation, SimJoint, SimJointKind, SimLink};
pub use self::entity::{
    RigidComponent, RigidComponentKind, SimCollisionShape, SimEntity, SimShapeKind,
};

mod articulation;
mod entity;

/// Read access to the state of a simulation.
pub trait SimulationScene {
    /// Every articulation of the scene.
    fn articulations(&self) -> &[SimArticulation];
    /// Every entity (actor) of the scene that is not part of an articulation.
    fn actors(&self) -> &[SimEntity];

    /// The articulation with the given name.
    fn articulation(&self, name: &str) -> Option<&SimArticulation> {
        self.articulations().iter().find(|a| a.name == name)
    }

    /// The entity with the given name.
    fn actor(&self, name: &str) -> Option<&SimEntity> {
        self.actors().iter().find(|e| e.name == name)
    }
}

/// An in-memory simulation state.
#[derive(Clone, Debug, Default)]
pub struct SceneSnapshot {
    /// The articulations.
    pub articulations: Vec<SimArticulation>,
    /// The actors.
    pub actors: Vec<SimEntity>,
}

impl SceneSnapshot {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an articulation to this scene.
    pub fn with_articulation(mut self, articulation: SimArticulation) -> Self {
        self.articulations.push(articulation);
        self
    }

    /// Adds an actor to this scene.
    pub fn with_actor(mut self, actor: SimEntity) -> Self {
        self.actors.push(actor);
        self
    }

    /// The actor with the given name, mutably.
    pub fn actor_mut(&mut self, name: &str) -> Option<&mut SimEntity> {
        self.actors.iter_mut().find(|e| e.name == name)
    }

    /// The articulation with the given name, mutably.
    pub fn articulation_mut(&mut self, name: &str) -> Option<&mut SimArticulation> {
        self.articulations.iter_mut().find(|a| a.name == name)
    }
}

impl SimulationScene for SceneSnapshot {
    fn articulations(&self) -> &[SimArticulation] {
        &self.articulations
    }

    fn actors(&self) -> &[SimEntity] {
        &self.actors
    }
}
