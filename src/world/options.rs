use crate::math::{Real, Vector};

/// Run-time options of a [`PlanningWorld`](crate::world::PlanningWorld).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct WorldOptions {
    /// The gravity vector given to the articulation.
    pub gravity: Vector<Real>,
    /// The name of the entity allowed to have no collision shape.
    pub ground_name: String,
    /// Whether the articulation is marked as planned once built.
    pub planned: bool,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            gravity: Vector::new(0.0, 0.0, -9.81),
            ground_name: "ground".to_string(),
            planned: true,
        }
    }
}

impl WorldOptions {
    /// Default options with another ground entity name.
    pub fn with_ground_name(mut self, name: impl Into<String>) -> Self {
        self.ground_name = name.into();
        self
    }

    /// Default options with another gravity vector.
    pub fn with_gravity(mut self, gravity: Vector<Real>) -> Self {
        self.gravity = gravity;
        self
    }
}
