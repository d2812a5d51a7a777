use crate::math::{Isometry, Real, UnitVector, Vector};
use crate::sim::RigidComponent;

/// The kind of motion a joint allows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimJointKind {
    /// No relative motion.
    Fixed,
    /// Rotation about the joint axis.
    Revolute,
    /// Translation along the joint axis.
    Prismatic,
}

/// The joint connecting a link to its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct SimJoint {
    /// The joint name.
    pub name: String,
    /// The joint kind.
    pub kind: SimJointKind,
    /// The joint axis, in the joint frame.
    pub axis: UnitVector,
    /// The joint frame relative to the parent link frame (or to the articulation root pose).
    pub pose_in_parent: Isometry<Real>,
}

impl SimJoint {
    /// A fixed joint.
    pub fn fixed(name: impl Into<String>, pose_in_parent: Isometry<Real>) -> Self {
        Self {
            name: name.into(),
            kind: SimJointKind::Fixed,
            axis: Vector::z_axis(),
            pose_in_parent,
        }
    }

    /// A revolute joint about `axis`.
    pub fn revolute(name: impl Into<String>, axis: UnitVector, pose_in_parent: Isometry<Real>) -> Self {
        Self {
            name: name.into(),
            kind: SimJointKind::Revolute,
            axis,
            pose_in_parent,
        }
    }

    /// A prismatic joint along `axis`.
    pub fn prismatic(name: impl Into<String>, axis: UnitVector, pose_in_parent: Isometry<Real>) -> Self {
        Self {
            name: name.into(),
            kind: SimJointKind::Prismatic,
            axis,
            pose_in_parent,
        }
    }

    /// Does this joint have a degree of freedom?
    pub fn is_active(&self) -> bool {
        self.kind != SimJointKind::Fixed
    }
}

/// A link of a simulated articulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimLink {
    /// The link name.
    pub name: String,
    /// The index of the parent link, `None` for the root.
    pub parent: Option<usize>,
    /// The joint connecting this link to its parent.
    pub joint: SimJoint,
    /// The link's rigid-body component; its shape poses are relative to the link frame.
    pub component: Option<RigidComponent>,
}

/// A simulated articulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimArticulation {
    /// The articulation name.
    pub name: String,
    /// The world pose of the articulation root.
    pub root_pose: Isometry<Real>,
    /// The links, parents before children.
    pub links: Vec<SimLink>,
    /// The joint configuration, one value per active joint, in link order.
    pub qpos: Vec<Real>,
    /// Link pairs whose collisions are disabled, in addition to adjacent links.
    pub disabled_collisions: Vec<(String, String)>,
}

impl SimArticulation {
    /// The names of the joints with a degree of freedom, in link order.
    pub fn active_joint_names(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|l| l.joint.is_active())
            .map(|l| l.joint.name.clone())
            .collect()
    }

    /// The names of every link, in order.
    pub fn link_names(&self) -> Vec<String> {
        self.links.iter().map(|l| l.name.clone()).collect()
    }
}
