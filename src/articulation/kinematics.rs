use crate::math::{Isometry, Real, UnitVector, Vector};
use crate::sim::{SimArticulation, SimJointKind};

/// Error raised by a kinematics solver.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum KinematicsError {
    /// A link appears before its parent in the kinematic description.
    #[error("link '{link}' is listed before its parent")]
    UnorderedLinks {
        /// The faulty link.
        link: String,
    },
    /// A joint configuration with the wrong number of values was given.
    #[error("expected {expected} joint values, got {got}")]
    DimensionMismatch {
        /// The number of degrees of freedom.
        expected: usize,
        /// The number of values given.
        got: usize,
    },
    /// A joint name does not match any active joint.
    #[error("unknown active joint '{0}'")]
    UnknownJoint(String),
    /// A link name does not match any link.
    #[error("unknown link '{0}'")]
    UnknownLink(String),
}

/// The motion allowed by a joint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JointKind {
    /// No motion.
    Fixed,
    /// Rotation about an axis, expressed in the joint frame.
    Revolute(UnitVector),
    /// Translation along an axis, expressed in the joint frame.
    Prismatic(UnitVector),
}

impl JointKind {
    /// The relative motion of the child frame for the joint value `q`.
    pub fn motion(&self, q: Real) -> Isometry<Real> {
        match self {
            JointKind::Fixed => Isometry::identity(),
            JointKind::Revolute(axis) => Isometry::rotation(axis.into_inner() * q),
            JointKind::Prismatic(axis) => Isometry::new(axis.into_inner() * q, Vector::zeros()),
        }
    }

    /// Does this joint have a degree of freedom?
    pub fn is_active(&self) -> bool {
        !matches!(self, JointKind::Fixed)
    }
}

/// The joint connecting a link to its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct JointDescription {
    /// The joint name.
    pub name: String,
    /// The joint kind.
    pub kind: JointKind,
    /// The joint frame, relative to the parent link frame.
    pub origin: Isometry<Real>,
}

/// A link of a kinematic tree.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkDescription {
    /// The link name.
    pub name: String,
    /// The parent link index, `None` for the root.
    pub parent: Option<usize>,
    /// The joint connecting this link to its parent.
    pub joint: JointDescription,
}

/// The kinematic tree of an articulation, links ordered parents first.
#[derive(Clone, Debug, PartialEq)]
pub struct KinematicDescription {
    /// The world pose of the tree root.
    pub root_pose: Isometry<Real>,
    /// The links.
    pub links: Vec<LinkDescription>,
}

impl KinematicDescription {
    /// Extracts the kinematic tree of a simulated articulation.
    pub fn from_simulation(articulation: &SimArticulation) -> Self {
        let links = articulation
            .links
            .iter()
            .map(|link| {
                let kind = match link.joint.kind {
                    SimJointKind::Fixed => JointKind::Fixed,
                    SimJointKind::Revolute => JointKind::Revolute(link.joint.axis),
                    SimJointKind::Prismatic => JointKind::Prismatic(link.joint.axis),
                };
                LinkDescription {
                    name: link.name.clone(),
                    parent: link.parent,
                    joint: JointDescription {
                        name: link.joint.name.clone(),
                        kind,
                        origin: link.joint.pose_in_parent,
                    },
                }
            })
            .collect();

        Self {
            root_pose: articulation.root_pose,
            links,
        }
    }

    /// Names of the active joints, in link order.
    pub fn active_joint_names(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|l| l.joint.kind.is_active())
            .map(|l| l.joint.name.clone())
            .collect()
    }

    /// Pairs of link names directly connected by a joint.
    pub fn adjacent_link_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.links.iter().filter_map(move |link| {
            link.parent
                .and_then(|p| self.links.get(p))
                .map(|parent| (parent.name.as_str(), link.name.as_str()))
        })
    }
}

/// Computes link poses from a joint configuration.
pub trait KinematicsSolver: Send + Sync {
    /// The number of degrees of freedom.
    fn dof(&self) -> usize;

    /// The link names, indexed by link id.
    fn link_names(&self) -> &[String];

    /// The active joint names, in joint configuration order.
    fn joint_names(&self) -> &[String];

    /// Updates every link pose for the joint configuration `qpos`.
    fn compute_forward_kinematics(&mut self, qpos: &[Real]) -> Result<(), KinematicsError>;

    /// The world pose of the link `link_id`, as of the last forward kinematics.
    fn link_pose(&self, link_id: usize) -> Option<Isometry<Real>>;

    /// The id of the link named `name`.
    fn link_id(&self, name: &str) -> Option<usize> {
        self.link_names().iter().position(|n| n == name)
    }
}

/// A forward-kinematics solver for trees of fixed, revolute and prismatic joints.
///
/// Link ids and joint value order follow the user-provided link and joint names.
#[derive(Clone, Debug)]
pub struct KinematicChain {
    description: KinematicDescription,
    link_names: Vec<String>,
    joint_names: Vec<String>,
    // Description index of each user link.
    user_links: Vec<usize>,
    // For each description link, the index of its value in the joint configuration.
    qpos_index: Vec<Option<usize>>,
    poses: Vec<Isometry<Real>>,
}

impl KinematicChain {
    /// Creates a solver for `description`.
    ///
    /// Empty `joint_names` (resp. `link_names`) select the description order.
    pub fn new(
        description: KinematicDescription,
        joint_names: &[String],
        link_names: &[String],
    ) -> Result<Self, KinematicsError> {
        for (i, link) in description.links.iter().enumerate() {
            if link.parent.is_some_and(|p| p >= i) {
                return Err(KinematicsError::UnorderedLinks {
                    link: link.name.clone(),
                });
            }
        }

        let link_names = if link_names.is_empty() {
            description.links.iter().map(|l| l.name.clone()).collect()
        } else {
            link_names.to_vec()
        };
        let user_links = link_names
            .iter()
            .map(|name| {
                description
                    .links
                    .iter()
                    .position(|l| &l.name == name)
                    .ok_or_else(|| KinematicsError::UnknownLink(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let active = description.active_joint_names();
        let joint_names = if joint_names.is_empty() {
            active.clone()
        } else {
            joint_names.to_vec()
        };
        if joint_names.len() != active.len() {
            return Err(KinematicsError::DimensionMismatch {
                expected: active.len(),
                got: joint_names.len(),
            });
        }

        let mut qpos_index = vec![None; description.links.len()];
        for (i, name) in joint_names.iter().enumerate() {
            let link = description
                .links
                .iter()
                .position(|l| l.joint.kind.is_active() && &l.joint.name == name)
                .ok_or_else(|| KinematicsError::UnknownJoint(name.clone()))?;
            qpos_index[link] = Some(i);
        }

        let mut chain = Self {
            poses: vec![Isometry::identity(); description.links.len()],
            description,
            link_names,
            joint_names,
            user_links,
            qpos_index,
        };
        let zeros = vec![0.0; chain.dof()];
        chain.compute_forward_kinematics(&zeros)?;
        Ok(chain)
    }

    /// The kinematic description of this chain.
    pub fn description(&self) -> &KinematicDescription {
        &self.description
    }
}

impl KinematicsSolver for KinematicChain {
    fn dof(&self) -> usize {
        self.joint_names.len()
    }

    fn link_names(&self) -> &[String] {
        &self.link_names
    }

    fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    fn compute_forward_kinematics(&mut self, qpos: &[Real]) -> Result<(), KinematicsError> {
        if qpos.len() != self.dof() {
            return Err(KinematicsError::DimensionMismatch {
                expected: self.dof(),
                got: qpos.len(),
            });
        }

        // Parents come first, so their pose is always up to date.
        for (i, link) in self.description.links.iter().enumerate() {
            let parent_pose = match link.parent {
                Some(p) => self.poses[p],
                None => self.description.root_pose,
            };
            let q = self.qpos_index[i].map(|k| qpos[k]).unwrap_or(0.0);
            self.poses[i] = parent_pose * link.joint.origin * link.joint.kind.motion(q);
        }

        Ok(())
    }

    fn link_pose(&self, link_id: usize) -> Option<Isometry<Real>> {
        self.user_links.get(link_id).map(|i| self.poses[*i])
    }
}
