use crate::geometry::CollisionObject;
use crate::math::{Isometry, Real};

/// A named collision object: an independent rigid body, or one part of a scene object
/// made of several shapes.
#[derive(Clone, Debug)]
pub struct NormalObject {
    name: String,
    object: CollisionObject,
}

impl NormalObject {
    /// Names a collision object.
    pub fn new(name: impl Into<String>, object: CollisionObject) -> Self {
        Self {
            name: name.into(),
            object,
        }
    }

    /// The name of this object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collision object.
    pub fn object(&self) -> &CollisionObject {
        &self.object
    }

    /// The world pose of this object.
    pub fn pose(&self) -> &Isometry<Real> {
        self.object.pose()
    }

    pub(crate) fn set_pose(&mut self, pose: Isometry<Real>) {
        self.object.set_transformation(pose)
    }
}

/// How an object is carried by a link of the articulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    pub(crate) link_id: usize,
    pub(crate) link_name: String,
    pub(crate) pose: Isometry<Real>,
    pub(crate) touch_links: Vec<String>,
}

impl Attachment {
    /// The id of the carrying link.
    pub fn link_id(&self) -> usize {
        self.link_id
    }

    /// The name of the carrying link.
    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    /// The pose of the object in the frame of the carrying link.
    pub fn pose(&self) -> &Isometry<Real> {
        &self.pose
    }

    /// The links allowed to touch the object.
    pub fn touch_links(&self) -> &[String] {
        &self.touch_links
    }
}

/// A logical object of the scene and its ordered collision parts.
///
/// An object built from a single shape has one part, named like the object. An object
/// built from `k > 1` shapes has the parts `<name>_0` to `<name>_{k-1}`, in the order of
/// the simulation's shape enumeration.
#[derive(Clone, Debug)]
pub struct SceneObject {
    name: String,
    parts: Vec<NormalObject>,
    attachment: Option<Attachment>,
    count_mismatch: bool,
}

impl SceneObject {
    /// An object with a single part named `name`.
    pub fn single(name: impl Into<String>, object: CollisionObject) -> Self {
        let name = name.into();
        Self {
            parts: vec![NormalObject::new(name.clone(), object)],
            name,
            attachment: None,
            count_mismatch: false,
        }
    }

    /// An object made of the given shapes, in order.
    ///
    /// A single shape gives a single-part object.
    pub fn from_shapes(name: impl Into<String>, objects: Vec<CollisionObject>) -> Self {
        let name = name.into();
        let parts = if objects.len() == 1 {
            objects
                .into_iter()
                .map(|object| NormalObject::new(name.clone(), object))
                .collect()
        } else {
            objects
                .into_iter()
                .enumerate()
                .map(|(i, object)| NormalObject::new(format!("{name}_{i}"), object))
                .collect()
        };

        Self {
            name,
            parts,
            attachment: None,
            count_mismatch: false,
        }
    }

    /// The name of this object.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parts of this object.
    pub fn parts(&self) -> &[NormalObject] {
        &self.parts
    }

    pub(crate) fn parts_mut(&mut self) -> &mut [NormalObject] {
        &mut self.parts
    }

    /// Is this object made of several parts?
    pub fn is_composite(&self) -> bool {
        self.parts.len() > 1
    }

    /// The only part of this object, if it is not composite.
    pub fn single_part(&self) -> Option<&NormalObject> {
        match self.parts.as_slice() {
            [part] => Some(part),
            _ => None,
        }
    }

    /// How this object is attached to the articulation, if it is.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub(crate) fn attachment_mut(&mut self) -> Option<&mut Attachment> {
        self.attachment.as_mut()
    }

    pub(crate) fn set_attachment(&mut self, attachment: Option<Attachment>) {
        self.attachment = attachment;
    }

    /// Is this object carried by a link?
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Iterates through the names of this object and of its parts.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        core::iter::once(self.name.as_str()).chain(self.parts.iter().map(|p| p.name()))
    }

    /// Records how many live shapes the simulation has for this object.
    ///
    /// Returns `true` when the count starts differing from the number of parts, and
    /// `false` again until it has matched once more.
    pub(crate) fn track_shape_count(&mut self, found: usize) -> bool {
        let mismatch = found != self.parts.len();
        let newly = mismatch && !self.count_mismatch;
        self.count_mismatch = mismatch;
        newly
    }

    /// Moves an attached object to follow its link, currently at `link_pose`.
    pub(crate) fn follow_link(&mut self, link_pose: &Isometry<Real>) {
        if let Some(attachment) = &self.attachment {
            let pose = link_pose * attachment.pose;
            for part in &mut self.parts {
                part.set_pose(pose);
            }
        }
    }
}

/// A view of an object carried by a link of the articulation.
#[derive(Copy, Clone, Debug)]
pub struct AttachedObject<'a> {
    pub(crate) part: &'a NormalObject,
    pub(crate) attachment: &'a Attachment,
}

impl<'a> AttachedObject<'a> {
    /// The name of the attached object.
    pub fn name(&self) -> &'a str {
        self.part.name()
    }

    /// The collision object, at its current world pose.
    pub fn object(&self) -> &'a CollisionObject {
        self.part.object()
    }

    /// The current world pose of the object.
    pub fn pose(&self) -> &'a Isometry<Real> {
        self.part.pose()
    }

    /// The id of the carrying link.
    pub fn attached_link_id(&self) -> usize {
        self.attachment.link_id
    }

    /// The name of the carrying link.
    pub fn attached_link_name(&self) -> &'a str {
        &self.attachment.link_name
    }

    /// The pose of the object in the frame of the carrying link.
    pub fn attached_pose(&self) -> &'a Isometry<Real> {
        &self.attachment.pose
    }

    /// The links allowed to touch the object.
    pub fn touch_links(&self) -> &'a [String] {
        &self.attachment.touch_links
    }
}
