use crate::articulation::{AllowedCollisionMatrix, ArticulatedModel, KinematicDescription};
use crate::conversion::{convert_collision_shapes, FrameMode};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::geometry::CollisionObject;
use crate::math::{Isometry, Real};
use crate::sim::{
    RigidComponent, RigidComponentKind, SimArticulation, SimEntity, SimulationScene,
};
use crate::world::{AttachedObject, Attachment, NormalObject, SceneObject, WorldError, WorldOptions};
use indexmap::IndexMap;

/// A collision world mirroring a rigid-body simulation, for motion planning.
///
/// The world holds at most one articulation, plus one [`SceneObject`] per simulated entity.
/// It is built once with [`PlanningWorld::from_simulation`] and never follows the simulation
/// on its own: call [`PlanningWorld::refresh_from_simulation`] after each simulation step
/// before issuing queries.
#[derive(Debug)]
pub struct PlanningWorld {
    pub(crate) options: WorldOptions,
    pub(crate) articulation: Option<ArticulatedModel>,
    pub(crate) objects: IndexMap<String, SceneObject>,
    pub(crate) diagnostics: Diagnostics,
}

impl Default for PlanningWorld {
    fn default() -> Self {
        Self::new(WorldOptions::default())
    }
}

impl PlanningWorld {
    /// An empty world.
    pub fn new(options: WorldOptions) -> Self {
        Self {
            options,
            articulation: None,
            objects: IndexMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Builds a world from the current state of a simulation.
    ///
    /// Fails before registering anything if the scene has more than one articulation.
    pub fn from_simulation<S: SimulationScene + ?Sized>(
        scene: &S,
        options: WorldOptions,
    ) -> Result<Self, WorldError> {
        let articulations = scene.articulations();
        if articulations.len() > 1 {
            return Err(WorldError::TooManyArticulations(articulations.len()));
        }

        let mut world = Self::new(options);

        if let Some(articulation) = articulations.first() {
            let model = world.build_articulation(articulation)?;
            world.articulation = Some(model);
        }

        for entity in scene.actors() {
            world.register_entity(entity)?;
        }

        log::debug!(
            "planning world built: {} articulation(s), {} object(s), {} diagnostic(s)",
            world.articulation.iter().len(),
            world.objects.len(),
            world.diagnostics.len()
        );

        Ok(world)
    }

    fn build_articulation(
        &mut self,
        articulation: &SimArticulation,
    ) -> Result<ArticulatedModel, WorldError> {
        let mut collision_links = vec![];

        for link in &articulation.links {
            if let Some(component) = &link.component {
                let objects = convert_collision_shapes(
                    &link.name,
                    component,
                    FrameMode::Link,
                    &mut self.diagnostics,
                )?;

                if !objects.is_empty() {
                    collision_links.push((link.name.clone(), objects));
                }
            }
        }

        let description = KinematicDescription::from_simulation(articulation);
        let acm =
            AllowedCollisionMatrix::from_description(&description, &articulation.disabled_collisions);
        let mut model = ArticulatedModel::from_description(
            articulation.name.clone(),
            description,
            acm,
            collision_links,
            self.options.gravity,
            &articulation.active_joint_names(),
            &articulation.link_names(),
        )?;
        model.set_qpos(&articulation.qpos)?;
        model.set_planned(self.options.planned);

        Ok(model)
    }

    fn register_entity(&mut self, entity: &SimEntity) -> Result<(), WorldError> {
        let component = rigid_component_of(entity)?;

        let objects = convert_collision_shapes(
            &entity.name,
            component,
            FrameMode::World(entity.pose),
            &mut self.diagnostics,
        )?;

        if objects.is_empty() {
            if entity.name == self.options.ground_name {
                self.diagnostics.warn(DiagnosticKind::IgnoredGround {
                    name: entity.name.clone(),
                });
                return Ok(());
            }

            return Err(WorldError::NoCollisionShapes(entity.name.clone()));
        }

        self.insert_object(SceneObject::from_shapes(entity.name.clone(), objects))
    }

    fn is_name_taken(&self, name: &str) -> bool {
        self.objects
            .values()
            .any(|object| object.names().any(|n| n == name))
    }

    fn insert_object(&mut self, object: SceneObject) -> Result<(), WorldError> {
        if let Some(name) = object.names().find(|name| self.is_name_taken(name)) {
            return Err(WorldError::DuplicateObjectName(name.to_string()));
        }

        let _ = self.objects.insert(object.name().to_string(), object);
        Ok(())
    }

    /// The options this world was built with.
    pub fn options(&self) -> &WorldOptions {
        &self.options
    }

    /// The articulation named `name`.
    pub fn articulation(&self, name: &str) -> Option<&ArticulatedModel> {
        self.articulation.as_ref().filter(|model| model.name() == name)
    }

    /// The articulation of this world, whatever its name.
    pub fn articulated_model(&self) -> Option<&ArticulatedModel> {
        self.articulation.as_ref()
    }

    /// Is there an articulation named `name`?
    pub fn has_articulation(&self, name: &str) -> bool {
        self.articulation(name).is_some()
    }

    /// Sets the joint configuration of the articulation, moving its attached objects along.
    pub fn set_qpos(&mut self, qpos: &[Real]) -> Result<(), WorldError> {
        self.articulation
            .as_mut()
            .ok_or(WorldError::NoArticulation)?
            .set_qpos(qpos)?;
        self.update_attached_objects();
        Ok(())
    }

    /// Moves every attached object to follow its link.
    pub(crate) fn update_attached_objects(&mut self) {
        let Some(model) = &self.articulation else {
            return;
        };

        for object in self.objects.values_mut() {
            if let Some(link_pose) = object
                .attachment()
                .and_then(|attachment| model.link_pose(attachment.link_id))
            {
                object.follow_link(&link_pose);
            }
        }
    }

    /// Every scene object, in registration order.
    pub fn scene_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// The scene object named `name`, composite or not, attached or not.
    pub fn scene_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.get(name)
    }

    /// The free (non-attached) single-part object named `name`.
    pub fn normal_object(&self, name: &str) -> Option<&NormalObject> {
        self.objects
            .get(name)
            .filter(|object| !object.is_attached())
            .and_then(|object| object.single_part())
    }

    /// Is there a free (non-attached) single-part object named `name`?
    pub fn has_normal_object(&self, name: &str) -> bool {
        self.normal_object(name).is_some()
    }

    /// The names of the free single-part objects.
    pub fn normal_object_names(&self) -> Vec<&str> {
        self.objects
            .values()
            .filter(|object| !object.is_attached() && !object.is_composite())
            .map(|object| object.name())
            .collect()
    }

    /// The parts of the composite object named `name`, in simulation order.
    pub fn composite_parts(&self, name: &str) -> Option<&[NormalObject]> {
        self.objects
            .get(name)
            .filter(|object| object.is_composite())
            .map(|object| object.parts())
    }

    /// Adds a single-part object to this world.
    pub fn add_normal_object(
        &mut self,
        name: impl Into<String>,
        object: CollisionObject,
    ) -> Result<(), WorldError> {
        self.insert_object(SceneObject::single(name, object))
    }

    /// Removes the object named `name`, attached or not.
    ///
    /// Returns `false` if there is no such object.
    pub fn remove_normal_object(&mut self, name: &str) -> bool {
        match self.objects.shift_remove(name) {
            Some(object) => {
                if object.is_attached() {
                    self.remove_attachment_entries(name);
                }
                true
            }
            None => false,
        }
    }

    fn remove_attachment_entries(&mut self, name: &str) {
        if let Some(model) = &mut self.articulation {
            model.allowed_collision_matrix_mut().remove_all_entries_of(name);
        }
    }

    /// Attaches the object named `name` to the link `link_id` of the articulation.
    ///
    /// `pose` is the pose of the object in the link frame. The object may touch the link
    /// and each of `touch_links` without being reported as colliding. Attaching an object
    /// again replaces its previous attachment.
    pub fn attach_object(
        &mut self,
        name: &str,
        link_id: usize,
        pose: Isometry<Real>,
        touch_links: Vec<String>,
    ) -> Result<(), WorldError> {
        let model = self
            .articulation
            .as_mut()
            .ok_or(WorldError::NoArticulation)?;
        let link_pose = model
            .link_pose(link_id)
            .ok_or(WorldError::UnknownLink(link_id))?;
        let link_name = model
            .link_names()
            .get(link_id)
            .cloned()
            .ok_or(WorldError::UnknownLink(link_id))?;
        let object = self
            .objects
            .get_mut(name)
            .ok_or_else(|| WorldError::UnknownObject(name.to_string()))?;

        if object.is_composite() {
            return Err(WorldError::AttachComposite(name.to_string()));
        }

        let acm = model.allowed_collision_matrix_mut();
        if object.is_attached() {
            acm.remove_all_entries_of(name);
        }
        acm.set_entry(&link_name, name, true);
        acm.set_entries(name, &touch_links, true);

        object.set_attachment(Some(Attachment {
            link_id,
            link_name,
            pose,
            touch_links,
        }));
        object.follow_link(&link_pose);

        log::debug!("attached '{name}' to link {link_id}");
        Ok(())
    }

    /// Attaches the object named `name` to the link `link_id`, keeping its current world pose.
    pub fn attach_object_in_place(
        &mut self,
        name: &str,
        link_id: usize,
        touch_links: Vec<String>,
    ) -> Result<(), WorldError> {
        let link_pose = self
            .articulation
            .as_ref()
            .ok_or(WorldError::NoArticulation)?
            .link_pose(link_id)
            .ok_or(WorldError::UnknownLink(link_id))?;
        let world_pose = *self
            .objects
            .get(name)
            .and_then(|object| object.parts().first())
            .ok_or_else(|| WorldError::UnknownObject(name.to_string()))?
            .pose();

        self.attach_object(name, link_id, link_pose.inverse() * world_pose, touch_links)
    }

    /// Detaches the object named `name`, leaving it at its current world pose.
    ///
    /// If `also_remove` is set, the object is removed from the world as well. Returns
    /// `false` if the object was not attached.
    pub fn detach_object(&mut self, name: &str, also_remove: bool) -> bool {
        let Some(object) = self.objects.get_mut(name) else {
            return false;
        };

        if !object.is_attached() {
            return false;
        }

        object.set_attachment(None);
        self.remove_attachment_entries(name);

        if also_remove {
            let _ = self.objects.shift_remove(name);
        }

        log::debug!("detached '{name}'");
        true
    }

    /// Is the object named `name` attached to the articulation?
    pub fn is_normal_object_attached(&self, name: &str) -> bool {
        self.objects
            .get(name)
            .is_some_and(|object| object.is_attached())
    }

    /// The attached object named `name`.
    pub fn attached_object(&self, name: &str) -> Option<AttachedObject<'_>> {
        self.objects.get(name).and_then(Self::attached_view)
    }

    /// Every attached object.
    pub fn attached_objects(&self) -> impl Iterator<Item = AttachedObject<'_>> {
        self.objects.values().filter_map(Self::attached_view)
    }

    fn attached_view(object: &SceneObject) -> Option<AttachedObject<'_>> {
        Some(AttachedObject {
            part: object.single_part()?,
            attachment: object.attachment()?,
        })
    }

    /// The diagnostics raised so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Removes and returns the diagnostics raised so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

/// The only rigid component of an entity, which must not be an articulation link.
pub(crate) fn rigid_component_of(entity: &SimEntity) -> Result<&RigidComponent, WorldError> {
    let component = match entity.components.as_slice() {
        [] => return Err(WorldError::MissingRigidComponent(entity.name.clone())),
        [component] => component,
        components => {
            return Err(WorldError::MultipleRigidComponents {
                name: entity.name.clone(),
                count: components.len(),
            })
        }
    };

    if component.kind == RigidComponentKind::ArticulationLink {
        return Err(WorldError::LinkComponentOnEntity(entity.name.clone()));
    }

    Ok(component)
}
