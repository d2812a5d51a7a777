use crate::articulation::KinematicsError;
use crate::conversion::shape_world_pose;
use crate::diagnostics::DiagnosticKind;
use crate::math::{Isometry, Real};
use crate::sim::{SimShapeKind, SimulationScene};
use crate::world::planning_world::rigid_component_of;
use crate::world::{PlanningWorld, WorldError};
use smallvec::SmallVec;

/// The live state of one registered entity, read from the simulation.
struct EntityUpdate<'s> {
    name: &'s str,
    poses: SmallVec<[Isometry<Real>; 4]>,
}

/// Everything a refresh writes into the world, read before anything is modified.
struct RefreshPlan<'s> {
    qpos: Option<&'s [Real]>,
    entities: Vec<EntityUpdate<'s>>,
}

impl PlanningWorld {
    /// Pulls the current state of the simulation into this world.
    ///
    /// The articulation gets the simulation's joint configuration, and every entity's
    /// parts are moved to the entity's current pose. Attached objects always follow their
    /// link; if `update_attached_object` is set, their offset to the link is first re-read
    /// from the simulation, otherwise they keep the offset they were attached with.
    ///
    /// The whole scene is checked before the world is touched: on error, the world is
    /// left as it was. Refreshing twice without any change in the simulation gives
    /// identical poses.
    pub fn refresh_from_simulation<S: SimulationScene + ?Sized>(
        &mut self,
        scene: &S,
        update_attached_object: bool,
    ) -> Result<(), WorldError> {
        let plan = self.plan_refresh(scene)?;

        if let (Some(model), Some(qpos)) = (&mut self.articulation, plan.qpos) {
            model.set_qpos(qpos)?;
        }

        // Attached objects missing from the scene still follow their link.
        self.update_attached_objects();

        for update in &plan.entities {
            self.apply_entity_update(update, update_attached_object)?;
        }

        log::debug!(
            "planning world refreshed from {} entities",
            scene.actors().len()
        );
        Ok(())
    }

    fn plan_refresh<'s, S: SimulationScene + ?Sized>(
        &self,
        scene: &'s S,
    ) -> Result<RefreshPlan<'s>, WorldError> {
        let qpos = match &self.articulation {
            Some(model) => {
                let articulation = scene
                    .articulation(model.name())
                    .ok_or_else(|| WorldError::UnknownArticulation(model.name().to_string()))?;
                if articulation.qpos.len() != model.dof() {
                    return Err(KinematicsError::DimensionMismatch {
                        expected: model.dof(),
                        got: articulation.qpos.len(),
                    }
                    .into());
                }
                Some(articulation.qpos.as_slice())
            }
            None => None,
        };

        for object in self.objects.values() {
            if let Some(attachment) = object.attachment() {
                if self
                    .articulation
                    .as_ref()
                    .and_then(|model| model.link_pose(attachment.link_id))
                    .is_none()
                {
                    return Err(WorldError::UnknownLink(attachment.link_id));
                }
            }
        }

        let mut entities = vec![];
        for entity in scene.actors() {
            if !self.objects.contains_key(&entity.name) {
                if entity.name == self.options.ground_name {
                    continue;
                }
                return Err(WorldError::UnknownEntity(entity.name.clone()));
            }

            // Planes were dropped when the object was built: skip them to keep parts aligned.
            let poses = rigid_component_of(entity)?
                .collision_shapes
                .iter()
                .filter(|shape| !matches!(shape.kind, SimShapeKind::Plane))
                .map(|shape| shape_world_pose(&entity.pose, shape))
                .collect();

            entities.push(EntityUpdate {
                name: &entity.name,
                poses,
            });
        }

        Ok(RefreshPlan { qpos, entities })
    }

    fn apply_entity_update(
        &mut self,
        update: &EntityUpdate<'_>,
        update_attached_object: bool,
    ) -> Result<(), WorldError> {
        let Some(object) = self.objects.get_mut(update.name) else {
            return Err(WorldError::UnknownEntity(update.name.to_string()));
        };

        if object.track_shape_count(update.poses.len()) {
            self.diagnostics.warn(DiagnosticKind::ShapeCountMismatch {
                name: update.name.to_string(),
                expected: object.parts().len(),
                found: update.poses.len(),
            });
        }

        if let Some(attachment) = object.attachment_mut() {
            let link_id = attachment.link_id;
            let link_pose = self
                .articulation
                .as_ref()
                .and_then(|model| model.link_pose(link_id))
                .ok_or(WorldError::UnknownLink(link_id))?;

            if update_attached_object {
                if let Some(world_pose) = update.poses.first() {
                    attachment.pose = link_pose.inverse() * world_pose;
                }
            }

            object.follow_link(&link_pose);
        } else {
            // Positional: parts and live shapes are never re-matched.
            for (part, pose) in object.parts_mut().iter_mut().zip(&update.poses) {
                part.set_pose(*pose);
            }
        }

        Ok(())
    }
}
