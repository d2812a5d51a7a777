use crate::articulation::KinematicDescription;
use parry::utils::SortedPair;
use std::collections::HashMap;

/// Whether two objects may overlap without being reported as colliding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum AllowedCollision {
    /// Collisions are always reported.
    Never,
    /// Collisions are never reported.
    Always,
}

/// Symmetric table of object pairs allowed to overlap.
///
/// An explicit pair entry takes precedence over the per-name default entries.
#[derive(Clone, Debug, Default)]
pub struct AllowedCollisionMatrix {
    entries: HashMap<SortedPair<String>, AllowedCollision>,
    default_entries: HashMap<String, AllowedCollision>,
}

impl AllowedCollisionMatrix {
    /// An empty matrix: every collision is reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows collisions between directly connected links and between each pair of
    /// `disabled_pairs`.
    pub fn from_description(
        description: &KinematicDescription,
        disabled_pairs: &[(String, String)],
    ) -> Self {
        let mut acm = Self::new();
        for (parent, child) in description.adjacent_link_pairs() {
            acm.set_entry(parent, child, true);
        }
        for (a, b) in disabled_pairs {
            acm.set_entry(a, b, true);
        }
        acm
    }

    fn key(name1: &str, name2: &str) -> SortedPair<String> {
        SortedPair::new(name1.to_string(), name2.to_string())
    }

    /// The explicit entry between `name1` and `name2`.
    pub fn entry(&self, name1: &str, name2: &str) -> Option<AllowedCollision> {
        self.entries.get(&Self::key(name1, name2)).copied()
    }

    /// Is there an explicit entry between `name1` and `name2`?
    pub fn has_entry(&self, name1: &str, name2: &str) -> bool {
        self.entries.contains_key(&Self::key(name1, name2))
    }

    /// Sets the entry between `name1` and `name2`.
    pub fn set_entry(&mut self, name1: &str, name2: &str, allowed: bool) {
        let _ = self
            .entries
            .insert(Self::key(name1, name2), Self::allowed_collision(allowed));
    }

    /// Sets the entries between `name` and each of `others`.
    pub fn set_entries(&mut self, name: &str, others: &[String], allowed: bool) {
        for other in others {
            self.set_entry(name, other, allowed);
        }
    }

    /// Removes the entry between `name1` and `name2`.
    pub fn remove_entry(&mut self, name1: &str, name2: &str) {
        let _ = self.entries.remove(&Self::key(name1, name2));
    }

    /// Removes every entry involving `name`, default entry included.
    pub fn remove_all_entries_of(&mut self, name: &str) {
        self.entries.retain(|pair, _| pair.0 != name && pair.1 != name);
        let _ = self.default_entries.remove(name);
    }

    /// The default entry of `name`.
    pub fn default_entry(&self, name: &str) -> Option<AllowedCollision> {
        self.default_entries.get(name).copied()
    }

    /// Sets the default entry of `name`, used when no explicit pair entry exists.
    pub fn set_default_entry(&mut self, name: &str, allowed: bool) {
        let _ = self
            .default_entries
            .insert(name.to_string(), Self::allowed_collision(allowed));
    }

    /// Removes the default entry of `name`.
    pub fn remove_default_entry(&mut self, name: &str) {
        let _ = self.default_entries.remove(name);
    }

    /// May `name1` and `name2` overlap without being reported?
    pub fn is_allowed(&self, name1: &str, name2: &str) -> bool {
        if let Some(entry) = self.entry(name1, name2) {
            return entry == AllowedCollision::Always;
        }

        self.default_entry(name1) == Some(AllowedCollision::Always)
            || self.default_entry(name2) == Some(AllowedCollision::Always)
    }

    /// The number of explicit pair entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Does this matrix have no explicit pair entry?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn allowed_collision(allowed: bool) -> AllowedCollision {
        if allowed {
            AllowedCollision::Always
        } else {
            AllowedCollision::Never
        }
    }
}
