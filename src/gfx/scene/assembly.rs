//! Grouping of actors that pick and highlight as parts of one prop

use crate::gfx::{picking::PickList, scene::ActorId};

#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub name: String,
    parts: Vec<ActorId>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub(crate) fn add_part(&mut self, actor: ActorId) {
        if !self.parts.contains(&actor) {
            self.parts.push(actor);
        }
    }

    /// Member actors in insertion order
    pub fn part_ids(&self) -> &[ActorId] {
        &self.parts
    }

    /// Member actors as a pick list
    pub fn parts(&self) -> PickList {
        self.parts.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
