//! Agent id lookup.
//!
//! Scene snapshots refer to agents by string id (for example in a camera's
//! visible-node list). [`AgentIndex`] maps those ids to the entities spawned
//! for the current snapshot. It is rebuilt every time a snapshot is spawned.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default, Resource)]
pub struct AgentIndex {
    pub entities: FxHashMap<String, Entity>,
}

impl AgentIndex {
    /// Register an agent. Returns the previous entity if the id was taken.
    pub fn insert(&mut self, id: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.entities.insert(id.into(), entity)
    }

    pub fn get(&self, id: &str) -> Option<Entity> {
        self.entities.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
