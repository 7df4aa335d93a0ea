//! Scene agent identity.
//!
//! The [`Agent`] component holds the identifier an agent has in the scene
//! snapshot. Camera visibility lists and reports refer to agents by this id.
//! Entities without it (observers, registered systems) survive scene reloads.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Agent {
    pub id: String,
}

impl Agent {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}
