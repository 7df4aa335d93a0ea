//! Target role.
//!
//! A [`Target`] is an agent whose coverage is tracked. The flag can be
//! switched off without removing the component; an inactive target is treated
//! exactly like an agent with no target role at all.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    pub active: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self { active: true }
    }
}

impl Target {
    pub fn new(active: bool) -> Self {
        Self { active }
    }
}

/// `true` when the optional target component is present and active.
pub fn is_active_target(target: Option<&Target>) -> bool {
    target.is_some_and(|t| t.active)
}
