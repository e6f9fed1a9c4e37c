//! Pick-and-highlight state machine
//!
//! At most one actor is highlighted at a time. Its full pre-highlight
//! [`Material`] is kept by value and written back when the highlight moves to
//! another actor or the user clicks on empty space.

use crate::gfx::{
    material::{colors, Material},
    picking::AssemblyPath,
    scene::{ActorId, Scene},
};

/// The look applied to a picked actor: red, fully diffuse, no specular,
/// edges visible. Everything else is kept from `original`.
pub fn highlight_material(original: &Material) -> Material {
    let mut material = *original;
    material.set_color(colors::RED);
    material.set_diffuse(1.0);
    material.set_specular(0.0);
    material.set_edge_visibility(true);
    material
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Highlighted {
        actor: ActorId,
        /// The actor's material before it was highlighted
        saved: Material,
    },
}

/// What a pick did to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightChange {
    Unchanged,
    Highlighted(ActorId),
    Restored(ActorId),
    Moved { from: ActorId, to: ActorId },
}

impl HighlightChange {
    /// Whether any actor's material changed
    pub fn is_visible(self) -> bool {
        self != HighlightChange::Unchanged
    }
}

#[derive(Debug, Default)]
pub struct HighlightController {
    state: HighlightState,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    /// The actor currently highlighted, if any
    pub fn highlighted(&self) -> Option<ActorId> {
        match self.state {
            HighlightState::Idle => None,
            HighlightState::Highlighted { actor, .. } => Some(actor),
        }
    }

    /// Applies the result of one pick. The tracked entity is the terminal
    /// node of `path`; `None` is a miss.
    pub fn on_pick(&mut self, path: Option<&AssemblyPath>, scene: &mut Scene) -> HighlightChange {
        let picked = path.and_then(AssemblyPath::actor);

        if picked.is_some() && picked == self.highlighted() {
            return HighlightChange::Unchanged;
        }

        let restored = self.restore(scene);

        let Some(target) = picked else {
            return match restored {
                Some(actor) => {
                    log::debug!("restored {:?} after a miss", actor);
                    HighlightChange::Restored(actor)
                }
                None => HighlightChange::Unchanged,
            };
        };

        let Some(actor) = scene.actor_mut(target) else {
            log::warn!("picked {:?} is not in the scene; nothing to highlight", target);
            return restored.map_or(HighlightChange::Unchanged, HighlightChange::Restored);
        };

        let saved = actor.material;
        actor.material = highlight_material(&saved);
        log::debug!("highlighted {} ({:?})", actor.name, target);
        self.state = HighlightState::Highlighted {
            actor: target,
            saved,
        };

        match restored {
            Some(from) => HighlightChange::Moved { from, to: target },
            None => HighlightChange::Highlighted(target),
        }
    }

    /// Restores the highlighted actor, if any, and goes idle
    pub fn clear(&mut self, scene: &mut Scene) -> HighlightChange {
        match self.restore(scene) {
            Some(actor) => {
                log::debug!("cleared highlight on {:?}", actor);
                HighlightChange::Restored(actor)
            }
            None => HighlightChange::Unchanged,
        }
    }

    /// Writes the snapshot back and returns the actor it belonged to
    fn restore(&mut self, scene: &mut Scene) -> Option<ActorId> {
        let HighlightState::Highlighted { actor, saved } = std::mem::take(&mut self.state) else {
            return None;
        };

        match scene.actor_mut(actor) {
            Some(target) => {
                target.material = saved;
                Some(actor)
            }
            None => {
                log::warn!("highlighted {:?} vanished from the scene; nothing to restore", actor);
                None
            }
        }
    }
}
