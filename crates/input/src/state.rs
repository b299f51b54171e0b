use std::collections::BTreeSet;

use arbor_camera::{Gait, Movement};

use crate::action::{Action, Binding};

/// Held bindings, queued edge actions and accumulated pointer motion.
#[derive(Debug, Default)]
pub struct InputState {
    held: BTreeSet<Binding>,
    queued: Vec<Action>,
    pointer: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, binding: Binding) -> bool {
        self.held.contains(&binding)
    }

    pub fn press(&mut self, binding: Binding) {
        // key repeat arrives as further presses
        if !self.held.insert(binding) {
            return;
        }

        match binding {
            Binding::Run => self.queued.push(Action::SetGait(Gait::Running)),
            Binding::Flashlight => self.queued.push(Action::ToggleFlashlight),
            Binding::Hud => self.queued.push(Action::ToggleHud),
            _ => {}
        }
    }

    pub fn release(&mut self, binding: Binding) {
        if !self.held.remove(&binding) {
            return;
        }

        if binding == Binding::Run {
            self.queued.push(Action::SetGait(Gait::Walking));
        }
    }

    /// Raw pointer delta in screen space (y grows downwards).
    pub fn pointer_motion(&mut self, dx: f64, dy: f64) {
        self.pointer.0 += dx;
        self.pointer.1 += dy;
    }

    /// Drop every held binding and any pending pointer motion, e.g. when
    /// the window loses focus.
    pub fn release_all(&mut self) {
        let held: Vec<Binding> = self.held.iter().copied().collect();
        for binding in held {
            self.release(binding);
        }
        self.pointer = (0.0, 0.0);
    }

    /// Collect this frame's actions.
    ///
    /// Order: queued edge actions, look, quit, then one move per held
    /// direction in forward, backward, left, right order.
    pub fn drain_frame(&mut self) -> Vec<Action> {
        let mut actions = std::mem::take(&mut self.queued);

        let (dx, dy) = std::mem::take(&mut self.pointer);
        if dx != 0.0 || dy != 0.0 {
            actions.push(Action::Look {
                dx: dx as f32,
                dy: -dy as f32,
            });
        }

        if self.is_held(Binding::Quit) {
            actions.push(Action::Quit);
        }

        for movement in Movement::ALL {
            let held = self
                .held
                .iter()
                .any(|b| b.movement() == Some(movement));
            if held {
                actions.push(Action::Move(movement));
            }
        }

        if !actions.is_empty() {
            tracing::trace!(count = actions.len(), "drained frame actions");
        }
        actions
    }
}
