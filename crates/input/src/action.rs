use arbor_camera::{Gait, Movement};

/// Logical input a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Held to run, released to walk.
    Run,
    Flashlight,
    Hud,
    Quit,
}

impl Binding {
    /// Movement this binding requests while held, if any.
    pub fn movement(self) -> Option<Movement> {
        match self {
            Binding::MoveForward => Some(Movement::Forward),
            Binding::MoveBackward => Some(Movement::Backward),
            Binding::StrafeLeft => Some(Movement::Left),
            Binding::StrafeRight => Some(Movement::Right),
            _ => None,
        }
    }
}

/// A high-level request produced by input and consumed by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Step the camera in a direction for this frame.
    Move(Movement),
    /// Pointer delta, `dy` positive upwards.
    Look { dx: f32, dy: f32 },
    SetGait(Gait),
    ToggleFlashlight,
    /// Show or hide the on-screen overlay. Only the desktop app reacts to it.
    ToggleHud,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_bindings_map_to_directions() {
        assert_eq!(Binding::MoveForward.movement(), Some(Movement::Forward));
        assert_eq!(Binding::MoveBackward.movement(), Some(Movement::Backward));
        assert_eq!(Binding::StrafeLeft.movement(), Some(Movement::Left));
        assert_eq!(Binding::StrafeRight.movement(), Some(Movement::Right));
    }

    #[test]
    fn other_bindings_do_not_move() {
        for b in [
            Binding::Run,
            Binding::Flashlight,
            Binding::Hud,
            Binding::Quit,
        ] {
            assert!(b.movement().is_none());
        }
    }
}
