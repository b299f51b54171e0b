//! Input mapping: held keys and pointer motion become per-frame actions.
//!
//! # Invariants
//! - Consumers see [`Action`]s only, never window-system key codes.
//! - Edge actions (gait, flashlight, HUD) fire once per press, not per frame.

pub mod action;
pub mod state;

pub use action::{Action, Binding};
pub use state::InputState;
