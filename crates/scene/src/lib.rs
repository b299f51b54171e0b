//! Scene driver for the arbor room.
//!
//! Each frame the driver reads the clock, forwards input actions to the
//! camera, and derives lights and transforms from elapsed time and camera
//! state. Nothing here talks to a GPU; see the `arbor-render-wgpu` crate.
//!
//! # Invariants
//! - Lights are recomputed from scratch every frame.
//! - The room layout is a static list of draw records, iterated in order.
//! - Renderers read a [`FrameView`] and never mutate the walkthrough.

mod clock;
mod layout;
mod lighting;
mod renderer;
mod walkthrough;

pub use clock::{FrameClock, FrameTime};
pub use layout::{DrawItem, MeshKind, TREE_MODEL_PATH, TextureSlot, Transform, room};
pub use lighting::{DirLight, SpotLight, day_night};
pub use renderer::{DebugTextRenderer, SceneRenderer};
pub use walkthrough::{FrameView, MATERIAL_SHININESS, Walkthrough};
