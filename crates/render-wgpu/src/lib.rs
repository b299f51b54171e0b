//! wgpu render backend for the arbor room.
//!
//! Draws the room's draw list with one textured, lit pipeline. The sun and
//! the flashlight are evaluated per fragment.
//!
//! # Invariants
//! - Renderer never mutates the walkthrough; it reads a `FrameView`.
//! - Per-object transforms are static and uploaded once.

mod gpu;
mod scene_assets;
mod shaders;

pub use gpu::WgpuRenderer;
pub use scene_assets::SceneAssets;
