//! Assets for the arbor room: textures, the tree model, and the built-in quads.
//!
//! The renderer consumes decoded CPU-side data from here; nothing in this
//! crate touches the GPU.
//!
//! # Failure policy
//! A texture that fails to decode is replaced by a fallback and the run
//! continues. A model that fails to load is an error for the caller.

mod error;
mod mesh;
mod model;
pub mod primitives;
mod texture;

pub use error::AssetError;
pub use mesh::{MeshData, Vertex};
pub use model::{ModelData, ModelMesh, load_model};
pub use texture::{TextureData, load_texture, load_texture_or_fallback};
