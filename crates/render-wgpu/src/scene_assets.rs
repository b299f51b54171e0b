use arbor_assets::{AssetError, ModelData, TextureData, load_model, load_texture_or_fallback};
use arbor_scene::{TREE_MODEL_PATH, TextureSlot};
use std::collections::BTreeMap;
use std::path::Path;

/// CPU-side assets for the room, ready for upload.
#[derive(Debug, Clone, Default)]
pub struct SceneAssets {
    pub textures: BTreeMap<TextureSlot, TextureData>,
    pub tree: ModelData,
}

impl SceneAssets {
    /// Load every texture and the tree model from `root`.
    ///
    /// Missing or broken textures are replaced and logged; a missing tree
    /// model is an error.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, AssetError> {
        let root = root.as_ref();
        let textures = TextureSlot::ALL
            .iter()
            .map(|slot| (*slot, load_texture_or_fallback(root.join(slot.relative_path()))))
            .collect();
        let tree = load_model(root.join(TREE_MODEL_PATH))?;
        tracing::info!(root = %root.display(), "scene assets loaded");
        Ok(Self { textures, tree })
    }
}
