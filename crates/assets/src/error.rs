use std::path::PathBuf;

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load model '{path}': {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },
    #[error("model '{0}' contains no meshes")]
    NoMeshes(PathBuf),
    #[error("mesh '{0}' has no position data")]
    MissingPositions(String),
}
