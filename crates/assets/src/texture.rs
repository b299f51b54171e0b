use std::path::Path;

use crate::error::AssetError;

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// 1x1 magenta, shown where a texture failed to load.
    pub fn fallback() -> Self {
        Self::solid([255, 0, 255, 255])
    }

    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }
}

/// Decode an image file (png or jpeg) to RGBA8.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData, AssetError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| AssetError::Texture {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(path = %path.display(), width, height, "texture loaded");
    Ok(TextureData {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Like [`load_texture`], but a failure is logged and replaced with
/// [`TextureData::fallback`] so the caller can carry on.
pub fn load_texture_or_fallback(path: impl AsRef<Path>) -> TextureData {
    let path = path.as_ref();
    match load_texture(path) {
        Ok(texture) => texture,
        Err(e) => {
            tracing::warn!("texture failed to load at path {}: {e}", path.display());
            TextureData::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();

        let tex = load_texture(&path).unwrap();
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(tex.rgba.len(), 3 * 2 * 4);
        assert_eq!(&tex.rgba[..4], &[10, 20, 30, 128]);
    }

    #[test]
    fn rgb_is_expanded_to_opaque_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor.png");
        RgbImage::from_pixel(1, 1, Rgb([1, 2, 3])).save(&path).unwrap();

        let tex = load_texture(&path).unwrap();
        assert_eq!(tex.rgba, vec![1, 2, 3, 255]);
    }

    #[test]
    fn missing_file_is_an_error_naming_the_path() {
        let err = load_texture("does/not/exist.jpeg").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.jpeg"));
    }

    #[test]
    fn garbage_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let tex = load_texture_or_fallback(&path);
        assert_eq!(tex, TextureData::fallback());
    }

    #[test]
    fn from_rgba8_checks_length() {
        assert!(TextureData::from_rgba8(2, 2, vec![0; 16]).is_some());
        assert!(TextureData::from_rgba8(2, 2, vec![0; 15]).is_none());
    }
}
