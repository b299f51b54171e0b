use std::path::Path;

use crate::error::AssetError;
use crate::mesh::{MeshData, Vertex};
use crate::texture::TextureData;

/// One drawable piece of a model with its diffuse texture, if it has one.
#[derive(Debug, Clone)]
pub struct ModelMesh {
    pub name: String,
    pub mesh: MeshData,
    pub diffuse: Option<TextureData>,
}

/// A loaded model: a flat list of meshes in document order.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub meshes: Vec<ModelMesh>,
}

impl ModelData {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.vertices.len()).sum()
    }
}

/// Load a glTF/GLB model.
///
/// Every primitive becomes one [`ModelMesh`]. Missing normals default to +Y,
/// missing texture coordinates to zero, and missing indices are generated.
/// Node transforms are not applied; the scene places the model as a whole.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelData, AssetError> {
    let path = path.as_ref();
    let (document, buffers, images) = gltf::import(path).map_err(|source| AssetError::Model {
        path: path.to_path_buf(),
        source,
    })?;

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let name = mesh.name().unwrap_or("unnamed").to_string();

        for (i, primitive) in mesh.primitives().enumerate() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| AssetError::MissingPositions(name.clone()))?
                .collect();
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|n| n.collect())
                .unwrap_or_default();
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|t| t.into_f32().collect())
                .unwrap_or_default();

            let vertices: Vec<Vertex> = positions
                .iter()
                .enumerate()
                .map(|(v, position)| Vertex {
                    position: *position,
                    normal: normals.get(v).copied().unwrap_or([0.0, 1.0, 0.0]),
                    uv: uvs.get(v).copied().unwrap_or([0.0, 0.0]),
                })
                .collect();

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..vertices.len() as u32).collect(),
            };

            let diffuse = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_texture()
                .and_then(|info| images.get(info.texture().source().index()))
                .and_then(convert_image);

            push_part(
                &mut meshes,
                ModelMesh {
                    name: format!("{name}_{i}"),
                    mesh: MeshData { vertices, indices },
                    diffuse,
                },
            );
        }
    }

    if meshes.is_empty() {
        return Err(AssetError::NoMeshes(path.to_path_buf()));
    }

    let model = ModelData { meshes };
    tracing::info!(
        path = %path.display(),
        meshes = model.meshes.len(),
        vertices = model.vertex_count(),
        "model loaded"
    );
    Ok(model)
}

/// Keep a part only if it has at least one triangle.
fn push_part(meshes: &mut Vec<ModelMesh>, part: ModelMesh) {
    if part.mesh.is_empty() {
        tracing::warn!(mesh = %part.name, "model part has no triangles, skipping");
        return;
    }
    meshes.push(part);
}

/// Convert an embedded 8-bit image to RGBA8. Other pixel formats are skipped.
fn convert_image(data: &gltf::image::Data) -> Option<TextureData> {
    use gltf::image::Format;

    let rgba: Vec<u8> = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        Format::R8G8 => data
            .pixels
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        Format::R8 => data.pixels.iter().flat_map(|&p| [p, p, p, 255]).collect(),
        other => {
            tracing::warn!(format = ?other, "unsupported model texture format, skipping");
            return None;
        }
    };
    TextureData::from_rgba8(data.width, data.height, rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    // one triangle, positions only
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{
            "name": "leaf",
            "primitives": [{ "attributes": { "POSITION": 0 } }]
        }],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        }],
        "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }]
    }"#;

    #[test]
    fn load_minimal_gltf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.gltf");
        std::fs::write(&path, TRIANGLE_GLTF).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.meshes.len(), 1);
        let leaf = &model.meshes[0];
        assert_eq!(leaf.name, "leaf_0");
        assert_eq!(leaf.mesh.indices, vec![0, 1, 2]);
        assert_eq!(leaf.mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(leaf.mesh.vertices[2].normal, [0.0, 1.0, 0.0]);
        assert!(leaf.diffuse.is_none());
        assert_eq!(model.vertex_count(), 3);
    }

    #[test]
    fn missing_model_is_an_error() {
        let err = load_model("objects/Nope/Nope.glb").unwrap_err();
        assert!(matches!(err, AssetError::Model { .. }));
        assert!(err.to_string().contains("Nope.glb"));
    }

    #[test]
    fn model_without_meshes_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gltf");
        std::fs::write(&path, r#"{ "asset": { "version": "2.0" } }"#).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, AssetError::NoMeshes(_)));
    }

    #[test]
    fn parts_without_triangles_are_skipped() {
        let mut meshes = Vec::new();
        let vertex = Vertex::from_interleaved([0.0; 8]);
        push_part(
            &mut meshes,
            ModelMesh {
                name: "bare_0".into(),
                mesh: MeshData {
                    vertices: vec![vertex; 3],
                    indices: Vec::new(),
                },
                diffuse: None,
            },
        );
        assert!(meshes.is_empty());

        push_part(
            &mut meshes,
            ModelMesh {
                name: "leaf_0".into(),
                mesh: MeshData::from_triangles(vec![vertex; 3]),
                diffuse: None,
            },
        );
        assert_eq!(meshes.len(), 1);
    }

    #[test]
    fn rgb_image_gains_alpha() {
        let data = gltf::image::Data {
            pixels: vec![1, 2, 3, 4, 5, 6],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };
        let tex = convert_image(&data).unwrap();
        assert_eq!(tex.rgba, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }
}
