use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position, normal, texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Build from the `[x, y, z, nx, ny, nz, u, v]` layout used by the built-in quads.
    pub fn from_interleaved(v: [f32; 8]) -> Self {
        Self {
            position: [v[0], v[1], v[2]],
            normal: [v[3], v[4], v[5]],
            uv: [v[6], v[7]],
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Non-indexed triangle list; indices are generated in order.
    pub fn from_triangles(vertices: Vec<Vertex>) -> Self {
        let indices = (0..vertices.len() as u32).collect();
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is not a single whole triangle to draw.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}
