//! Built-in quads for the room: floor, sky, walls and note sprites.
//!
//! Each is two triangles in `[x, y, z, nx, ny, nz, u, v]` layout. Texture
//! coordinates above 1 tile with a repeating sampler.

use crate::mesh::{MeshData, Vertex};

#[rustfmt::skip]
const FLOOR: [[f32; 8]; 6] = [
    [ 5.0, -0.2,  5.0,  0.0, 1.0, 0.0,  20.0,  0.0],
    [-5.0, -0.2,  5.0,  0.0, 1.0, 0.0,   0.0,  0.0],
    [-5.0, -0.2, -5.0,  0.0, 1.0, 0.0,   0.0, 20.0],

    [ 5.0, -0.2,  5.0,  0.0, 1.0, 0.0,  20.0,  0.0],
    [-5.0, -0.2, -5.0,  0.0, 1.0, 0.0,   0.0, 20.0],
    [ 5.0, -0.2, -5.0,  0.0, 1.0, 0.0,  20.0, 20.0],
];

#[rustfmt::skip]
const SKY: [[f32; 8]; 6] = [
    [ 5.0, -0.2,  5.0,  0.0, 1.0, 0.0,  5.0, 0.0],
    [-5.0, -0.2,  5.0,  0.0, 1.0, 0.0,  0.0, 0.0],
    [-5.0, -0.2, -5.0,  0.0, 1.0, 0.0,  0.0, 5.0],

    [ 5.0, -0.2,  5.0,  0.0, 1.0, 0.0,  5.0, 0.0],
    [-5.0, -0.2, -5.0,  0.0, 1.0, 0.0,  0.0, 5.0],
    [ 5.0, -0.2, -5.0,  0.0, 1.0, 0.0,  5.0, 5.0],
];

#[rustfmt::skip]
const WALL: [[f32; 8]; 6] = [
    [ 1.0,  0.25, 0.0,  0.0, 0.0, -1.0,  1.0, 0.0],
    [-1.0,  0.25, 0.0,  0.0, 0.0, -1.0,  0.0, 0.0],
    [-1.0, -0.25, 0.0,  0.0, 0.0, -1.0,  0.0, 1.0],

    [ 1.0,  0.25, 0.0,  0.0, 0.0, -1.0,  1.0, 0.0],
    [-1.0, -0.25, 0.0,  0.0, 0.0, -1.0,  0.0, 1.0],
    [ 1.0, -0.25, 0.0,  0.0, 0.0, -1.0,  1.0, 1.0],
];

// V is flipped: the note images are stored top row first.
#[rustfmt::skip]
const NOTE: [[f32; 8]; 6] = [
    [0.0,  0.5, 0.0,  0.0, 1.0, -1.0,  0.0, 0.0],
    [0.0, -0.5, 0.0,  0.0, 1.0, -1.0,  0.0, 1.0],
    [1.0, -0.5, 0.0,  0.0, 1.0, -1.0,  1.0, 1.0],

    [0.0,  0.5, 0.0,  0.0, 1.0, -1.0,  0.0, 0.0],
    [1.0, -0.5, 0.0,  0.0, 1.0, -1.0,  1.0, 1.0],
    [1.0,  0.5, 0.0,  0.0, 1.0, -1.0,  1.0, 0.0],
];

fn quad(data: &[[f32; 8]; 6]) -> MeshData {
    MeshData::from_triangles(data.iter().copied().map(Vertex::from_interleaved).collect())
}

/// Ground plane, texture tiled 20 times.
pub fn floor_plane() -> MeshData {
    quad(&FLOOR)
}

/// Ceiling plane, texture tiled 5 times.
pub fn sky_plane() -> MeshData {
    quad(&SKY)
}

pub fn wall_quad() -> MeshData {
    quad(&WALL)
}

pub fn note_quad() -> MeshData {
    quad(&NOTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_are_two_triangles() {
        for mesh in [floor_plane(), sky_plane(), wall_quad(), note_quad()] {
            assert_eq!(mesh.vertices.len(), 6);
            assert_eq!(mesh.triangle_count(), 2);
        }
    }

    #[test]
    fn floor_tiles_more_than_sky() {
        let max_uv = |m: &MeshData| {
            m.vertices
                .iter()
                .map(|v| v.uv[0].max(v.uv[1]))
                .fold(0.0_f32, f32::max)
        };
        assert_eq!(max_uv(&floor_plane()), 20.0);
        assert_eq!(max_uv(&sky_plane()), 5.0);
    }

    #[test]
    fn wall_is_flat_in_z() {
        assert!(wall_quad().vertices.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn note_top_samples_first_row() {
        let note = note_quad();
        for v in &note.vertices {
            let expected_v = if v.position[1] > 0.0 { 0.0 } else { 1.0 };
            assert_eq!(v.uv[1], expected_v);
        }
    }
}
