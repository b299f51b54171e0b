use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Model file for the tree, relative to the asset root.
pub const TREE_MODEL_PATH: &str = "objects/Tree/Tree.glb";

const WALL_DISTANCE: f32 = 75.0;
const WALL_HEIGHT: f32 = 15.0;

/// Spatial transform: translation, rotation, scale (applied scale first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Geometry a draw record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeshKind {
    Floor,
    Sky,
    Wall,
    Note,
    /// The imported tree model; it brings its own textures.
    Tree,
}

/// Texture a draw record samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureSlot {
    Floor,
    Sky,
    Wall,
    NoteIts,
    NoteNot,
    NoteReal,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 6] = [
        TextureSlot::Floor,
        TextureSlot::Sky,
        TextureSlot::Wall,
        TextureSlot::NoteIts,
        TextureSlot::NoteNot,
        TextureSlot::NoteReal,
    ];

    /// Image file relative to the asset root.
    pub fn relative_path(self) -> &'static str {
        match self {
            TextureSlot::Floor => "textures/floor.jpeg",
            TextureSlot::Sky => "textures/cloud.jpeg",
            TextureSlot::Wall => "textures/mountain.jpeg",
            TextureSlot::NoteIts => "textures/its3.png",
            TextureSlot::NoteNot => "textures/not3.png",
            TextureSlot::NoteReal => "textures/real3.png",
        }
    }
}

/// One entry of the draw list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub name: &'static str,
    pub mesh: MeshKind,
    /// `None` for meshes that carry their own materials.
    pub texture: Option<TextureSlot>,
    pub transform: Transform,
}

fn wall(name: &'static str, position: Vec3, rotation: Quat) -> DrawItem {
    DrawItem {
        name,
        mesh: MeshKind::Wall,
        texture: Some(TextureSlot::Wall),
        transform: Transform {
            position,
            rotation,
            scale: Vec3::splat(WALL_DISTANCE),
        },
    }
}

fn note(name: &'static str, texture: TextureSlot, position: Vec3) -> DrawItem {
    DrawItem {
        name,
        mesh: MeshKind::Note,
        texture: Some(texture),
        transform: Transform {
            position,
            ..Transform::default()
        },
    }
}

/// The room, in draw order: floor, sky, four walls, three notes, the tree.
pub fn room() -> Vec<DrawItem> {
    let half_turn_zx = Quat::from_rotation_z(PI) * Quat::from_rotation_x(PI);

    vec![
        DrawItem {
            name: "floor",
            mesh: MeshKind::Floor,
            texture: Some(TextureSlot::Floor),
            transform: Transform {
                scale: Vec3::splat(15.0),
                ..Transform::default()
            },
        },
        DrawItem {
            name: "sky",
            mesh: MeshKind::Sky,
            texture: Some(TextureSlot::Sky),
            transform: Transform {
                position: Vec3::new(0.0, 35.0, 0.0),
                scale: Vec3::splat(15.0),
                ..Transform::default()
            },
        },
        wall(
            "front wall",
            Vec3::new(0.0, WALL_HEIGHT, -WALL_DISTANCE),
            Quat::IDENTITY,
        ),
        wall(
            "back wall",
            Vec3::new(0.0, WALL_HEIGHT, WALL_DISTANCE),
            half_turn_zx,
        ),
        wall(
            "right wall",
            Vec3::new(WALL_DISTANCE, WALL_HEIGHT, 0.0),
            Quat::from_rotation_y(FRAC_PI_2),
        ),
        wall(
            "left wall",
            Vec3::new(-WALL_DISTANCE, WALL_HEIGHT, 0.0),
            Quat::from_rotation_y(FRAC_PI_2) * half_turn_zx,
        ),
        note("note its", TextureSlot::NoteIts, Vec3::new(-0.3, 1.5, 0.65)),
        note("note not", TextureSlot::NoteNot, Vec3::new(-0.3, 1.5, -2.3)),
        note("note real", TextureSlot::NoteReal, Vec3::new(0.5, 1.5, -0.6)),
        DrawItem {
            name: "tree",
            mesh: MeshKind::Tree,
            texture: None,
            transform: Transform {
                position: Vec3::new(0.0, -3.2, 0.0),
                scale: Vec3::splat(4.5),
                ..Transform::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn find(name: &str) -> DrawItem {
        room().into_iter().find(|i| i.name == name).unwrap()
    }

    #[test]
    fn transform_default_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn room_draw_order() {
        let meshes: Vec<MeshKind> = room().iter().map(|i| i.mesh).collect();
        assert_eq!(
            meshes,
            vec![
                MeshKind::Floor,
                MeshKind::Sky,
                MeshKind::Wall,
                MeshKind::Wall,
                MeshKind::Wall,
                MeshKind::Wall,
                MeshKind::Note,
                MeshKind::Note,
                MeshKind::Note,
                MeshKind::Tree,
            ]
        );
    }

    #[test]
    fn only_tree_has_no_texture() {
        for item in room() {
            assert_eq!(item.texture.is_none(), item.mesh == MeshKind::Tree);
        }
    }

    #[test]
    fn walls_align_with_room_axes() {
        // wall quads face -Z in model space
        for name in ["front wall", "back wall", "right wall", "left wall"] {
            let item = find(name);
            let m = item.transform.matrix();
            let normal = m.transform_vector3(Vec3::NEG_Z).normalize();
            let to_center = (-item.transform.position * Vec3::new(1.0, 0.0, 1.0)).normalize();
            let facing = normal.dot(to_center);
            assert!(facing.abs() > 1.0 - EPS, "{name} normal {normal}");
        }
    }

    #[test]
    fn walls_sit_on_the_boundary() {
        let back = find("back wall").transform.matrix();
        let center = back.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(0.0, 15.0, 75.0)).length() < EPS);
        // the half-turns about z then x keep the quad upright
        let top = back.transform_point3(Vec3::new(0.0, 0.25, 0.0));
        assert!(top.y > center.y);
    }

    #[test]
    fn tree_is_sunk_and_scaled() {
        let tree = find("tree");
        let m = tree.transform.matrix();
        let p = m.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!((p - Vec3::new(0.0, 4.5 - 3.2, 0.0)).length() < EPS);
    }

    #[test]
    fn texture_paths_are_distinct() {
        let mut paths: Vec<&str> = TextureSlot::ALL.iter().map(|s| s.relative_path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), TextureSlot::ALL.len());
    }
}
