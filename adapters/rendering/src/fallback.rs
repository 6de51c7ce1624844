//! Flat-shaded stand-ins for the pre-rendered tile images.
//!
//! Backends fall back to these quads when no image manifest is available.
//! Geometry is expressed in unit canvas space, with `(0, 0)` at the top-left
//! corner and `(1, 1)` at the bottom-right, so the same quads scale to any
//! canvas.

use glam::Vec2;
use monster_maze_core::{Depth, FrameLayer, TileKey, TileSide};

use crate::Color;

const PERSPECTIVE_FALLOFF: f32 = 0.6;
const FOG_PER_DEPTH: f32 = 0.15;

const CEILING_COLOR: Color = Color::from_rgb_u8(0xd8, 0xd8, 0xe0);
const FLOOR_COLOR: Color = Color::from_rgb_u8(0x8c, 0x8c, 0x80);
const SIDE_WALL_COLOR: Color = Color::from_rgb_u8(0x3a, 0x4a, 0x5a);
const FACING_WALL_COLOR: Color = Color::from_rgb_u8(0x4f, 0x63, 0x78);

/// Convex quad filled with a single color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedQuad {
    /// Corners in winding order, expressed in unit canvas space.
    pub corners: [Vec2; 4],
    /// Fill color.
    pub color: Color,
}

impl ShadedQuad {
    /// Splits the quad into the two triangles used for drawing.
    #[must_use]
    pub fn triangles(&self) -> [[Vec2; 3]; 2] {
        let [a, b, c, d] = self.corners;
        [[a, b, c], [a, c, d]]
    }
}

/// Distance from the canvas edge to the outline of the corridor at the
/// provided number of cells from the viewer.
#[must_use]
pub fn corridor_inset(cells: u8) -> f32 {
    let cells = f32::from(cells);
    0.5 * (1.0 - 1.0 / (1.0 + PERSPECTIVE_FALLOFF * cells))
}

/// Quads that replace the image of the provided layer.
#[must_use]
pub fn layer_quads(layer: FrameLayer) -> Vec<ShadedQuad> {
    match layer {
        FrameLayer::Background => background_quads().to_vec(),
        FrameLayer::Tile(key) => vec![tile_quad(key)],
    }
}

/// Ceiling and floor halves drawn behind every wall.
#[must_use]
pub fn background_quads() -> [ShadedQuad; 2] {
    [
        ShadedQuad {
            corners: [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 0.5),
                Vec2::new(0.0, 0.5),
            ],
            color: CEILING_COLOR,
        },
        ShadedQuad {
            corners: [
                Vec2::new(0.0, 0.5),
                Vec2::new(1.0, 0.5),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            color: FLOOR_COLOR,
        },
    ]
}

/// Quad covering the wall drawn by the provided tile.
///
/// Side walls span from the near face of their cell to the far face; a wall
/// straight ahead fills the corridor outline at its near face.
#[must_use]
pub fn tile_quad(key: TileKey) -> ShadedQuad {
    let depth = key.depth();
    let near = corridor_inset(depth.get());
    let far = corridor_inset(depth.get() + 1);

    match key.side() {
        TileSide::Left => ShadedQuad {
            corners: [
                Vec2::new(near, near),
                Vec2::new(far, far),
                Vec2::new(far, 1.0 - far),
                Vec2::new(near, 1.0 - near),
            ],
            color: fogged(SIDE_WALL_COLOR, depth),
        },
        TileSide::Right => ShadedQuad {
            corners: [
                Vec2::new(1.0 - near, near),
                Vec2::new(1.0 - far, far),
                Vec2::new(1.0 - far, 1.0 - far),
                Vec2::new(1.0 - near, 1.0 - near),
            ],
            color: fogged(SIDE_WALL_COLOR, depth),
        },
        TileSide::Mid => ShadedQuad {
            corners: [
                Vec2::new(near, near),
                Vec2::new(1.0 - near, near),
                Vec2::new(1.0 - near, 1.0 - near),
                Vec2::new(near, 1.0 - near),
            ],
            color: fogged(FACING_WALL_COLOR, depth),
        },
    }
}

fn fogged(color: Color, depth: Depth) -> Color {
    color.lighten(FOG_PER_DEPTH * f32::from(depth.get()))
}
