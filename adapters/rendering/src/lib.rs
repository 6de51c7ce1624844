#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Monster Maze adapters.

pub mod fallback;

use anyhow::Result as AnyResult;
use glam::Vec2;
use monster_maze_core::{FrameLayer, InputKey};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Logical keys pressed since the previous frame, in press order.
    pub keys: Vec<InputKey>,
}

impl FrameInput {
    /// Creates an input snapshot from the provided key presses.
    #[must_use]
    pub fn from_keys(keys: Vec<InputKey>) -> Self {
        Self { keys }
    }

    /// Reports whether no key was pressed this frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Fixed-size drawing surface every layer is composited onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasPresentation {
    size: Vec2,
}

impl CanvasPresentation {
    /// Canvas edge length used by the pre-rendered tile set.
    pub const DEFAULT_EDGE: f32 = 600.0;

    /// Creates a new canvas descriptor.
    ///
    /// Returns an error when either dimension is not a positive finite number.
    pub fn new(width: f32, height: f32) -> std::result::Result<Self, RenderingError> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(RenderingError::InvalidCanvasSize { width, height });
        }

        Ok(Self {
            size: Vec2::new(width, height),
        })
    }

    /// Size of the canvas in canvas pixels.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Maps a point expressed in unit canvas space (0.0..=1.0) to canvas pixels.
    #[must_use]
    pub fn to_canvas(&self, unit: Vec2) -> Vec2 {
        unit * self.size
    }
}

impl Default for CanvasPresentation {
    fn default() -> Self {
        Self {
            size: Vec2::splat(Self::DEFAULT_EDGE),
        }
    }
}

/// Scene description listing the layers to composite for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Surface the layers are drawn onto.
    pub canvas: CanvasPresentation,
    /// Layers in draw order. Each layer is drawn at the canvas origin.
    pub layers: Vec<FrameLayer>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(canvas: CanvasPresentation, layers: Vec<FrameLayer>) -> Self {
        Self { canvas, layers }
    }

    /// Host-facing identifiers of the layers in draw order.
    #[must_use]
    pub fn layer_names(&self) -> Vec<String> {
        self.layers.iter().map(ToString::to_string).collect()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Monster Maze scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the key presses captured
    /// for the frame and may replace the scene's layers before they are
    /// composited.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Canvas dimensions must be positive and finite.
    InvalidCanvasSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCanvasSize { width, height } => {
                write!(
                    f,
                    "canvas dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use monster_maze_core::{Depth, TileKey, TileSide};

    #[test]
    fn canvas_creation_accepts_positive_dimensions() {
        let canvas = CanvasPresentation::new(600.0, 400.0).expect("positive canvas");

        assert_eq!(canvas.size(), Vec2::new(600.0, 400.0));
        assert_eq!(canvas.to_canvas(Vec2::splat(0.5)), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn canvas_creation_rejects_degenerate_dimensions_without_panicking() {
        let error = CanvasPresentation::new(0.0, 600.0).expect_err("zero width must be rejected");
        assert!(matches!(
            error,
            RenderingError::InvalidCanvasSize { width, .. } if width == 0.0
        ));
        assert!(CanvasPresentation::new(600.0, f32::NAN).is_err());
        assert!(CanvasPresentation::new(-1.0, 600.0).is_err());
    }

    #[test]
    fn default_canvas_matches_tile_set() {
        assert_eq!(CanvasPresentation::default().size(), Vec2::splat(600.0));
    }

    #[test]
    fn scene_reports_layer_names_in_draw_order() {
        let scene = Scene::new(
            CanvasPresentation::default(),
            vec![
                FrameLayer::Background,
                FrameLayer::Tile(TileKey::new(TileSide::Right, Depth::FARTHEST)),
                FrameLayer::Tile(TileKey::new(TileSide::Mid, Depth::NEAREST)),
            ],
        );

        assert_eq!(scene.layer_names(), ["back", "right4", "mid0"]);
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);

        assert!((color.red - 0.5).abs() < f32::EPSILON);
        assert!((color.alpha - 1.0).abs() < f32::EPSILON);
        assert_eq!(Color::WHITE.lighten(0.3), Color::WHITE);
    }
}
