#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Monster Maze.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Each frame the adapter polls the arrow keys, lets the caller update the
//! scene, clears the window and composites the scene's layers in order. Layer
//! images come from a TOML tile manifest; when image loading is disabled the
//! adapter draws the flat-shaded quads from
//! [`monster_maze_rendering::fallback`] instead.

mod tiles;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;
use macroquad::{
    input::{is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
};
use monster_maze_core::{FrameLayer, InputKey};
use monster_maze_rendering::{
    fallback, CanvasPresentation, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use std::{
    path::PathBuf,
    sync::mpsc,
    time::Duration,
};

use self::tiles::TileAtlas;

/// Manifest location used when no other path is configured, relative to the
/// working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "assets/manifest.toml";

/// Physical keys polled every frame and the logical key each one delivers.
pub const KEY_BINDINGS: [(KeyCode, InputKey); 4] = [
    (KeyCode::Up, InputKey::Up),
    (KeyCode::Down, InputKey::Down),
    (KeyCode::Left, InputKey::Left),
    (KeyCode::Right, InputKey::Right),
];

/// Snapshot of edge-triggered keyboard input observed during a single frame.
#[derive(Clone, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Arrow keys pressed this frame.
    keys: Vec<InputKey>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let keys = KEY_BINDINGS
            .iter()
            .filter(|(code, _)| is_key_pressed(*code))
            .map(|(_, key)| *key)
            .collect();

        Self {
            quit_requested,
            keys,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    manifest_path: PathBuf,
    load_tiles: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            manifest_path: TileAtlas::default_manifest_path(),
            load_tiles: true,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Overrides the location of the tile manifest.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Configures whether the backend should load tile images or draw fallback quads.
    #[must_use]
    pub fn with_tile_loading(mut self, enabled: bool) -> Self {
        self.load_tiles = enabled;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average frame rate once a
    /// full second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            manifest_path,
            load_tiles,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let canvas_size = scene.canvas.size();
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: canvas_size.x.round() as i32,
            window_height: canvas_size.y.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut init_sender = Some(atlas_init_sender);
            let mut scene = scene;

            let atlas = if load_tiles {
                match TileAtlas::from_manifest_path(&manifest_path)
                    .context("failed to initialise tile atlas")
                {
                    Ok(atlas) => {
                        info!(
                            "loaded {} tile textures from {}",
                            atlas.texture_count(),
                            manifest_path.display()
                        );
                        debug_assert!(FrameLayer::all().all(|layer| atlas.contains(layer)));
                        Some(atlas)
                    }
                    Err(error) => {
                        if let Some(sender) = init_sender.take() {
                            let _ = sender.send(Err(error));
                        }
                        return;
                    }
                }
            } else {
                info!("tile loading disabled; drawing fallback quads");
                None
            };

            if let Some(sender) = init_sender.take() {
                let _ = sender.send(Ok(()));
            }

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                update_scene(FrameInput::from_keys(keyboard.keys), &mut scene);

                macroquad::window::clear_background(background);
                let metrics = CanvasMetrics::from_canvas(
                    scene.canvas,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                if let Err(error) = draw_layers(&scene.layers, &metrics, atlas.as_ref()) {
                    log::error!("{error:#}");
                    break;
                }

                let frame_dt = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

/// Placement of the canvas inside the window, letterboxed to keep its aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CanvasMetrics {
    origin: Vec2,
    size: Vec2,
}

impl CanvasMetrics {
    fn from_canvas(canvas: CanvasPresentation, screen_width: f32, screen_height: f32) -> Self {
        let canvas_size = canvas.size();
        let scale = (screen_width / canvas_size.x)
            .min(screen_height / canvas_size.y)
            .max(0.0);
        let size = canvas_size * scale;
        let origin = (Vec2::new(screen_width, screen_height) - size) * 0.5;

        Self {
            origin: origin.max(Vec2::ZERO),
            size,
        }
    }

    fn to_screen(&self, unit: Vec2) -> MacroquadVec2 {
        let point = self.origin + unit * self.size;
        MacroquadVec2::new(point.x, point.y)
    }
}

fn draw_layers(
    layers: &[FrameLayer],
    metrics: &CanvasMetrics,
    atlas: Option<&TileAtlas>,
) -> Result<()> {
    for layer in layers {
        match atlas {
            Some(atlas) => atlas.draw(*layer, metrics.origin, metrics.size)?,
            None => draw_fallback_layer(*layer, metrics),
        }
    }
    Ok(())
}

fn draw_fallback_layer(layer: FrameLayer, metrics: &CanvasMetrics) {
    for quad in fallback::layer_quads(layer) {
        let color = to_macroquad_color(quad.color);
        for [a, b, c] in quad.triangles() {
            macroquad::shapes::draw_triangle(
                metrics.to_screen(a),
                metrics.to_screen(b),
                metrics.to_screen(c),
                color,
            );
        }
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
