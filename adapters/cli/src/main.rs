#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Monster Maze experience.

mod headless;
mod session;

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use monster_maze_rendering::{CanvasPresentation, Color, Presentation, RenderingBackend, Scene};
use monster_maze_rendering_macroquad::{MacroquadBackend, DEFAULT_MANIFEST_PATH};
use monster_maze_system_bootstrap::Bootstrap;
use monster_maze_system_view::ViewSelector;
use monster_maze_world::{Grid, World};

use crate::{
    headless::{parse_replay_keys, ReplayBackend},
    session::Session,
};

const WINDOW_TITLE: &str = "Monster Maze";

/// Command-line arguments for launching Monster Maze.
#[derive(Debug, Parser)]
#[command(name = "monster-maze", about = "Walk a maze in first person.")]
struct CliArgs {
    /// Maze layout file: ten rows of ten cells, `#`/`1` for walls and `.`/`0`/space for open.
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
    /// Tile manifest listing the layer images.
    #[arg(long, value_name = "MANIFEST")]
    assets: Option<PathBuf>,
    /// Draws flat-shaded quads instead of loading tile images.
    #[arg(long)]
    no_sprites: bool,
    /// Enables or disables vertical sync.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
    /// Logs the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Comma separated keys (`UP,LEFT,...`) replayed without opening a window.
    #[arg(long, value_name = "KEYS")]
    replay: Option<String>,
}

/// Entry point for the Monster Maze command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let world = load_world(args.layout.as_deref())?;

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));
    info!("player starts at {:?}", bootstrap.player(&world));
    info!("first frame: {}", first_frame(&bootstrap, &world));

    let presentation = Presentation::new(
        WINDOW_TITLE,
        Color::WHITE,
        Scene::new(CanvasPresentation::default(), Vec::new()),
    );
    let mut session = Session::new(world);
    let update_scene = move |input, scene: &mut Scene| session.update_scene(input, scene);

    if let Some(script) = args.replay {
        let keys = parse_replay_keys(&script).context("invalid replay script")?;
        return ReplayBackend::new(keys, io::stdout().lock()).run(presentation, update_scene);
    }

    let load_tiles = if args.no_sprites {
        false
    } else if args.assets.is_none() && !Path::new(DEFAULT_MANIFEST_PATH).exists() {
        warn!("no tile manifest at {DEFAULT_MANIFEST_PATH}; drawing fallback quads");
        false
    } else {
        true
    };

    let mut backend = MacroquadBackend::new()
        .with_tile_loading(load_tiles)
        .with_show_fps(args.show_fps);
    if let Some(path) = args.assets {
        backend = backend.with_manifest_path(path);
    }
    if let Some(enabled) = args.vsync {
        backend = backend.with_vsync(enabled);
    }

    backend.run(presentation, update_scene)
}

fn load_world(layout: Option<&Path>) -> Result<World> {
    let Some(path) = layout else {
        return Ok(World::new());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read maze layout at {}", path.display()))?;
    let grid = Grid::parse(&text)
        .with_context(|| format!("failed to parse maze layout at {}", path.display()))?;
    info!("loaded maze layout from {}", path.display());

    World::with_layout(grid, World::start_state())
        .with_context(|| format!("maze layout at {} cannot host the player", path.display()))
}

fn first_frame(bootstrap: &Bootstrap, world: &World) -> String {
    ViewSelector
        .frame_layers(bootstrap.maze(world), bootstrap.player(world))
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
