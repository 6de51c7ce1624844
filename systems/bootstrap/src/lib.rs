#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Monster Maze experience.

use monster_maze_core::{MazeView, PlayerState};
use monster_maze_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the maze cells required for the first frame.
    #[must_use]
    pub fn maze<'world>(&self, world: &'world World) -> MazeView<'world> {
        query::maze_view(world)
    }

    /// Exposes where the player stands when the experience starts.
    #[must_use]
    pub fn player(&self, world: &World) -> PlayerState {
        query::player(world)
    }
}
