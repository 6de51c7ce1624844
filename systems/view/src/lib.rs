#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure view system that picks the pre-rendered wall tiles visible to the player.
//!
//! The view cone is five cells deep and one cell wide. For every depth the
//! system probes the cell straight ahead and its two side neighbours, emitting
//! a [`TileKey`] for each wall it finds. Layers are emitted from the farthest
//! to the nearest so that a host compositing them in order lets near walls
//! cover far ones.

use monster_maze_core::{
    CellCoord, Depth, FrameLayer, MazeView, PlayerState, TileKey, TileSide,
};

/// Pure system that maps the player's state to an ordered tile list.
#[derive(Debug, Default)]
pub struct ViewSelector;

impl ViewSelector {
    /// Appends the visible wall tiles to `out` in draw order.
    ///
    /// Depths run from [`Depth::FARTHEST`] down to [`Depth::NEAREST`]; within a
    /// depth the order is left, right, mid. Depths whose centre cell lies
    /// outside the grid emit nothing. Side probes that leave the grid count as
    /// walls.
    pub fn select(&self, maze: MazeView<'_>, player: PlayerState, out: &mut Vec<TileKey>) {
        let facing = player.facing();
        let (dx, dy) = facing.step();
        let dm = facing.mirror_sign();
        let origin = player.cell();

        for depth in Depth::far_to_near() {
            let distance = i32::from(depth.get());
            let Some(centre) = origin.offset(dx * distance, dy * distance) else {
                continue;
            };
            if !maze.contains(centre) {
                continue;
            }

            if probe_is_solid(maze, centre.offset(dy * dm, dx * dm)) {
                out.push(TileKey::new(TileSide::Left, depth));
            }
            if probe_is_solid(maze, centre.offset(-dy * dm, -dx * dm)) {
                out.push(TileKey::new(TileSide::Right, depth));
            }
            if maze.is_solid(centre) {
                out.push(TileKey::new(TileSide::Mid, depth));
            }
        }
    }

    /// Collects the visible wall tiles in draw order.
    #[must_use]
    pub fn visible_tiles(&self, maze: MazeView<'_>, player: PlayerState) -> Vec<TileKey> {
        let mut tiles = Vec::with_capacity(TileSide::DRAW_ORDER.len() * Depth::COUNT);
        self.select(maze, player, &mut tiles);
        tiles
    }

    /// Produces the complete layer list for one frame, background first.
    #[must_use]
    pub fn frame_layers(&self, maze: MazeView<'_>, player: PlayerState) -> Vec<FrameLayer> {
        std::iter::once(FrameLayer::Background)
            .chain(
                self.visible_tiles(maze, player)
                    .into_iter()
                    .map(FrameLayer::Tile),
            )
            .collect()
    }
}

fn probe_is_solid(maze: MazeView<'_>, probe: Option<CellCoord>) -> bool {
    probe.map_or(true, |cell| maze.is_solid(cell))
}
