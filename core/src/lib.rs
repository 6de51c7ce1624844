#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Monster Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate key presses into
//! [`Command`] values, the world executes those commands via its `apply` entry
//! point and reports the outcome as [`Event`] values, and systems read the
//! world through immutable views such as [`MazeView`] to decide what the host
//! should draw. Tile identifiers stay typed as [`TileKey`] and [`FrameLayer`]
//! until an adapter asks for their string form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Monster Maze.";

/// Number of cells along each edge of the square maze grid.
pub const GRID_SIZE: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Steps one cell along the player's facing direction.
    MoveForward,
    /// Steps one cell against the player's facing direction.
    MoveBackward,
    /// Rotates the player a quarter turn counter-clockwise in facing order.
    TurnLeft,
    /// Rotates the player a quarter turn clockwise in facing order.
    TurnRight,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player moved between two open cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Confirms that the player rotated in place.
    PlayerTurned {
        /// Facing before the rotation.
        from: Facing,
        /// Facing after the rotation.
        to: Facing,
    },
    /// Reports that a move was refused and the player stayed put.
    MoveRejected {
        /// Cell the player still occupies.
        from: CellCoord,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
}

/// Reasons a move request may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination cell is a wall.
    Wall {
        /// Wall cell that blocked the move.
        cell: CellCoord,
    },
    /// The destination lies outside the grid.
    OutOfBounds,
}

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Solid cell the player can never enter.
    Wall,
    /// Walkable cell.
    Open,
}

impl CellKind {
    /// Reports whether the cell is solid.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Location of a single grid cell.
///
/// `x` selects the outer row of the layout table and `y` the entry within it,
/// so a layout written as text reads `grid[x][y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Index of the outer layout row.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Index within the layout row.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Offsets the coordinate by a signed delta.
    ///
    /// Returns `None` when either component would become negative or
    /// overflow. Grid bounds are not checked here.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self::new(x, y))
    }
}

/// Discrete direction the player looks and walks toward.
///
/// The cyclic order is `West → South → East → North`, following the grid's
/// own axes rather than a compass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Step vector `(-1, 0)`.
    West,
    /// Step vector `(0, 1)`.
    South,
    /// Step vector `(1, 0)`.
    East,
    /// Step vector `(0, -1)`.
    North,
}

impl Facing {
    /// Every facing in cyclic order.
    pub const ALL: [Facing; 4] = [Self::West, Self::South, Self::East, Self::North];

    /// Position of the facing within the cyclic order.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::West => 0,
            Self::South => 1,
            Self::East => 2,
            Self::North => 3,
        }
    }

    /// Resolves a facing from its cyclic index, wrapping modulo four.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Facing reached after a quarter turn to the left.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Facing reached after a quarter turn to the right.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Unit step `(dx, dy)` taken when walking forward.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::West => (-1, 0),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::North => (0, -1),
        }
    }

    /// Sign applied to the swapped step vector when probing side walls.
    ///
    /// Swapping `dx` and `dy` yields a perpendicular that points to the
    /// viewer's left only on the horizontal axis, so the vertical facings
    /// flip it.
    #[must_use]
    pub const fn mirror_sign(self) -> i32 {
        if self.index() % 2 == 1 {
            -1
        } else {
            1
        }
    }
}

/// Discrete position and orientation of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    cell: CellCoord,
    facing: Facing,
}

impl PlayerState {
    /// Creates a new player state.
    #[must_use]
    pub const fn new(cell: CellCoord, facing: Facing) -> Self {
        Self { cell, facing }
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Direction the player currently faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Returns a copy relocated to the provided cell.
    #[must_use]
    pub const fn with_cell(self, cell: CellCoord) -> Self {
        Self { cell, ..self }
    }

    /// Returns a copy rotated to the provided facing.
    #[must_use]
    pub const fn with_facing(self, facing: Facing) -> Self {
        Self { facing, ..self }
    }
}

/// Logical keys delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    /// Walks forward.
    Up,
    /// Walks backward.
    Down,
    /// Turns left.
    Left,
    /// Turns right.
    Right,
}

impl InputKey {
    /// Every logical key understood by the core.
    pub const ALL: [InputKey; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Resolves a key from its host-facing name such as `UP`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Host-facing name of the key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    /// Command triggered by pressing the key.
    #[must_use]
    pub const fn command(self) -> Command {
        match self {
            Self::Up => Command::MoveForward,
            Self::Down => Command::MoveBackward,
            Self::Left => Command::TurnLeft,
            Self::Right => Command::TurnRight,
        }
    }
}

/// Error returned when a key name is not one of `UP`, `DOWN`, `LEFT`, `RIGHT`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown key `{0}`; expected one of UP, DOWN, LEFT, RIGHT")]
pub struct UnknownKey(pub String);

impl FromStr for InputKey {
    type Err = UnknownKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_name(value).ok_or_else(|| UnknownKey(value.to_owned()))
    }
}

/// Which pre-rendered strip a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSide {
    /// Wall running along the viewer's left.
    Left,
    /// Wall running along the viewer's right.
    Right,
    /// Wall blocking the corridor straight ahead.
    Mid,
}

impl TileSide {
    /// Sides in the order they are drawn within a single depth.
    pub const DRAW_ORDER: [TileSide; 3] = [Self::Left, Self::Right, Self::Mid];

    /// Prefix used by the host-facing identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Mid => "mid",
        }
    }
}

/// Distance in cells from the player to a visible layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Depth(u8);

impl Depth {
    /// The player's own cell.
    pub const NEAREST: Depth = Depth(0);

    /// Farthest layer covered by the pre-rendered tiles.
    pub const FARTHEST: Depth = Depth(4);

    /// Number of layers in the view cone.
    pub const COUNT: usize = 5;

    /// Creates a depth, returning `None` beyond [`Depth::FARTHEST`].
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::FARTHEST.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the numeric depth.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Iterates every depth from the farthest to the nearest.
    pub fn far_to_near() -> impl Iterator<Item = Depth> {
        (Self::NEAREST.0..=Self::FARTHEST.0).rev().map(Depth)
    }
}

/// Identifies one pre-rendered wall image by side and depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    side: TileSide,
    depth: Depth,
}

impl TileKey {
    /// Creates a new tile key.
    #[must_use]
    pub const fn new(side: TileSide, depth: Depth) -> Self {
        Self { side, depth }
    }

    /// Strip the tile belongs to.
    #[must_use]
    pub const fn side(&self) -> TileSide {
        self.side
    }

    /// Layer the tile is drawn in.
    #[must_use]
    pub const fn depth(&self) -> Depth {
        self.depth
    }

    /// Every tile key in draw order: far to near, then left, right, mid.
    pub fn all() -> impl Iterator<Item = TileKey> {
        Depth::far_to_near().flat_map(|depth| {
            TileSide::DRAW_ORDER
                .into_iter()
                .map(move |side| TileKey::new(side, depth))
        })
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.name(), self.depth.get())
    }
}

/// Error returned when a layer identifier is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown layer identifier `{0}`")]
pub struct UnknownLayer(pub String);

impl FromStr for TileKey {
    type Err = UnknownLayer;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownLayer(value.to_owned());
        let (side, digits) = TileSide::DRAW_ORDER
            .into_iter()
            .find_map(|side| value.strip_prefix(side.name()).map(|rest| (side, rest)))
            .ok_or_else(unknown)?;
        if digits.len() != 1 {
            return Err(unknown());
        }
        let depth = digits
            .parse::<u8>()
            .ok()
            .and_then(Depth::new)
            .ok_or_else(unknown)?;
        Ok(Self::new(side, depth))
    }
}

/// One image the host composites while drawing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameLayer {
    /// Backdrop drawn first on every frame.
    Background,
    /// Wall tile selected by the view.
    Tile(TileKey),
}

impl FrameLayer {
    /// Host-facing identifier of the background image.
    pub const BACKGROUND_NAME: &'static str = "back";

    /// Every layer the host must be able to resolve, background first.
    pub fn all() -> impl Iterator<Item = FrameLayer> {
        std::iter::once(Self::Background).chain(TileKey::all().map(Self::Tile))
    }
}

impl From<TileKey> for FrameLayer {
    fn from(key: TileKey) -> Self {
        Self::Tile(key)
    }
}

impl fmt::Display for FrameLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str(Self::BACKGROUND_NAME),
            Self::Tile(key) => fmt::Display::fmt(key, f),
        }
    }
}

impl FromStr for FrameLayer {
    type Err = UnknownLayer;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == Self::BACKGROUND_NAME {
            Ok(Self::Background)
        } else {
            value.parse().map(Self::Tile)
        }
    }
}

/// Read-only view into the maze grid.
#[derive(Clone, Copy, Debug)]
pub struct MazeView<'a> {
    cells: &'a [CellKind],
    size: u32,
}

impl<'a> MazeView<'a> {
    /// Captures a view over `size * size` cells stored with `x` as the outer index.
    #[must_use]
    pub fn new(cells: &'a [CellKind], size: u32) -> Self {
        Self { cells, size }
    }

    /// Returns the contents of the cell, or `None` outside the grid.
    #[must_use]
    pub fn cell_kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell exists and can be walked on.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.cell_kind(cell) == Some(CellKind::Open)
    }

    /// Reports whether the cell blocks sight, treating the outside as solid.
    #[must_use]
    pub fn is_solid(&self, cell: CellCoord) -> bool {
        self.cell_kind(cell).map_or(true, CellKind::is_wall)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.size && cell.y() < self.size
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        let width = usize::try_from(self.size).ok()?;
        Some(x * width + y)
    }
}
