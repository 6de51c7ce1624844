#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Monster Maze.

use log::{debug, trace};
use monster_maze_core::{
    CellCoord, CellKind, Command, Event, Facing, MazeView, MoveRejection, PlayerState, GRID_SIZE,
    WELCOME_BANNER,
};
use thiserror::Error;

const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

const START_CELL: CellCoord = CellCoord::new(1, 4);
const START_FACING: Facing = Facing::East;

const DEFAULT_ROWS: [&[u8; GRID_SIZE as usize]; GRID_SIZE as usize] = [
    b"##########",
    b"##.#.#...#",
    b"#....#.#.#",
    b"##.#.....#",
    b"##.#.#.#.#",
    b"#........#",
    b"##.#.##.##",
    b"##.#.##.##",
    b"##.......#",
    b"##########",
];

/// Errors raised while parsing a textual maze layout.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout does not contain exactly [`GRID_SIZE`] rows.
    #[error("layout must contain 10 rows (found {found})")]
    RowCount {
        /// Number of non-empty rows encountered.
        found: usize,
    },
    /// A row does not contain exactly [`GRID_SIZE`] cells.
    #[error("layout row {row} must contain 10 cells (found {found})")]
    RowLength {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells encountered in the row.
        found: usize,
    },
    /// A cell symbol is neither a wall nor an open marker.
    #[error("unknown cell symbol `{symbol}` at row {row}, column {column}")]
    UnknownCell {
        /// Zero-based index of the row containing the symbol.
        row: usize,
        /// Zero-based index of the symbol within its row.
        column: usize,
        /// Offending character.
        symbol: char,
    },
}

/// Errors raised when a world cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The requested start cell lies outside the grid.
    #[error("start cell {cell:?} lies outside the maze")]
    StartOutOfBounds {
        /// Requested start cell.
        cell: CellCoord,
    },
    /// The requested start cell is a wall.
    #[error("start cell {cell:?} is a wall")]
    StartBlocked {
        /// Requested start cell.
        cell: CellCoord,
    },
}

/// Fixed-size maze grid, immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [CellKind; CELL_COUNT],
}

impl Grid {
    /// Builds the maze shipped with the game.
    #[must_use]
    pub fn default_layout() -> Self {
        let mut cells = [CellKind::Wall; CELL_COUNT];
        for (x, row) in DEFAULT_ROWS.iter().enumerate() {
            for (y, symbol) in row.iter().enumerate() {
                if *symbol == b'.' {
                    cells[x * GRID_SIZE as usize + y] = CellKind::Open;
                }
            }
        }
        Self { cells }
    }

    /// Parses a layout written one row per line.
    ///
    /// `#` and `1` mark walls, `.`, space and `0` mark open cells. Empty lines
    /// are ignored; spaces are cells, so rows are never trimmed. Rows are
    /// indexed by `x`, columns by `y`.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        if rows.len() != GRID_SIZE as usize {
            return Err(LayoutError::RowCount { found: rows.len() });
        }

        let mut cells = [CellKind::Wall; CELL_COUNT];
        for (x, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != GRID_SIZE as usize {
                return Err(LayoutError::RowLength { row: x, found });
            }
            for (y, symbol) in row.chars().enumerate() {
                cells[x * GRID_SIZE as usize + y] = match symbol {
                    '#' | '1' => CellKind::Wall,
                    '.' | ' ' | '0' => CellKind::Open,
                    _ => {
                        return Err(LayoutError::UnknownCell {
                            row: x,
                            column: y,
                            symbol,
                        })
                    }
                };
            }
        }

        Ok(Self { cells })
    }

    /// Read-only view over the cells.
    #[must_use]
    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(&self.cells, GRID_SIZE)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::default_layout()
    }
}

/// Represents the authoritative Monster Maze world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    player: PlayerState,
}

impl World {
    /// Creates the default maze with the player at its starting cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::default_layout(),
            player: PlayerState::new(START_CELL, START_FACING),
        }
    }

    /// Creates a world from a custom layout and start state.
    ///
    /// Fails when the start cell is outside the grid or on a wall, so the
    /// player never begins inside solid rock.
    pub fn with_layout(grid: Grid, start: PlayerState) -> Result<Self, WorldError> {
        let cell = start.cell();
        match grid.view().cell_kind(cell) {
            None => Err(WorldError::StartOutOfBounds { cell }),
            Some(CellKind::Wall) => Err(WorldError::StartBlocked { cell }),
            Some(CellKind::Open) => Ok(Self {
                banner: WELCOME_BANNER,
                grid,
                player: start,
            }),
        }
    }

    /// Default starting state of the player.
    #[must_use]
    pub const fn start_state() -> PlayerState {
        PlayerState::new(START_CELL, START_FACING)
    }

    fn step(&mut self, sign: i32, out_events: &mut Vec<Event>) {
        let from = self.player.cell();
        let (dx, dy) = self.player.facing().step();
        let candidate = from.offset(dx * sign, dy * sign);
        let outcome = match candidate.map(|cell| (cell, self.grid.view().cell_kind(cell))) {
            Some((cell, Some(CellKind::Open))) => Ok(cell),
            Some((cell, Some(CellKind::Wall))) => Err(MoveRejection::Wall { cell }),
            Some((_, None)) | None => Err(MoveRejection::OutOfBounds),
        };

        match outcome {
            Ok(to) => {
                self.player = self.player.with_cell(to);
                trace!("player moved from {from:?} to {to:?}");
                out_events.push(Event::PlayerMoved { from, to });
            }
            Err(reason) => {
                debug!("move from {from:?} rejected: {reason:?}");
                out_events.push(Event::MoveRejected { from, reason });
            }
        }
    }

    fn turn(&mut self, rotate: fn(Facing) -> Facing, out_events: &mut Vec<Event>) {
        let from = self.player.facing();
        let to = rotate(from);
        self.player = self.player.with_facing(to);
        trace!("player turned from {from:?} to {to:?}");
        out_events.push(Event::PlayerTurned { from, to });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Moves into walls or off the grid leave the world untouched and report
/// [`Event::MoveRejected`]; callers are free to ignore it.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveForward => world.step(1, out_events),
        Command::MoveBackward => world.step(-1, out_events),
        Command::TurnLeft => world.turn(Facing::turned_left, out_events),
        Command::TurnRight => world.turn(Facing::turned_right, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use monster_maze_core::{MazeView, PlayerState};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures a read-only view of the maze cells.
    #[must_use]
    pub fn maze_view(world: &World) -> MazeView<'_> {
        world.grid.view()
    }

    /// Reports the player's current position and facing.
    #[must_use]
    pub fn player(world: &World) -> PlayerState {
        world.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_layout_text() -> String {
        DEFAULT_ROWS
            .iter()
            .map(|row| String::from_utf8_lossy(&row[..]).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn default_layout_matches_reference_table() {
        let grid = Grid::default_layout();
        let view = grid.view();

        assert_eq!(view.cell_kind(CellCoord::new(0, 4)), Some(CellKind::Wall));
        assert_eq!(view.cell_kind(CellCoord::new(1, 4)), Some(CellKind::Open));
        assert_eq!(view.cell_kind(CellCoord::new(4, 5)), Some(CellKind::Wall));
        assert_eq!(view.cell_kind(CellCoord::new(5, 1)), Some(CellKind::Open));
        assert_eq!(view.cell_kind(CellCoord::new(6, 8)), Some(CellKind::Wall));
        assert_eq!(view.cell_kind(CellCoord::new(8, 8)), Some(CellKind::Open));
        let walls = (0..GRID_SIZE)
            .flat_map(|x| (0..GRID_SIZE).map(move |y| CellCoord::new(x, y)))
            .filter(|cell| view.is_solid(*cell))
            .count();
        assert_eq!(walls, 58);
    }

    #[test]
    fn new_world_starts_facing_east_at_reference_cell() {
        let world = World::new();
        let player = query::player(&world);

        assert_eq!(player.cell(), CellCoord::new(1, 4));
        assert_eq!(player.facing(), Facing::East);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn forward_into_wall_is_rejected() {
        let start = PlayerState::new(CellCoord::new(1, 4), Facing::West);
        let mut world = World::with_layout(Grid::default_layout(), start).expect("open start");

        let events = run(&mut world, Command::MoveForward);

        assert_eq!(query::player(&world), start);
        assert_eq!(
            events,
            vec![Event::MoveRejected {
                from: CellCoord::new(1, 4),
                reason: MoveRejection::Wall {
                    cell: CellCoord::new(0, 4),
                },
            }]
        );
    }

    #[test]
    fn forward_then_backward_returns_to_origin() {
        let mut world = World::new();

        let forward = run(&mut world, Command::MoveForward);
        assert_eq!(
            forward,
            vec![Event::PlayerMoved {
                from: CellCoord::new(1, 4),
                to: CellCoord::new(2, 4),
            }]
        );

        let backward = run(&mut world, Command::MoveBackward);
        assert_eq!(
            backward,
            vec![Event::PlayerMoved {
                from: CellCoord::new(2, 4),
                to: CellCoord::new(1, 4),
            }]
        );
        assert_eq!(query::player(&world), World::start_state());
    }

    #[test]
    fn backward_into_wall_is_rejected() {
        let mut world = World::new();

        let events = run(&mut world, Command::MoveBackward);

        assert_eq!(query::player(&world), World::start_state());
        assert!(matches!(
            events.as_slice(),
            [Event::MoveRejected {
                reason: MoveRejection::Wall { .. },
                ..
            }]
        ));
    }

    #[test]
    fn moves_off_the_grid_are_rejected_without_wrapping() {
        let layout = "\
..........
##########
##########
##########
##########
##########
##########
##########
##########
.........#
";
        let grid = Grid::parse(layout).expect("valid layout");
        let start = PlayerState::new(CellCoord::new(0, 0), Facing::West);
        let mut world = World::with_layout(grid.clone(), start).expect("open start");

        let events = run(&mut world, Command::MoveForward);
        assert_eq!(
            events,
            vec![Event::MoveRejected {
                from: CellCoord::new(0, 0),
                reason: MoveRejection::OutOfBounds,
            }]
        );

        let events = run(&mut world, Command::TurnRight);
        assert_eq!(
            events,
            vec![Event::PlayerTurned {
                from: Facing::West,
                to: Facing::South,
            }]
        );
        let events = run(&mut world, Command::MoveBackward);
        assert!(matches!(
            events.as_slice(),
            [Event::MoveRejected {
                reason: MoveRejection::OutOfBounds,
                ..
            }]
        ));
        assert_eq!(query::player(&world).cell(), CellCoord::new(0, 0));

        let bottom = PlayerState::new(CellCoord::new(9, 0), Facing::East);
        let mut world = World::with_layout(grid, bottom).expect("open start");
        let events = run(&mut world, Command::MoveForward);
        assert_eq!(
            events,
            vec![Event::MoveRejected {
                from: CellCoord::new(9, 0),
                reason: MoveRejection::OutOfBounds,
            }]
        );
    }

    #[test]
    fn turns_report_previous_and_new_facing() {
        let mut world = World::new();

        let left = run(&mut world, Command::TurnLeft);
        assert_eq!(
            left,
            vec![Event::PlayerTurned {
                from: Facing::East,
                to: Facing::South,
            }]
        );
        let right = run(&mut world, Command::TurnRight);
        assert_eq!(
            right,
            vec![Event::PlayerTurned {
                from: Facing::South,
                to: Facing::East,
            }]
        );
        assert_eq!(query::player(&world).cell(), CellCoord::new(1, 4));
    }

    #[test]
    fn with_layout_rejects_invalid_start_cells() {
        let blocked = PlayerState::new(CellCoord::new(0, 0), Facing::East);
        let outside = PlayerState::new(CellCoord::new(10, 2), Facing::East);

        assert_eq!(
            World::with_layout(Grid::default_layout(), blocked).err(),
            Some(WorldError::StartBlocked {
                cell: CellCoord::new(0, 0)
            })
        );
        assert_eq!(
            World::with_layout(Grid::default_layout(), outside).err(),
            Some(WorldError::StartOutOfBounds {
                cell: CellCoord::new(10, 2)
            })
        );
    }

    #[test]
    fn parse_accepts_numeric_symbols_and_blank_lines() {
        let layout = "
1111111111
1100000001

1000000001
1000000001
1000000001
1000000001
1000000001
1000000001
1111111111
";
        let grid = Grid::parse(layout).expect("valid layout");
        assert!(grid.view().is_open(CellCoord::new(1, 2)));
        assert!(grid.view().is_solid(CellCoord::new(1, 1)));
    }

    #[test]
    fn parse_treats_spaces_as_open_cells() {
        let layout = "##########\r
#  ......#\r
#........ \r
##########\r
#        #\r
##########\r
##########\r
##########\r
##########\r
##########\r
";
        let grid = Grid::parse(layout).expect("spaces are open cells");
        let view = grid.view();

        assert!(view.is_open(CellCoord::new(1, 1)));
        assert!(view.is_open(CellCoord::new(1, 2)));
        assert!(view.is_open(CellCoord::new(2, 9)));
        assert!(view.is_open(CellCoord::new(4, 5)));
        assert!(view.is_solid(CellCoord::new(2, 0)));
        assert!(view.is_solid(CellCoord::new(3, 4)));
    }

    #[test]
    fn parse_rejects_malformed_layouts() {
        assert_eq!(
            Grid::parse("##########\n"),
            Err(LayoutError::RowCount { found: 1 })
        );

        let layout = default_layout_text();
        assert_eq!(Grid::parse(&layout), Ok(Grid::default_layout()));

        let short_row = layout.replacen("##.#.#...#", "##.#.#..#", 1);
        assert_eq!(
            Grid::parse(&short_row),
            Err(LayoutError::RowLength { row: 1, found: 9 })
        );

        let unknown = layout.replacen("#....#.#.#", "#..M.#.#.#", 1);
        assert_eq!(
            Grid::parse(&unknown),
            Err(LayoutError::UnknownCell {
                row: 2,
                column: 3,
                symbol: 'M',
            })
        );
    }
}
