#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Board generation system that lays out a fresh round.
//!
//! Generation is a pure function of the [`RoundConfig`] and the random
//! stream: replaying the same seed yields the same [`Layout`]. Walls and
//! entities only ever fill empty cells, so the hero and exit placed first
//! are never overwritten.

use std::ops::Range;

use maze_escape_core::{
    AdversaryKind, Board, Cell, ConfigurationError, Layout, Position, RoundConfig, MARGIN_COLUMNS,
};
use rand::Rng;
use tracing::{debug, warn};

/// Minimum column distance between any two wall segments.
const WALL_SEPARATION: u32 = 2;

/// Pure system that produces round layouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Generation;

impl Generation {
    /// Creates a new generation system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates the layout for `config`, drawing every random choice from `rng`.
    ///
    /// Fails with [`ConfigurationError::DensityExceedsCapacity`] when the
    /// level-scaled entity counts exceed the empty cells left in the
    /// midsection band after the walls are carved.
    pub fn generate<R>(
        &self,
        config: &RoundConfig,
        rng: &mut R,
    ) -> Result<Layout, ConfigurationError>
    where
        R: Rng,
    {
        let rows = config.rows();
        let columns = config.columns();
        let band = Band::new(config.band_start(), config.band_width());
        let mut board = Board::new(rows, columns);

        let hero = Position::new(rng.gen_range(0..rows), rng.gen_range(0..MARGIN_COLUMNS));
        board.set(hero, Cell::Hero);

        let exit = Position::new(
            rng.gen_range(0..rows),
            columns - 1 - rng.gen_range(0..MARGIN_COLUMNS),
        );
        board.set(exit, Cell::Exit);

        let walls = band.wall_columns(rng);
        carve_wall(&mut board, walls[0], 0..rows / 2);
        carve_wall(&mut board, walls[1], rows / 2 + 1..rows);
        carve_wall(&mut board, walls[2], rows / 4..3 * rows / 4);

        let profile = config.scaled_profile();
        let requested = profile.total();
        let available = band.empty_cells(&board);
        if requested > available {
            warn!(requested, available, "entity density exceeds board capacity");
            return Err(ConfigurationError::DensityExceedsCapacity {
                requested,
                available,
            });
        }

        for kind in AdversaryKind::ALL {
            band.scatter(&mut board, kind.cell(), profile.adversaries(kind), rng);
        }
        band.scatter(&mut board, Cell::Abyss, profile.abysses, rng);

        debug!(
            %hero,
            %exit,
            ?walls,
            difficulty = %config.difficulty(),
            level = config.level(),
            "board generated"
        );
        Ok(Layout::new(board)?)
    }
}

/// Interior column range reserved for walls, hazards and adversaries.
#[derive(Clone, Copy, Debug)]
struct Band {
    start: u32,
    width: u32,
}

impl Band {
    const fn new(start: u32, width: u32) -> Self {
        Self { start, width }
    }

    fn sample_column<R>(&self, rng: &mut R) -> u32
    where
        R: Rng,
    {
        self.start + rng.gen_range(0..self.width)
    }

    /// Draws three pairwise separated wall columns by rejection sampling.
    ///
    /// Terminates for any band at least seven columns wide, which
    /// [`RoundConfig`] guarantees.
    fn wall_columns<R>(&self, rng: &mut R) -> [u32; 3]
    where
        R: Rng,
    {
        let first = self.sample_column(rng);
        let second = loop {
            let candidate = self.sample_column(rng);
            if candidate.abs_diff(first) >= WALL_SEPARATION {
                break candidate;
            }
        };
        let third = loop {
            let candidate = self.sample_column(rng);
            if candidate.abs_diff(first) >= WALL_SEPARATION
                && candidate.abs_diff(second) >= WALL_SEPARATION
            {
                break candidate;
            }
        };
        [first, second, third]
    }

    fn columns(&self) -> Range<u32> {
        self.start..self.start + self.width
    }

    fn empty_cells(&self, board: &Board) -> u64 {
        let columns = self.columns();
        let count = board
            .positions_of(Cell::Empty)
            .filter(|position| columns.contains(&position.column()))
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// Places `count` copies of `cell` on uniformly drawn empty band cells.
    ///
    /// Callers must check capacity first; every draw retries until it lands
    /// on an empty cell.
    fn scatter<R>(&self, board: &mut Board, cell: Cell, count: u32, rng: &mut R)
    where
        R: Rng,
    {
        for _ in 0..count {
            loop {
                let row = rng.gen_range(0..board.rows());
                let position = Position::new(row, self.sample_column(rng));
                if board.get(position) == Some(Cell::Empty) {
                    board.set(position, cell);
                    break;
                }
            }
        }
    }
}

fn carve_wall(board: &mut Board, column: u32, rows: Range<u32>) {
    for row in rows {
        let position = Position::new(row, column);
        if board.get(position) == Some(Cell::Empty) {
            board.set(position, Cell::Wall);
        }
    }
}
