#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! views of the [`Board`], and respond exclusively with new commands.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Escape.";

/// Number of board rows used when no configuration overrides it.
pub const DEFAULT_ROWS: u32 = 15;

/// Number of board columns used when no configuration overrides it.
pub const DEFAULT_COLUMNS: u32 = 40;

/// Width of the hero margin on the left and the exit margin on the right.
pub const MARGIN_COLUMNS: u32 = 3;

/// Smallest column count whose midsection band fits three separated walls.
pub const MINIMUM_COLUMNS: u32 = 13;

/// Contents of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing occupies the cell.
    Empty,
    /// The player-controlled hero.
    Hero,
    /// Adversary that pursues the hero one cell per turn.
    Monster,
    /// Adversary that pursues the hero two cells per turn.
    SuperMonster,
    /// Adversary that flutters in a random direction every turn.
    Bat,
    /// Hazard that swallows anything stepping into it.
    Abyss,
    /// Impassable obstacle.
    Wall,
    /// Goal the hero must reach to win the round.
    Exit,
}

impl Cell {
    /// Single-character glyph used by text adapters and share codes.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Hero => 'H',
            Self::Monster => 'm',
            Self::SuperMonster => 'M',
            Self::Bat => '~',
            Self::Abyss => '#',
            Self::Wall => '+',
            Self::Exit => '*',
        }
    }

    /// Parses a glyph produced by [`Cell::glyph`].
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            ' ' => Some(Self::Empty),
            'H' => Some(Self::Hero),
            'm' => Some(Self::Monster),
            'M' => Some(Self::SuperMonster),
            '~' => Some(Self::Bat),
            '#' => Some(Self::Abyss),
            '+' => Some(Self::Wall),
            '*' => Some(Self::Exit),
            _ => None,
        }
    }

    /// Returns the adversary kind stored in the cell, if any.
    #[must_use]
    pub const fn adversary(self) -> Option<AdversaryKind> {
        match self {
            Self::Monster => Some(AdversaryKind::Monster),
            Self::SuperMonster => Some(AdversaryKind::SuperMonster),
            Self::Bat => Some(AdversaryKind::Bat),
            _ => None,
        }
    }

    /// Reports whether the cell holds any adversary.
    #[must_use]
    pub const fn is_adversary(self) -> bool {
        self.adversary().is_some()
    }
}

/// Hostile mobile entities that roam the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdversaryKind {
    /// Greedy pursuer moving one cell per turn.
    Monster,
    /// Greedy pursuer moving two cells per turn.
    SuperMonster,
    /// Erratic flyer picking a random heading every turn.
    Bat,
}

impl AdversaryKind {
    /// Every adversary kind in placement order.
    pub const ALL: [Self; 3] = [Self::Monster, Self::SuperMonster, Self::Bat];

    /// Number of cells covered by a single step.
    #[must_use]
    pub const fn power(self) -> u32 {
        match self {
            Self::SuperMonster => 2,
            Self::Monster | Self::Bat => 1,
        }
    }

    /// Board cell representing the adversary.
    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Self::Monster => Cell::Monster,
            Self::SuperMonster => Cell::SuperMonster,
            Self::Bat => Cell::Bat,
        }
    }

    /// Reports whether the adversary ignores the hero and moves randomly.
    #[must_use]
    pub const fn is_erratic(self) -> bool {
        matches!(self, Self::Bat)
    }
}

/// Location of a single board cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a new board position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the neighbouring position in `direction`, or `None` when it
    /// would leave a `rows` x `columns` board.
    #[must_use]
    pub fn step(self, direction: Direction, rows: u32, columns: u32) -> Option<Self> {
        let (row_delta, column_delta) = direction.delta();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        (row < rows && column < columns).then_some(Self { row, column })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The eight single-step headings available to the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Up and to the right.
    NorthEast,
    /// Toward increasing column indices.
    East,
    /// Down and to the right.
    SouthEast,
    /// Toward increasing row indices.
    South,
    /// Down and to the left.
    SouthWest,
    /// Toward decreasing column indices.
    West,
    /// Up and to the left.
    NorthWest,
}

impl Direction {
    /// Every direction in clockwise order starting north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Row and column offsets of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::East => (0, 1),
            Self::SouthEast => (1, 1),
            Self::South => (1, 0),
            Self::SouthWest => (1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Maps a `(row, column)` delta back to its direction.
    ///
    /// Returns `None` for the zero delta and for offsets longer than one cell.
    #[must_use]
    pub fn from_delta(row: i32, column: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.delta() == (row, column))
    }
}

/// Dense row-major grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board of the provided dimensions filled with [`Cell::Empty`].
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![Cell::Empty; capacity],
        }
    }

    /// Number of rows contained in the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the position lies inside the board.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.column() < self.columns
    }

    /// Returns the cell at `position`, or `None` when it lies outside.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the cell at `position`. Positions outside the board are ignored.
    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = cell;
            }
        }
    }

    /// Iterates over every position and its cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (Position::new(index / columns, index % columns), *cell)
        })
    }

    /// Iterates over the positions holding `cell` in row-major order.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(move |(_, candidate)| *candidate == cell)
            .map(|(position, _)| position)
    }

    /// Counts the cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|candidate| **candidate == cell).count()
    }

    /// Clamps signed coordinates onto the nearest board position.
    ///
    /// Returns `None` only for a board without cells.
    #[must_use]
    pub fn clamp(&self, row: i64, column: i64) -> Option<Position> {
        if self.rows == 0 || self.columns == 0 {
            return None;
        }
        let row = row.clamp(0, i64::from(self.rows) - 1);
        let column = column.clamp(0, i64::from(self.columns) - 1);
        Some(Position::new(
            u32::try_from(row).ok()?,
            u32::try_from(column).ok()?,
        ))
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            let row = usize::try_from(position.row()).ok()?;
            let column = usize::try_from(position.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Board paired with the hero position it was generated or loaded with.
///
/// Construction guarantees exactly one hero and exactly one exit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    board: Board,
    hero: Position,
}

impl Layout {
    /// Validates `board` and locates its hero.
    pub fn new(board: Board) -> Result<Self, LayoutError> {
        let heroes: Vec<Position> = board.positions_of(Cell::Hero).collect();
        let hero = match heroes.as_slice() {
            [] => return Err(LayoutError::MissingHero),
            [hero] => *hero,
            _ => return Err(LayoutError::MultipleHeroes(heroes.len())),
        };

        match board.count(Cell::Exit) {
            0 => return Err(LayoutError::MissingExit),
            1 => {}
            count => return Err(LayoutError::MultipleExits(count)),
        }

        Ok(Self { board, hero })
    }

    /// Board contents of the layout.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Cell occupied by the hero.
    #[must_use]
    pub const fn hero(&self) -> Position {
        self.hero
    }

    /// Consumes the layout, yielding the board and hero position.
    #[must_use]
    pub fn into_parts(self) -> (Board, Position) {
        (self.board, self.hero)
    }
}

/// Reasons a board cannot be used as a round layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The board contains no hero.
    #[error("layout has no hero")]
    MissingHero,
    /// The board contains more than one hero.
    #[error("layout has {0} heroes, expected exactly one")]
    MultipleHeroes(usize),
    /// The board contains no exit.
    #[error("layout has no exit")]
    MissingExit,
    /// The board contains more than one exit.
    #[error("layout has {0} exits, expected exactly one")]
    MultipleExits(usize),
}

/// Named difficulty tier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Sparse hazards and few adversaries.
    Easy,
    /// The default tier.
    #[default]
    Medium,
    /// Dense hazards and many adversaries.
    Hard,
}

impl Difficulty {
    /// Every tier in ascending order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase name used in configuration and persisted scores.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Entity counts placed at level one.
    #[must_use]
    pub const fn base_profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile::new(2, 1, 1, 15),
            Self::Medium => DifficultyProfile::new(4, 2, 2, 30),
            Self::Hard => DifficultyProfile::new(6, 3, 3, 50),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigurationError::UnknownDifficulty(trimmed.to_owned()))
    }
}

/// Entity counts placed into the midsection band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Number of [`Cell::Monster`] entities.
    pub monsters: u32,
    /// Number of [`Cell::SuperMonster`] entities.
    pub super_monsters: u32,
    /// Number of [`Cell::Bat`] entities.
    pub bats: u32,
    /// Number of [`Cell::Abyss`] hazards.
    pub abysses: u32,
}

impl DifficultyProfile {
    /// Creates a profile from explicit counts.
    #[must_use]
    pub const fn new(monsters: u32, super_monsters: u32, bats: u32, abysses: u32) -> Self {
        Self {
            monsters,
            super_monsters,
            bats,
            abysses,
        }
    }

    /// Scales every count by `1 + 0.1 * (level - 1)`, rounding down.
    ///
    /// Level zero is treated as level one.
    #[must_use]
    pub fn scaled_for_level(self, level: u32) -> Self {
        let tenths = 9 + u64::from(level.max(1));
        let scale = |count: u32| {
            let scaled = u64::from(count) * tenths / 10;
            u32::try_from(scaled).unwrap_or(u32::MAX)
        };
        Self {
            monsters: scale(self.monsters),
            super_monsters: scale(self.super_monsters),
            bats: scale(self.bats),
            abysses: scale(self.abysses),
        }
    }

    /// Count configured for a single adversary kind.
    #[must_use]
    pub const fn adversaries(&self, kind: AdversaryKind) -> u32 {
        match kind {
            AdversaryKind::Monster => self.monsters,
            AdversaryKind::SuperMonster => self.super_monsters,
            AdversaryKind::Bat => self.bats,
        }
    }

    /// Total number of entities the profile places.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.monsters)
            + u64::from(self.super_monsters)
            + u64::from(self.bats)
            + u64::from(self.abysses)
    }
}

/// Validated parameters for generating a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoundConfig {
    rows: u32,
    columns: u32,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    level: u32,
}

impl RoundConfig {
    /// Parses the difficulty tier by name and validates the remaining fields.
    pub fn new(
        rows: u32,
        columns: u32,
        difficulty: &str,
        level: u32,
    ) -> Result<Self, ConfigurationError> {
        let difficulty = difficulty.parse::<Difficulty>()?;
        Self::for_difficulty(rows, columns, difficulty, level)
    }

    /// Validates the configuration for an already parsed difficulty tier.
    pub fn for_difficulty(
        rows: u32,
        columns: u32,
        difficulty: Difficulty,
        level: u32,
    ) -> Result<Self, ConfigurationError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigurationError::EmptyBoard { rows, columns });
        }
        if columns < MINIMUM_COLUMNS {
            return Err(ConfigurationError::BandTooNarrow {
                columns,
                minimum: MINIMUM_COLUMNS,
            });
        }
        if level == 0 {
            return Err(ConfigurationError::InvalidLevel(level));
        }

        Ok(Self {
            rows,
            columns,
            difficulty,
            profile: difficulty.base_profile(),
            level,
        })
    }

    /// Replaces the tier's base counts with `profile`.
    #[must_use]
    pub const fn with_profile(mut self, profile: DifficultyProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Configuration for the following level with identical dimensions and tier.
    #[must_use]
    pub const fn next_level(mut self) -> Self {
        self.level = self.level.saturating_add(1);
        self
    }

    /// Number of board rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of board columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Difficulty tier of the round.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Base counts before level scaling.
    #[must_use]
    pub const fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    /// One-based level number.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Base counts scaled for the configured level.
    #[must_use]
    pub fn scaled_profile(&self) -> DifficultyProfile {
        self.profile.scaled_for_level(self.level)
    }

    /// First column of the midsection band.
    #[must_use]
    pub const fn band_start(&self) -> u32 {
        MARGIN_COLUMNS
    }

    /// Number of columns in the midsection band.
    #[must_use]
    pub const fn band_width(&self) -> u32 {
        self.columns.saturating_sub(2 * MARGIN_COLUMNS)
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        let difficulty = Difficulty::default();
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            difficulty,
            profile: difficulty.base_profile(),
            level: 1,
        }
    }
}

/// Reasons a round configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// One of the board dimensions is zero.
    #[error("board dimensions {rows}x{columns} must both be positive")]
    EmptyBoard {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// The board is too narrow for the margins and the wall band.
    #[error("board with {columns} columns is too narrow, at least {minimum} are required")]
    BandTooNarrow {
        /// Requested column count.
        columns: u32,
        /// Smallest supported column count.
        minimum: u32,
    },
    /// The difficulty tier name is not recognised.
    #[error("unknown difficulty tier '{0}', expected easy, medium or hard")]
    UnknownDifficulty(String),
    /// Levels start at one.
    #[error("level {0} is invalid, levels start at 1")]
    InvalidLevel(u32),
    /// More entities were requested than the midsection band can hold.
    #[error("entity density exceeds board capacity: {requested} entities requested, {available} empty cells available")]
    DensityExceedsCapacity {
        /// Number of entities the profile places.
        requested: u64,
        /// Number of empty band cells left after carving walls.
        available: u64,
    },
    /// Generation produced a board violating the layout invariants.
    #[error("generated layout is invalid: {0}")]
    InvalidLayout(#[from] LayoutError),
}

/// Lifecycle of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// The hero may still move.
    Playing,
    /// The hero reached the exit.
    Won,
    /// The hero fell, walked into an adversary, or was caught.
    Lost,
}

impl RoundState {
    /// Reports whether the round accepts no further moves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Tagged result of a resolver or controller action, consumed by presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The hero stepped into an empty cell.
    Moved,
    /// The requested step left the board.
    OutOfBounds,
    /// The requested step hit a wall.
    Blocked,
    /// The hero reached the exit.
    Victory,
    /// The hero stepped into an abyss.
    FellInAbyss,
    /// The hero walked into an adversary.
    Captured,
    /// An adversary walked into the hero.
    CaughtByAdversary,
}

impl Outcome {
    /// Round state implied by the outcome.
    #[must_use]
    pub const fn round_state(self) -> RoundState {
        match self {
            Self::Moved | Self::OutOfBounds | Self::Blocked => RoundState::Playing,
            Self::Victory => RoundState::Won,
            Self::FellInAbyss | Self::Captured | Self::CaughtByAdversary => RoundState::Lost,
        }
    }
}

/// Planned single move of one adversary within a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdversaryStep {
    /// Cell the adversary occupied when the sweep was planned.
    pub origin: Position,
    /// Kind of adversary being moved.
    pub kind: AdversaryKind,
    /// Clamped destination the adversary attempts to enter.
    pub target: Position,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the round with a freshly generated or loaded layout.
    StartRound {
        /// Board and hero position for the new round.
        layout: Layout,
        /// Tier the layout was generated for.
        difficulty: Difficulty,
        /// One-based level the layout was generated for.
        level: u32,
    },
    /// Requests a single hero step.
    MoveHero {
        /// Heading of the step.
        direction: Direction,
    },
    /// Resolves one planned step per adversary, in order.
    StepAdversaries {
        /// Steps in processing order.
        steps: Vec<AdversaryStep>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that a new round began.
    RoundStarted {
        /// Tier of the round.
        difficulty: Difficulty,
        /// Level of the round.
        level: u32,
        /// Starting hero position.
        hero: Position,
    },
    /// Reports how a hero move request was resolved.
    HeroMoveResolved {
        /// Requested heading.
        direction: Direction,
        /// Hero position before the request.
        from: Position,
        /// Requested destination, absent when it lay outside the board.
        target: Option<Position>,
        /// Resolution of the request.
        outcome: Outcome,
    },
    /// Confirms that an adversary relocated.
    AdversaryMoved {
        /// Kind of adversary.
        kind: AdversaryKind,
        /// Cell vacated by the adversary.
        from: Position,
        /// Cell now occupied by the adversary.
        to: Position,
    },
    /// Confirms that an adversary fell into an abyss and left the board.
    AdversaryFell {
        /// Kind of adversary.
        kind: AdversaryKind,
        /// Cell vacated by the adversary.
        from: Position,
        /// Abyss that swallowed the adversary.
        abyss: Position,
    },
    /// Confirms that an adversary entered the hero's cell.
    HeroCaught {
        /// Kind of adversary.
        kind: AdversaryKind,
        /// Cell vacated by the adversary.
        from: Position,
        /// Former hero cell, now held by the adversary.
        at: Position,
    },
    /// Announces that the round reached a terminal state.
    RoundEnded {
        /// Terminal state reached.
        state: RoundState,
        /// Outcome that ended the round.
        outcome: Outcome,
        /// Accepted hero moves at the end of the round.
        move_count: u32,
        /// Tier of the round.
        difficulty: Difficulty,
        /// Level of the round.
        level: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn directions_cover_every_non_zero_delta_once() {
        let mut deltas: Vec<(i32, i32)> = Direction::ALL.iter().map(|d| d.delta()).collect();
        deltas.sort_unstable();
        deltas.dedup();
        assert_eq!(deltas.len(), 8);
        assert!(!deltas.contains(&(0, 0)));
        for direction in Direction::ALL {
            let (row, column) = direction.delta();
            assert_eq!(Direction::from_delta(row, column), Some(direction));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn step_rejects_positions_outside_the_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::North, 5, 5), None);
        assert_eq!(corner.step(Direction::West, 5, 5), None);
        assert_eq!(
            corner.step(Direction::SouthEast, 5, 5),
            Some(Position::new(1, 1))
        );
        assert_eq!(Position::new(4, 4).step(Direction::East, 5, 5), None);
        assert_eq!(Position::new(4, 4).step(Direction::South, 5, 5), None);
    }

    #[test]
    fn glyphs_map_back_to_cells() {
        let cells = [
            Cell::Empty,
            Cell::Hero,
            Cell::Monster,
            Cell::SuperMonster,
            Cell::Bat,
            Cell::Abyss,
            Cell::Wall,
            Cell::Exit,
        ];
        for cell in cells {
            assert_eq!(Cell::from_glyph(cell.glyph()), Some(cell));
        }
        assert_eq!(Cell::from_glyph('?'), None);
    }

    #[test]
    fn super_monsters_step_twice_as_far() {
        assert_eq!(AdversaryKind::Monster.power(), 1);
        assert_eq!(AdversaryKind::SuperMonster.power(), 2);
        assert_eq!(AdversaryKind::Bat.power(), 1);
        assert!(AdversaryKind::Bat.is_erratic());
        assert_eq!(Cell::SuperMonster.adversary(), Some(AdversaryKind::SuperMonster));
        assert!(!Cell::Abyss.is_adversary());
    }

    #[test]
    fn board_iterates_in_row_major_order() {
        let mut board = Board::new(2, 3);
        board.set(Position::new(1, 0), Cell::Bat);
        board.set(Position::new(0, 2), Cell::Monster);
        board.set(Position::new(9, 9), Cell::Wall);

        let occupied: Vec<_> = board
            .iter()
            .filter(|(_, cell)| cell.is_adversary())
            .collect();
        assert_eq!(
            occupied,
            vec![
                (Position::new(0, 2), Cell::Monster),
                (Position::new(1, 0), Cell::Bat)
            ]
        );
        assert_eq!(board.count(Cell::Wall), 0);
        assert_eq!(board.get(Position::new(2, 0)), None);
    }

    #[test]
    fn clamp_pins_coordinates_to_the_edges() {
        let board = Board::new(4, 6);
        assert_eq!(board.clamp(-2, 7), Some(Position::new(0, 5)));
        assert_eq!(board.clamp(5, -1), Some(Position::new(3, 0)));
        assert_eq!(board.clamp(2, 3), Some(Position::new(2, 3)));
        assert_eq!(Board::new(0, 6).clamp(0, 0), None);
    }

    #[test]
    fn layout_requires_single_hero_and_exit() {
        let mut board = Board::new(3, 3);
        assert_eq!(Layout::new(board.clone()), Err(LayoutError::MissingHero));

        board.set(Position::new(0, 0), Cell::Hero);
        assert_eq!(Layout::new(board.clone()), Err(LayoutError::MissingExit));

        board.set(Position::new(2, 2), Cell::Exit);
        let layout = Layout::new(board.clone()).expect("valid layout");
        assert_eq!(layout.hero(), Position::new(0, 0));

        board.set(Position::new(1, 1), Cell::Hero);
        assert_eq!(Layout::new(board.clone()), Err(LayoutError::MultipleHeroes(2)));

        board.set(Position::new(1, 1), Cell::Exit);
        assert_eq!(Layout::new(board), Err(LayoutError::MultipleExits(2)));
    }

    #[test]
    fn profile_scales_linearly_with_level() {
        let medium = Difficulty::Medium.base_profile();
        assert_eq!(medium.scaled_for_level(1), medium);
        assert_eq!(medium.scaled_for_level(2), DifficultyProfile::new(4, 2, 2, 33));
        assert_eq!(medium.scaled_for_level(3), DifficultyProfile::new(4, 2, 2, 36));

        let hard = Difficulty::Hard.base_profile();
        assert_eq!(hard.scaled_for_level(5), DifficultyProfile::new(8, 4, 4, 70));
        assert_eq!(hard.scaled_for_level(11), DifficultyProfile::new(12, 6, 6, 100));
        assert_eq!(hard.scaled_for_level(0), hard);
    }

    #[test]
    fn difficulty_names_parse_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(ConfigurationError::UnknownDifficulty("nightmare".to_owned()))
        );
    }

    #[test]
    fn round_config_rejects_malformed_dimensions() {
        assert_eq!(
            RoundConfig::new(0, 40, "easy", 1),
            Err(ConfigurationError::EmptyBoard {
                rows: 0,
                columns: 40
            })
        );
        assert_eq!(
            RoundConfig::new(15, 12, "easy", 1),
            Err(ConfigurationError::BandTooNarrow {
                columns: 12,
                minimum: MINIMUM_COLUMNS
            })
        );
        assert_eq!(
            RoundConfig::new(15, 40, "easy", 0),
            Err(ConfigurationError::InvalidLevel(0))
        );

        let config = RoundConfig::new(15, 40, "HARD", 2).expect("valid config");
        assert_eq!(config.band_start(), 3);
        assert_eq!(config.band_width(), 34);
        assert_eq!(config.next_level().level(), 3);
        assert_eq!(config.scaled_profile(), DifficultyProfile::new(6, 3, 3, 55));
    }

    #[test]
    fn default_config_matches_reference_board() {
        let config = RoundConfig::default();
        assert_eq!((config.rows(), config.columns()), (15, 40));
        assert_eq!(config.difficulty(), Difficulty::Medium);
        assert_eq!(config.level(), 1);
    }

    #[test]
    fn outcomes_imply_round_states() {
        assert_eq!(Outcome::Moved.round_state(), RoundState::Playing);
        assert_eq!(Outcome::Blocked.round_state(), RoundState::Playing);
        assert_eq!(Outcome::Victory.round_state(), RoundState::Won);
        assert_eq!(Outcome::CaughtByAdversary.round_state(), RoundState::Lost);
        assert!(RoundState::Won.is_terminal());
        assert!(!RoundState::Playing.is_terminal());
    }

    #[test]
    fn contracts_round_trip_through_bincode() {
        assert_round_trip(&Position::new(5, 7));
        assert_round_trip(&Difficulty::Hard);
        assert_round_trip(&Outcome::FellInAbyss);
        assert_round_trip(&DifficultyProfile::new(1, 2, 3, 4));
    }
}
