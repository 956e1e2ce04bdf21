#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state management for Maze Escape.

pub mod hero;
pub mod sweep;

use maze_escape_core::{
    Board, Command, Difficulty, Event, Layout, Outcome, Position, RoundState, WELCOME_BANNER,
};
use tracing::{debug, info};

/// Represents the authoritative state of a single round.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    hero: Option<Position>,
    move_count: u32,
    round_state: RoundState,
    difficulty: Difficulty,
    level: u32,
}

impl World {
    /// Creates a world playing the provided layout.
    #[must_use]
    pub fn new(layout: Layout, difficulty: Difficulty, level: u32) -> Self {
        let (board, hero) = layout.into_parts();
        Self {
            banner: WELCOME_BANNER,
            board,
            hero: Some(hero),
            move_count: 0,
            round_state: RoundState::Playing,
            difficulty,
            level,
        }
    }

    fn start_round(&mut self, layout: Layout, difficulty: Difficulty, level: u32) {
        let (board, hero) = layout.into_parts();
        self.board = board;
        self.hero = Some(hero);
        self.move_count = 0;
        self.round_state = RoundState::Playing;
        self.difficulty = difficulty;
        self.level = level;
    }

    fn end_round(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.round_state = outcome.round_state();
        info!(
            state = ?self.round_state,
            ?outcome,
            move_count = self.move_count,
            level = self.level,
            "round ended"
        );
        out_events.push(Event::RoundEnded {
            state: self.round_state,
            outcome,
            move_count: self.move_count,
            difficulty: self.difficulty,
            level: self.level,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRound {
            layout,
            difficulty,
            level,
        } => {
            let hero = layout.hero();
            world.start_round(layout, difficulty, level);
            info!(%difficulty, level, %hero, "round started");
            out_events.push(Event::RoundStarted {
                difficulty,
                level,
                hero,
            });
        }
        Command::MoveHero { direction } => {
            if world.round_state.is_terminal() {
                debug!(state = ?world.round_state, ?direction, "ignoring move after round end");
                return;
            }
            let Some(from) = world.hero else {
                return;
            };

            let resolution = hero::apply_hero_move(&mut world.board, from, direction);
            world.hero = resolution.hero;
            if resolution.outcome == Outcome::Moved {
                world.move_count = world.move_count.saturating_add(1);
            }
            debug!(?direction, %from, outcome = ?resolution.outcome, "hero move resolved");
            out_events.push(Event::HeroMoveResolved {
                direction,
                from,
                target: resolution.target,
                outcome: resolution.outcome,
            });

            if resolution.round_state().is_terminal() {
                world.end_round(resolution.outcome, out_events);
            }
        }
        Command::StepAdversaries { steps } => {
            if world.round_state.is_terminal() {
                return;
            }

            let resolution = sweep::resolve_adversary_steps(&mut world.board, &steps, out_events);
            debug!(
                steps = steps.len(),
                state = ?resolution.round_state,
                "adversary sweep resolved"
            );
            if let Some(outcome) = resolution.outcome {
                world.hero = None;
                world.end_round(outcome, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_escape_core::{AdversaryKind, Board, Difficulty, Position, RoundState};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the board.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Cell occupied by the hero, absent once the hero left the board.
    #[must_use]
    pub fn hero(world: &World) -> Option<Position> {
        world.hero
    }

    /// Number of accepted hero moves in the current round.
    #[must_use]
    pub fn move_count(world: &World) -> u32 {
        world.move_count
    }

    /// Lifecycle state of the current round.
    #[must_use]
    pub fn round_state(world: &World) -> RoundState {
        world.round_state
    }

    /// Difficulty tier of the current round.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.difficulty
    }

    /// Level of the current round.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Captures every adversary on the board in row-major discovery order.
    #[must_use]
    pub fn adversary_view(world: &World) -> AdversaryView {
        let snapshots = world
            .board
            .iter()
            .filter_map(|(position, cell)| {
                cell.adversary()
                    .map(|kind| AdversarySnapshot { position, kind })
            })
            .collect();
        AdversaryView { snapshots }
    }

    /// Read-only snapshot describing all adversaries on the board.
    #[derive(Clone, Debug, Default)]
    pub struct AdversaryView {
        snapshots: Vec<AdversarySnapshot>,
    }

    impl AdversaryView {
        /// Iterator over the captured snapshots in row-major order.
        pub fn iter(&self) -> impl Iterator<Item = &AdversarySnapshot> {
            self.snapshots.iter()
        }

        /// Number of adversaries captured.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no adversary was captured.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<AdversarySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single adversary used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AdversarySnapshot {
        /// Cell occupied by the adversary.
        pub position: Position,
        /// Kind of adversary.
        pub kind: AdversaryKind,
    }
}
