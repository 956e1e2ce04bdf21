#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn orchestration for Maze Escape.
//!
//! A [`Session`] owns the world, the injected random stream and the systems
//! that react to world events. Every player request runs to completion
//! before the call returns: the hero step is applied, and an accepted step
//! is followed by exactly one adversary sweep.

use maze_escape_core::{
    Board, Command, ConfigurationError, Difficulty, Direction, Event, Layout, Outcome,
    RoundConfig, RoundState,
};
use maze_escape_system_generation::Generation;
use maze_escape_system_pursuit::Pursuit;
use maze_escape_world::{self as world, query, World};
use rand::Rng;
use tracing::{debug, warn};

/// Describes how the current round was set up, so it can be replayed.
#[derive(Clone, Debug)]
enum Blueprint {
    Generated(RoundConfig),
    Loaded {
        layout: Layout,
        difficulty: Difficulty,
        level: u32,
    },
}

/// Combined result of one submitted move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Final outcome of the turn; `None` when the round had already ended.
    ///
    /// A capture during the adversary sweep reports
    /// [`Outcome::CaughtByAdversary`] instead of the hero's `Moved`.
    pub outcome: Option<Outcome>,
    /// Round state after the turn.
    pub round_state: RoundState,
    /// Accepted hero moves after the turn.
    pub move_count: u32,
    /// Every event the world emitted during the turn, in order.
    pub events: Vec<Event>,
}

/// Single-player game session.
#[derive(Debug)]
pub struct Session<R> {
    rng: R,
    world: World,
    blueprint: Blueprint,
    generation: Generation,
    pursuit: Pursuit,
}

impl<R> Session<R>
where
    R: Rng,
{
    /// Starts a session on a freshly generated board.
    pub fn new(config: RoundConfig, mut rng: R) -> Result<Self, ConfigurationError> {
        let generation = Generation::new();
        let layout = generation.generate(&config, &mut rng)?;
        let world = World::new(layout, config.difficulty(), config.level());
        debug!(difficulty = %config.difficulty(), level = config.level(), "session started");
        Ok(Self {
            rng,
            world,
            blueprint: Blueprint::Generated(config),
            generation,
            pursuit: Pursuit::new(),
        })
    }

    /// Starts a session on a prepared layout, such as an imported share code.
    pub fn from_layout(layout: Layout, difficulty: Difficulty, level: u32, rng: R) -> Self {
        let world = World::new(layout.clone(), difficulty, level);
        Self {
            rng,
            world,
            blueprint: Blueprint::Loaded {
                layout,
                difficulty,
                level,
            },
            generation: Generation::new(),
            pursuit: Pursuit::new(),
        }
    }

    /// Replaces the current round with a board generated for `config`.
    ///
    /// The session is left untouched when `config` cannot produce a board.
    pub fn new_round(&mut self, config: RoundConfig) -> Result<Vec<Event>, ConfigurationError> {
        let layout = match self.generation.generate(&config, &mut self.rng) {
            Ok(layout) => layout,
            Err(error) => {
                warn!(%error, "round configuration rejected");
                return Err(error);
            }
        };
        self.blueprint = Blueprint::Generated(config);
        Ok(self.start(layout, config.difficulty(), config.level()))
    }

    /// Replaces the current round with a prepared layout.
    pub fn load_round(&mut self, layout: Layout, difficulty: Difficulty, level: u32) -> Vec<Event> {
        self.blueprint = Blueprint::Loaded {
            layout: layout.clone(),
            difficulty,
            level,
        };
        self.start(layout, difficulty, level)
    }

    /// Starts the current level again.
    ///
    /// Generated rounds receive a fresh board; loaded layouts are replayed
    /// as they were loaded.
    pub fn restart(&mut self) -> Result<Vec<Event>, ConfigurationError> {
        match self.blueprint.clone() {
            Blueprint::Generated(config) => self.new_round(config),
            Blueprint::Loaded {
                layout,
                difficulty,
                level,
            } => Ok(self.start(layout, difficulty, level)),
        }
    }

    /// Generates a board for the level after the current one.
    ///
    /// Dimensions and tier carry over. A loaded layout continues on a
    /// generated board of the same size, which must be wide enough to
    /// generate.
    pub fn next_level(&mut self) -> Result<Vec<Event>, ConfigurationError> {
        let config = match &self.blueprint {
            Blueprint::Generated(config) => config.next_level(),
            Blueprint::Loaded {
                layout,
                difficulty,
                level,
            } => RoundConfig::for_difficulty(
                layout.board().rows(),
                layout.board().columns(),
                *difficulty,
                level.saturating_add(1),
            )?,
        };
        self.new_round(config)
    }

    /// Resolves one hero step and, if it was accepted, the adversary sweep.
    ///
    /// Once the round has ended the call changes nothing and reports no
    /// outcome.
    pub fn submit_move(&mut self, direction: Direction) -> TurnReport {
        let mut events = Vec::new();
        if !self.round_state().is_terminal() {
            world::apply(
                &mut self.world,
                Command::MoveHero { direction },
                &mut events,
            );

            let mut commands = Vec::new();
            self.pursuit.handle(
                &events,
                &query::adversary_view(&self.world),
                query::board(&self.world),
                &mut self.rng,
                &mut commands,
            );
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }

        TurnReport {
            outcome: final_outcome(&events),
            round_state: self.round_state(),
            move_count: self.move_count(),
            events,
        }
    }

    fn start(&mut self, layout: Layout, difficulty: Difficulty, level: u32) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::StartRound {
                layout,
                difficulty,
                level,
            },
            &mut events,
        );
        events
    }
}

impl<R> Session<R> {
    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        query::board(&self.world)
    }

    /// Lifecycle state of the current round.
    #[must_use]
    pub fn round_state(&self) -> RoundState {
        query::round_state(&self.world)
    }

    /// Accepted hero moves in the current round.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        query::move_count(&self.world)
    }

    /// Difficulty tier of the current round.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        query::difficulty(&self.world)
    }

    /// Level of the current round.
    #[must_use]
    pub fn level(&self) -> u32 {
        query::level(&self.world)
    }

    /// Configuration of the current round, absent for loaded layouts.
    #[must_use]
    pub fn config(&self) -> Option<RoundConfig> {
        match &self.blueprint {
            Blueprint::Generated(config) => Some(*config),
            Blueprint::Loaded { .. } => None,
        }
    }
}

/// Outcome that best summarises a turn's events.
fn final_outcome(events: &[Event]) -> Option<Outcome> {
    events.iter().fold(None, |latest, event| match event {
        Event::HeroMoveResolved { outcome, .. } | Event::RoundEnded { outcome, .. } => {
            Some(*outcome)
        }
        _ => latest,
    })
}
