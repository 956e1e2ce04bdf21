#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Adversary planning system that reacts to hero moves.
//!
//! After every accepted hero step the system snapshots the adversaries in
//! row-major order and proposes one clamped target per adversary. Monsters
//! and super-monsters close in on the hero along both axes at once, ignoring
//! obstacles; bats pick a random heading. The world resolves the proposed
//! steps in the order they are emitted.

use maze_escape_core::{AdversaryKind, AdversaryStep, Board, Command, Event, Outcome, Position};
use maze_escape_world::query::AdversaryView;
use rand::Rng;

/// Pure system that emits one adversary sweep per accepted hero move.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Creates a new pursuit system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and the adversary view to emit sweep commands.
    ///
    /// Only a `HeroMoveResolved` event with outcome [`Outcome::Moved`]
    /// triggers a sweep; every other event is ignored.
    pub fn handle<R>(
        &mut self,
        events: &[Event],
        adversaries: &AdversaryView,
        board: &Board,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng,
    {
        for event in events {
            let Event::HeroMoveResolved {
                outcome: Outcome::Moved,
                target: Some(hero),
                ..
            } = event
            else {
                continue;
            };

            let steps = plan_sweep(adversaries, *hero, board, rng);
            if !steps.is_empty() {
                out.push(Command::StepAdversaries { steps });
            }
        }
    }
}

/// Plans one step for every adversary in the view, preserving view order.
pub fn plan_sweep<R>(
    adversaries: &AdversaryView,
    hero: Position,
    board: &Board,
    rng: &mut R,
) -> Vec<AdversaryStep>
where
    R: Rng,
{
    adversaries
        .iter()
        .filter_map(|snapshot| plan_step(snapshot.kind, snapshot.position, hero, board, rng))
        .collect()
}

/// Plans the step of a single adversary located at `origin`.
///
/// Returns `None` only for a board without cells.
pub fn plan_step<R>(
    kind: AdversaryKind,
    origin: Position,
    hero: Position,
    board: &Board,
    rng: &mut R,
) -> Option<AdversaryStep>
where
    R: Rng,
{
    let (row_heading, column_heading) = heading(kind, origin, hero, rng);
    let power = i64::from(kind.power());
    let target = board.clamp(
        i64::from(origin.row()) + row_heading * power,
        i64::from(origin.column()) + column_heading * power,
    )?;

    Some(AdversaryStep {
        origin,
        kind,
        target,
    })
}

/// Unit heading of an adversary, each axis in `-1..=1`.
///
/// Bats draw the row heading first, then the column heading.
pub fn heading<R>(
    kind: AdversaryKind,
    origin: Position,
    hero: Position,
    rng: &mut R,
) -> (i64, i64)
where
    R: Rng,
{
    if kind.is_erratic() {
        let row = rng.gen_range(0..3_i64) - 1;
        let column = rng.gen_range(0..3_i64) - 1;
        return (row, column);
    }

    let toward = |from: u32, to: u32| i64::from(to.cmp(&from) as i8);
    (
        toward(origin.row(), hero.row()),
        toward(origin.column(), hero.column()),
    )
}
