//! Adversary sweep resolution.
//!
//! A sweep applies planned [`AdversaryStep`] values one after another against
//! the board as it evolves, so later steps observe cells vacated or filled by
//! earlier ones. Cells entered during the sweep are remembered and never
//! processed a second time.

use std::collections::HashSet;

use maze_escape_core::{AdversaryStep, Board, Cell, Event, Outcome, RoundState};

/// Result of resolving a full adversary sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepResolution {
    /// `Lost` when any adversary entered the hero's cell, `Playing` otherwise.
    pub round_state: RoundState,
    /// `CaughtByAdversary` when the hero was caught.
    pub outcome: Option<Outcome>,
}

/// Resolves `steps` in order, mutating `board` in place.
///
/// A capture does not stop the sweep; the remaining adversaries still move.
pub fn resolve_adversary_steps(
    board: &mut Board,
    steps: &[AdversaryStep],
    out_events: &mut Vec<Event>,
) -> SweepResolution {
    let mut moved = HashSet::with_capacity(steps.len());
    let mut caught = false;

    for step in steps {
        let AdversaryStep {
            origin,
            kind,
            target,
        } = *step;

        if moved.contains(&origin) || board.get(origin) != Some(kind.cell()) {
            continue;
        }

        let Some(destination) = board.get(target) else {
            continue;
        };

        match destination {
            Cell::Wall | Cell::Exit => {}
            Cell::Monster | Cell::SuperMonster | Cell::Bat => {}
            Cell::Abyss => {
                board.set(origin, Cell::Empty);
                let _ = moved.insert(origin);
                out_events.push(Event::AdversaryFell {
                    kind,
                    from: origin,
                    abyss: target,
                });
            }
            Cell::Hero => {
                board.set(target, kind.cell());
                board.set(origin, Cell::Empty);
                let _ = moved.insert(target);
                caught = true;
                out_events.push(Event::HeroCaught {
                    kind,
                    from: origin,
                    at: target,
                });
            }
            Cell::Empty => {
                board.set(target, kind.cell());
                board.set(origin, Cell::Empty);
                let _ = moved.insert(target);
                out_events.push(Event::AdversaryMoved {
                    kind,
                    from: origin,
                    to: target,
                });
            }
        }
    }

    if caught {
        SweepResolution {
            round_state: RoundState::Lost,
            outcome: Some(Outcome::CaughtByAdversary),
        }
    } else {
        SweepResolution {
            round_state: RoundState::Playing,
            outcome: None,
        }
    }
}
