//! Hero movement resolution.

use maze_escape_core::{Board, Cell, Direction, Outcome, Position, RoundState};

/// Result of resolving a single hero step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroMove {
    /// How the step was resolved.
    pub outcome: Outcome,
    /// Requested destination, absent when it lay outside the board.
    pub target: Option<Position>,
    /// Hero position after the step, absent once the hero left the board.
    pub hero: Option<Position>,
}

impl HeroMove {
    /// Round state implied by the resolution.
    #[must_use]
    pub const fn round_state(&self) -> RoundState {
        self.outcome.round_state()
    }
}

/// Applies one hero step to `board` in place.
///
/// Rejected steps (`OutOfBounds`, `Blocked`) leave the board untouched. Every
/// other outcome clears the hero's current cell; only `Moved` re-places the
/// hero on the target.
pub fn apply_hero_move(board: &mut Board, hero: Position, direction: Direction) -> HeroMove {
    let rejected = |outcome, target| HeroMove {
        outcome,
        target,
        hero: Some(hero),
    };

    let Some(target) = hero.step(direction, board.rows(), board.columns()) else {
        return rejected(Outcome::OutOfBounds, None);
    };
    let Some(cell) = board.get(target) else {
        return rejected(Outcome::OutOfBounds, None);
    };

    let outcome = match cell {
        // A second hero cannot exist; treat it like any other obstacle.
        Cell::Wall | Cell::Hero => return rejected(Outcome::Blocked, Some(target)),
        Cell::Exit => Outcome::Victory,
        Cell::Abyss => Outcome::FellInAbyss,
        Cell::Monster | Cell::SuperMonster | Cell::Bat => Outcome::Captured,
        Cell::Empty => Outcome::Moved,
    };

    board.set(hero, Cell::Empty);
    if outcome == Outcome::Moved {
        board.set(target, Cell::Hero);
        return HeroMove {
            outcome,
            target: Some(target),
            hero: Some(target),
        };
    }

    HeroMove {
        outcome,
        target: Some(target),
        hero: None,
    }
}
