//! Text rendering of boards, outcomes and score lists.

use std::fmt::Write as _;

use maze_escape_core::{Board, Difficulty, Outcome, Position};
use maze_escape_system_scoreboard::Scoreboard;

/// Draws `board` one glyph per cell inside a frame.
pub(crate) fn board(board: &Board) -> String {
    let border = format!("+{}+", "-".repeat(board.columns() as usize));
    let mut out = String::with_capacity((border.len() + 1) * (board.rows() as usize + 2));
    out.push_str(&border);
    out.push('\n');
    for row in 0..board.rows() {
        out.push('|');
        out.extend((0..board.columns()).map(|column| {
            board
                .get(Position::new(row, column))
                .map_or(' ', |cell| cell.glyph())
        }));
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

/// Status line printed above the board.
pub(crate) fn status(difficulty: Difficulty, level: u32, move_count: u32) -> String {
    format!(
        "{} | level {level} | moves {move_count}",
        difficulty.name().to_uppercase()
    )
}

/// Player-facing message for the outcome of a turn.
pub(crate) const fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Moved => "Navigate to the exit!",
        Outcome::OutOfBounds => "Cannot move out of bounds!",
        Outcome::Blocked => "Cannot move through wall!",
        Outcome::Victory => "Level complete! Press n for the next level.",
        Outcome::FellInAbyss => "You fell into the abyss! Press r to try again.",
        Outcome::Captured => "You walked into an adversary! Press r to try again.",
        Outcome::CaughtByAdversary => "An adversary caught you! Press r to try again.",
    }
}

/// Ranked score list of one tier.
pub(crate) fn scores(scoreboard: &Scoreboard, difficulty: Difficulty) -> String {
    let mut out = format!("{} leaderboard\n", difficulty.name().to_uppercase());
    let entries = scoreboard.entries(difficulty);
    if entries.is_empty() {
        out.push_str("  No scores yet.\n");
        return out;
    }
    for (rank, entry) in entries.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{:>3}. {:<16} {:>4} moves  level {:<3} {}",
            rank + 1,
            entry.name,
            entry.moves,
            entry.level,
            entry.recorded_at.format("%Y-%m-%d"),
        );
    }
    out
}
