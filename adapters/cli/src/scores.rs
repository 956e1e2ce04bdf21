//! Scoreboard persistence as a single pretty-printed JSON document.

use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use maze_escape_system_scoreboard::Scoreboard;

/// File used when `--scores` is not given.
pub(crate) const DEFAULT_SCORES_PATH: &str = "maze-escape-scores.json";

/// Loads the scoreboard at `path`; a missing file yields an empty board.
pub(crate) fn load(path: &Path) -> Result<Scoreboard> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Scoreboard::new()),
        Err(error) => return Err(error).with_context(|| format!("read {}", path.display())),
    };
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

/// Writes `scoreboard` to `path` with a trailing newline.
pub(crate) fn save(path: &Path, scoreboard: &Scoreboard) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(scoreboard).context("serialize scoreboard")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use maze_escape_core::Difficulty;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("maze-escape-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_is_an_empty_scoreboard() {
        let scoreboard = load(&scratch("missing")).expect("missing file is fine");
        assert!(scoreboard.entries(Difficulty::Medium).is_empty());
    }

    #[test]
    fn saved_scores_load_back() {
        let path = scratch("round-trip");
        let mut scoreboard = Scoreboard::new();
        let _ = scoreboard.record(Difficulty::Medium, "Ada", 21, 2, Utc::now());

        save(&path, &scoreboard).expect("scores save");
        let restored = load(&path).expect("scores load");
        fs::remove_file(&path).expect("scratch file removed");

        assert_eq!(restored, scoreboard);
    }

    #[test]
    fn corrupt_files_are_reported() {
        let path = scratch("corrupt");
        fs::write(&path, "not json").expect("scratch file written");

        let error = load(&path).expect_err("file is corrupt");
        fs::remove_file(&path).expect("scratch file removed");

        assert!(error.to_string().starts_with("parse "));
    }
}
