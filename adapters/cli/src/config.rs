//! Round settings gathered from an optional TOML file and command-line flags.
//!
//! Flags win over the file, and the file wins over the built-in defaults.
//!
//! ```toml
//! rows = 20
//! columns = 50
//! difficulty = "hard"
//!
//! [profiles.hard]
//! monsters = 8
//! super_monsters = 4
//! bats = 2
//! abysses = 40
//! ```

use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use maze_escape_core::{Difficulty, DifficultyProfile, RoundConfig, DEFAULT_COLUMNS, DEFAULT_ROWS};
use serde::Deserialize;

/// Flags shared by every subcommand that generates a board.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct RoundArgs {
    /// Difficulty tier: easy, medium or hard.
    #[arg(short, long)]
    pub(crate) difficulty: Option<String>,
    /// Level to start at; entity counts grow ten percent per level.
    #[arg(short, long)]
    pub(crate) level: Option<u32>,
    /// Number of board rows.
    #[arg(long)]
    pub(crate) rows: Option<u32>,
    /// Number of board columns.
    #[arg(long)]
    pub(crate) columns: Option<u32>,
    /// Seed for the random stream; drawn from entropy when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// TOML file providing defaults for the flags above.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

impl RoundArgs {
    /// Resolves the flags, falling back to the configuration file when given.
    pub(crate) fn round_config(&self) -> Result<RoundConfig> {
        let file = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("read {}", path.display()))?;
                FileConfig::parse(&raw).with_context(|| format!("parse {}", path.display()))?
            }
            None => FileConfig::default(),
        };
        file.resolve(self)
    }
}

/// Contents of the optional configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    rows: Option<u32>,
    columns: Option<u32>,
    difficulty: Option<String>,
    level: Option<u32>,
    #[serde(default)]
    profiles: BTreeMap<String, DifficultyProfile>,
}

impl FileConfig {
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid configuration file")
    }

    /// Combines the file with `args`, letting every present flag win.
    pub(crate) fn resolve(&self, args: &RoundArgs) -> Result<RoundConfig> {
        let difficulty = args
            .difficulty
            .as_deref()
            .or(self.difficulty.as_deref())
            .unwrap_or(Difficulty::Medium.name());
        let mut config = RoundConfig::new(
            args.rows.or(self.rows).unwrap_or(DEFAULT_ROWS),
            args.columns.or(self.columns).unwrap_or(DEFAULT_COLUMNS),
            difficulty,
            args.level.or(self.level).unwrap_or(1),
        )?;

        for (name, profile) in &self.profiles {
            let tier: Difficulty = name
                .parse()
                .with_context(|| format!("profile section [profiles.{name}]"))?;
            if tier == config.difficulty() {
                config = config.with_profile(*profile);
            }
        }

        Ok(config)
    }
}
