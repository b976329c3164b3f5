//! Command-line access to the preference store and match ranker.

mod commands;

pub use commands::{execute, format_preferences, run, summarize_matches};

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use ::config::ConfigError;
use std::path::PathBuf;

use crate::config::{default_store_path, Settings, StorageSettings};
use crate::core::{DEFAULT_LIMIT, DEFAULT_MIN_SCORE};

#[derive(Debug, Parser)]
#[command(
    name = "bg3-connector-cli",
    about = "Find co-op partners for Baldur's Gate 3",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the preferences store
    #[arg(long, global = true, default_value_os_t = default_store_path())]
    pub store: PathBuf,

    /// Use a PostgreSQL store at this URL instead of the JSON file
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Settings file for scoring weights; defaults to config/default and config/local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// Load the same layered settings the server uses
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        }
    }

    pub fn storage_settings(&self) -> StorageSettings {
        match &self.database_url {
            Some(url) => StorageSettings::postgres(url.clone()),
            None => StorageSettings::file(self.store.clone()),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add or update a player's preferences
    Add(AddArgs),
    /// Remove a player from the store
    Remove(RemoveArgs),
    /// List all stored players
    List(ListArgs),
    /// Find matches for a player
    Match(MatchArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Unique identifier or handle for the player
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub player_id: String,
    /// Preferred platform, e.g. PC or PS5
    pub platform: String,
    /// Desired game mode, e.g. campaign or honour
    pub game_mode: String,
    /// Character level range, e.g. 1-5
    pub level_range: String,
    /// Voice chat preference: required/optional/none
    pub voice_chat: String,
    /// Player timezone or preferred play window
    pub timezone: String,
    /// Descriptive tag such as 'roleplay' or 'modded'; repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Free-form notes for potential teammates
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Identifier of the player to remove
    pub player_id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show detailed preferences
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Identifier of the player seeking matches
    pub player_id: String,
    /// Minimum compatibility score to consider a match
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE, allow_negative_numbers = true)]
    pub min_score: i64,
    /// Maximum number of matches to return (use 0 for no limit)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    #[test]
    fn test_parse_add_with_tags() {
        let cli = Cli::try_parse_from([
            "bg3-connector-cli", "--store", "/tmp/p.json", "add", "tav", "PC", "campaign", "1-5",
            "required", "EST", "--tag", "roleplay", "--tag", "modded", "--notes", "hi",
        ])
        .unwrap();

        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.player_id, "tav");
                assert_eq!(args.tags, vec!["roleplay", "modded"]);
                assert_eq!(args.notes.as_deref(), Some("hi"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_rejects_empty_id() {
        let result = Cli::try_parse_from([
            "bg3-connector-cli", "add", "", "PC", "campaign", "1-5", "required", "EST",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_settings_from_config_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[scoring.weights]\nplatform = 7").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from(["bg3-connector-cli", "--config", &path, "list"]).unwrap();
        let weights = cli.settings().unwrap().scoring_weights();

        assert_eq!(weights.platform, 7);
        assert_eq!(weights.game_mode, 3);
    }

    #[test]
    fn test_match_defaults() {
        let cli = Cli::try_parse_from(["bg3-connector-cli", "match", "tav"]).unwrap();

        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.min_score, 4);
                assert_eq!(args.limit, 10);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_storage_selection() {
        let file = Cli::try_parse_from(["bg3-connector-cli", "--store", "/tmp/p.json", "list"]).unwrap();
        assert_eq!(file.storage_settings().backend, StorageBackend::File);
        assert_eq!(file.storage_settings().path, PathBuf::from("/tmp/p.json"));

        let pg = Cli::try_parse_from([
            "bg3-connector-cli", "--database-url", "postgres://localhost/bg3", "list",
        ])
        .unwrap();
        assert_eq!(pg.storage_settings().backend, StorageBackend::Postgres);
    }
}
