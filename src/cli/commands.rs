use crate::cli::{AddArgs, Cli, Command};
use crate::core::{MatchLimit, Matcher};
use crate::models::{PlayerPreferences, ScoredMatch};
use crate::services::{connect_store, PreferenceStore, StoreError};

/// Open the configured store and run one command, returning the text to print
///
/// Scoring weights come from the same settings layers as the server, so both
/// rank a shared store identically.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let settings = cli.settings()?;
    let matcher = Matcher::new(settings.scoring_weights());
    let store = connect_store(&cli.storage_settings()).await?;
    Ok(execute(&cli.command, store.as_ref(), &matcher).await?)
}

pub async fn execute(
    command: &Command,
    store: &dyn PreferenceStore,
    matcher: &Matcher,
) -> Result<String, StoreError> {
    match command {
        Command::Add(args) => {
            let preferences = preferences_from_args(args);
            store.upsert(&preferences).await?;
            Ok(format!("Stored preferences for {}.", preferences.player_id))
        }
        Command::Remove(args) => {
            if store.remove(&args.player_id).await? {
                Ok(format!("Removed preferences for {}.", args.player_id))
            } else {
                Ok(format!("No preferences found for {}.", args.player_id))
            }
        }
        Command::List(args) => {
            let preferences = store.list_all().await?;
            if preferences.is_empty() {
                return Ok("No players found in the store.".to_string());
            }
            Ok(format_preferences(&preferences, args.verbose))
        }
        Command::Match(args) => {
            let Some(seeker) = store.get(&args.player_id).await? else {
                return Ok("Player not found. Add them first with the 'add' command \
                           or ensure the ID is correct."
                    .to_string());
            };
            let candidates = store.candidates_for(&seeker.player_id).await?;
            let result = matcher.rank(
                &seeker,
                candidates,
                args.min_score,
                MatchLimit::from_request(args.limit),
            );
            if result.matches.is_empty() {
                return Ok("No compatible players were found.".to_string());
            }
            Ok(summarize_matches(&result.matches))
        }
    }
}

fn preferences_from_args(args: &AddArgs) -> PlayerPreferences {
    PlayerPreferences {
        player_id: args.player_id.clone(),
        platform: args.platform.clone(),
        game_mode: args.game_mode.clone(),
        level_range: args.level_range.clone(),
        voice_chat: args.voice_chat.clone(),
        timezone: args.timezone.clone(),
        notes: args.notes.clone(),
        tags: args.tags.iter().cloned().collect(),
    }
}

fn join_tags(preferences: &PlayerPreferences) -> String {
    if preferences.tags.is_empty() {
        "none".to_string()
    } else {
        preferences.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// One line per player, or a detail block per player when `verbose`
pub fn format_preferences(preferences: &[PlayerPreferences], verbose: bool) -> String {
    preferences
        .iter()
        .map(|p| {
            let base = format!("{} — {}, {}, {}", p.player_id, p.platform, p.game_mode, p.level_range);
            if !verbose {
                return base;
            }
            format!(
                "{}\n  Voice chat: {}\n  Timezone: {}\n  Tags: {}\n  Notes: {}",
                base,
                p.voice_chat,
                p.timezone,
                join_tags(p),
                p.notes.as_deref().unwrap_or("none"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Human readable summary of ranked matches
pub fn summarize_matches(matches: &[ScoredMatch]) -> String {
    matches
        .iter()
        .map(|m| {
            let p = &m.player;
            format!(
                "{} — score {}\n  Platform: {}\n  Mode: {}\n  Level range: {}\n  \
                 Voice chat: {}\n  Timezone: {}\n  Tags: {}\n  Notes: {}",
                p.player_id,
                m.score,
                p.platform,
                p.game_mode,
                p.level_range,
                p.voice_chat,
                p.timezone,
                join_tags(p),
                p.notes.as_deref().unwrap_or("none"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
