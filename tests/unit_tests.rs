// Unit tests for BG3 Connector

use bg3_connector::core::{calculate_compatibility_score, MatchLimit, Matcher, DEFAULT_MIN_SCORE};
use bg3_connector::models::{PlayerPreferences, ScoringWeights};
use serde_json::{json, Value};

fn create_player(
    id: &str,
    platform: &str,
    game_mode: &str,
    level_range: &str,
    voice_chat: &str,
    timezone: &str,
    tags: &[&str],
) -> PlayerPreferences {
    PlayerPreferences {
        player_id: id.to_string(),
        platform: platform.to_string(),
        game_mode: game_mode.to_string(),
        level_range: level_range.to_string(),
        voice_chat: voice_chat.to_string(),
        timezone: timezone.to_string(),
        notes: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn roster() -> Vec<PlayerPreferences> {
    vec![
        create_player("A", "PC", "campaign", "1-5", "required", "EST", &["roleplay"]),
        create_player("B", "PC", "campaign", "1-5", "optional", "PST", &["roleplay", "modded"]),
        create_player("C", "Xbox", "honour", "10-12", "none", "JST", &["speedrun"]),
        create_player("D", "PS5", "campaign", "6-9", "required", "EST", &["roleplay", "chill"]),
        create_player("E", "PC", "custom", "1-5", "none", "CET", &[]),
        create_player("F", "PC", "campaign", "1-5", "required", "EST", &["roleplay", "modded", "chill"]),
    ]
}

#[test]
fn test_documented_scenario_scores_nine() {
    let seeker = create_player("A", "PC", "campaign", "1-5", "required", "EST", &["roleplay"]);
    let candidate = create_player("B", "PC", "campaign", "1-5", "optional", "PST", &["roleplay", "modded"]);

    assert_eq!(calculate_compatibility_score(&seeker, &candidate, &ScoringWeights::default()), 9);
}

#[test]
fn test_scoring_symmetric_across_roster() {
    let weights = ScoringWeights::default();
    let players = roster();

    for a in &players {
        for b in &players {
            assert_eq!(
                calculate_compatibility_score(a, b, &weights),
                calculate_compatibility_score(b, a, &weights),
                "asymmetric score between {} and {}",
                a.player_id,
                b.player_id
            );
        }
    }
}

#[test]
fn test_self_comparison_is_maximum() {
    let weights = ScoringWeights::default();

    for player in roster() {
        let expected = 3 + 3 + 2 + 1 + 1 + player.tags.len() as i64;
        assert_eq!(calculate_compatibility_score(&player, &player, &weights), expected);

        for other in roster() {
            assert!(calculate_compatibility_score(&player, &other, &weights) <= expected);
        }
    }
}

#[test]
fn test_ranking_properties() {
    let matcher = Matcher::with_default_weights();
    let players = roster();

    for seeker in &players {
        let result = matcher.rank(seeker, players.clone(), DEFAULT_MIN_SCORE, MatchLimit::Unbounded);

        assert!(result.matches.iter().all(|m| m.player.player_id != seeker.player_id));
        assert!(result.matches.iter().all(|m| m.score >= DEFAULT_MIN_SCORE));
        for pair in result.matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn test_limit_three_yields_at_most_three() {
    let matcher = Matcher::with_default_weights();
    let players = roster();
    let seeker = &players[0];

    let limited = matcher.rank(seeker, players.clone(), 0, MatchLimit::AtMost(3));
    let unbounded = matcher.rank(seeker, players.clone(), 0, MatchLimit::Unbounded);

    assert_eq!(limited.matches.len(), 3);
    assert_eq!(unbounded.matches.len(), players.len() - 1);
    assert_eq!(limited.matches[..], unbounded.matches[..3]);
}

#[test]
fn test_only_qualifying_candidate_returned() {
    let matcher = Matcher::with_default_weights();
    let a = create_player("A", "PC", "campaign", "1-5", "required", "EST", &["roleplay"]);
    let b = create_player("B", "PC", "campaign", "1-5", "optional", "PST", &["roleplay", "modded"]);
    let c = create_player("C", "Xbox", "honour", "10-12", "none", "JST", &["speedrun"]);

    let result = matcher.rank(&a, vec![a.clone(), b.clone(), c], 4, MatchLimit::AtMost(10));

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].player, b);
    assert_eq!(result.matches[0].score, 9);
}

#[test]
fn test_equal_scores_ordered_by_player_id() {
    let matcher = Matcher::with_default_weights();
    let seeker = create_player("seeker", "PC", "campaign", "1-5", "required", "EST", &[]);
    let candidates = vec![
        create_player("zed", "PC", "campaign", "1-5", "required", "EST", &[]),
        create_player("amy", "PC", "campaign", "1-5", "required", "EST", &[]),
        create_player("kim", "PC", "campaign", "1-5", "required", "EST", &[]),
    ];

    let result = matcher.rank(&seeker, candidates, 0, MatchLimit::Unbounded);
    let ids: Vec<&str> = result.matches.iter().map(|m| m.player.player_id.as_str()).collect();

    assert_eq!(ids, vec!["amy", "kim", "zed"]);
}

#[test]
fn test_record_round_trip_through_map() {
    for player in roster() {
        let map = player.to_map();
        assert!(matches!(map["tags"], Value::Array(_)));
        assert_eq!(PlayerPreferences::from_map(map).unwrap(), player);
    }
}

#[test]
fn test_match_result_interchange_shape() {
    let matcher = Matcher::with_default_weights();
    let players = roster();

    let result = matcher.rank(&players[0], players.clone(), 9, MatchLimit::AtMost(1));
    let value = serde_json::to_value(&result.matches).unwrap();

    assert_eq!(value[0]["player"]["player_id"], json!("F"));
    assert_eq!(value[0]["player"]["tags"], json!(["chill", "modded", "roleplay"]));
    assert_eq!(value[0]["score"], json!(11));
}
