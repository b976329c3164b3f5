use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse, MatchQuery, PlayerPayload};
use crate::services::{PreferenceStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PreferenceStore>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all player routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/players", web::get().to(list_players))
        .route("/players", web::post().to(upsert_player))
        .route("/players/{player_id}", web::get().to(get_player))
        .route("/players/{player_id}", web::delete().to(delete_player))
        .route("/players/{player_id}/matches", web::get().to(find_matches));
}

fn store_failure(context: &str, err: StoreError) -> HttpResponse {
    if let StoreError::InvalidRecord(e) = &err {
        tracing::info!("{}: {}", context, e);
        return HttpResponse::BadRequest().json(ErrorResponse::new(context, e.to_string(), 400));
    }
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(context, err.to_string(), 500))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.backend_name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List every stored player
///
/// GET /api/v1/players
async fn list_players(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_all().await {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => store_failure("Failed to list players", e),
    }
}

/// Create or replace a player's preferences
///
/// POST /api/v1/players
///
/// Request body:
/// ```json
/// {
///   "player_id": "string",
///   "platform": "PC",
///   "game_mode": "campaign",
///   "level_range": "1-5",
///   "voice_chat": "required",
///   "timezone": "EST",
///   "notes": "string",
///   "tags": ["roleplay"]
/// }
/// ```
/// Only `player_id` is required; other fields fall back to their defaults.
async fn upsert_player(
    state: web::Data<AppState>,
    req: web::Json<PlayerPayload>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for player {:?}: {:?}", req.preferences.player_id, errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let preferences = req.into_inner().into_preferences();

    if let Err(e) = state.store.upsert(&preferences).await {
        return store_failure("Failed to store player", e);
    }

    match state.store.get(&preferences.player_id).await {
        Ok(Some(stored)) => HttpResponse::Created().json(stored),
        Ok(None) => {
            tracing::error!("Player {} missing right after upsert", preferences.player_id);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to store player",
                "record was not visible after write",
                500,
            ))
        }
        Err(e) => store_failure("Failed to read back player", e),
    }
}

/// Fetch one player
///
/// GET /api/v1/players/{player_id}
async fn get_player(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let player_id = path.into_inner();

    match state.store.get(&player_id).await {
        Ok(Some(player)) => HttpResponse::Ok().json(player),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::player_not_found(&player_id)),
        Err(e) => store_failure("Failed to fetch player", e),
    }
}

/// Remove a player
///
/// DELETE /api/v1/players/{player_id}
async fn delete_player(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let player_id = path.into_inner();

    match state.store.remove(&player_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::player_not_found(&player_id)),
        Err(e) => store_failure("Failed to remove player", e),
    }
}

/// Find matches endpoint
///
/// GET /api/v1/players/{player_id}/matches?min_score=4&limit=10
///
/// `limit=0` returns every candidate at or above `min_score`.
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> impl Responder {
    let player_id = path.into_inner();
    let min_score = query.min_score.unwrap_or(state.matching.min_score);
    let limit = state.matching.resolve_limit(query.limit);

    tracing::info!(
        "Finding matches for player: {}, min_score: {}, limit: {:?}",
        player_id,
        min_score,
        limit
    );

    let seeker = match state.store.get(&player_id).await {
        Ok(Some(seeker)) => seeker,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse::player_not_found(&player_id));
        }
        Err(e) => return store_failure("Failed to fetch player", e),
    };

    let candidates = match state.store.candidates_for(&player_id).await {
        Ok(candidates) => candidates,
        Err(e) => return store_failure("Failed to load candidates", e),
    };

    let result = state.matcher.rank(&seeker, candidates, min_score, limit);

    tracing::info!(
        "Returning {} matches for player {} (from {} candidates)",
        result.matches.len(),
        player_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(result.matches)
}
