use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::PlayerPreferences;
use crate::services::store::{PreferenceStore, StoreError};

/// PostgreSQL-backed preference store
///
/// Records live in the `player_preferences` table; tags are kept as a
/// `TEXT[]` column in sorted order.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL preference store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn record_from_row(row: &PgRow) -> Result<PlayerPreferences, sqlx::Error> {
    let tags: Vec<String> = row.try_get("tags")?;

    Ok(PlayerPreferences {
        player_id: row.try_get("player_id")?,
        platform: row.try_get("platform")?,
        game_mode: row.try_get("game_mode")?,
        level_range: row.try_get("level_range")?,
        voice_chat: row.try_get("voice_chat")?,
        timezone: row.try_get("timezone")?,
        notes: row.try_get("notes")?,
        tags: tags.into_iter().collect(),
    })
}

#[async_trait]
impl PreferenceStore for PostgresStore {
    async fn get(&self, player_id: &str) -> Result<Option<PlayerPreferences>, StoreError> {
        let query = r#"
            SELECT player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags
            FROM player_preferences
            WHERE player_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(record_from_row).transpose()?)
    }

    async fn list_all(&self) -> Result<Vec<PlayerPreferences>, StoreError> {
        let query = r#"
            SELECT player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags
            FROM player_preferences
            ORDER BY player_id COLLATE "C"
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} records from PostgreSQL", records.len());
        Ok(records)
    }

    /// Uses INSERT ... ON CONFLICT so a second write replaces every column.
    async fn upsert(&self, record: &PlayerPreferences) -> Result<(), StoreError> {
        record.ensure_valid()?;
        let query = r#"
            INSERT INTO player_preferences
                (player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            ON CONFLICT (player_id)
            DO UPDATE SET
                platform = EXCLUDED.platform,
                game_mode = EXCLUDED.game_mode,
                level_range = EXCLUDED.level_range,
                voice_chat = EXCLUDED.voice_chat,
                timezone = EXCLUDED.timezone,
                notes = EXCLUDED.notes,
                tags = EXCLUDED.tags,
                updated_at = EXCLUDED.updated_at
        "#;

        let tags: Vec<String> = record.tags.iter().cloned().collect();

        sqlx::query(query)
            .bind(&record.player_id)
            .bind(&record.platform)
            .bind(&record.game_mode)
            .bind(&record.level_range)
            .bind(&record.voice_chat)
            .bind(&record.timezone)
            .bind(&record.notes)
            .bind(&tags)
            .execute(&self.pool)
            .await?;

        tracing::info!("Stored preferences for {}", record.player_id);
        Ok(())
    }

    async fn remove(&self, player_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM player_preferences WHERE player_id = $1")
            .bind(player_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn candidates_for(&self, seeker_id: &str) -> Result<Vec<PlayerPreferences>, StoreError> {
        let query = r#"
            SELECT player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags
            FROM player_preferences
            WHERE player_id <> $1
            ORDER BY player_id COLLATE "C"
        "#;

        let rows = sqlx::query(query).bind(seeker_id).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
