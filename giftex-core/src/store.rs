//! Database bootstrap: pool creation, schema, and first-boot seeding.

use kanau::processor::Processor;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool};

use crate::entities::participant::{CountParticipants, InsertParticipant};
use crate::framework::DatabaseProcessor;

/// Names inserted when the roster is empty at first boot.
pub const SAMPLE_ROSTER: [&str; 6] = ["Anna", "Ben", "Clara", "David", "Eva", "Frank"];

/// `drawn_id` distinctness is enforced by the claim statement, not a unique
/// index, because unset values must be allowed to repeat.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE,
    partner_id INTEGER,
    drawn_id INTEGER,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
)";

/// Open (creating if missing) the sqlite database at `path`, apply the
/// schema, and seed the sample roster when empty.
pub async fn open(path: &str) -> Result<SqlitePool, sqlx::Error> {
    let url = format!("sqlite://{path}");
    if !Sqlite::database_exists(&url).await? {
        Sqlite::create_database(&url).await?;
        tracing::info!(path, "Created sqlite database");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;
    sqlx::query(SCHEMA).execute(&pool).await?;
    seed_if_empty(&pool).await?;
    Ok(pool)
}

/// Open a blank in-memory database with the schema applied and no seed rows.
///
/// The pool is pinned to a single connection that never expires: each sqlite
/// in-memory database is private to its connection, so a second connection
/// would see an empty schema.
pub async fn open_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    sqlx::query(SCHEMA).execute(&pool).await?;
    Ok(pool)
}

/// Insert [`SAMPLE_ROSTER`] when the roster has no rows at all.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let processor = DatabaseProcessor { pool: pool.clone() };

    if processor.process(CountParticipants).await? > 0 {
        return Ok(());
    }

    for name in SAMPLE_ROSTER {
        processor
            .process(InsertParticipant {
                name: name.to_string(),
            })
            .await?;
    }
    tracing::info!(
        participants = SAMPLE_ROSTER.len(),
        "Seeded empty roster with sample participants"
    );
    Ok(())
}
