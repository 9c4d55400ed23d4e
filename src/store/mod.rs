//! Embedded relational store: a `SqlitePool` plus schema bootstrap and the
//! atomic claim primitives the rest of the crate builds on.

pub mod events;
pub mod file_triggers;
pub mod locks;
pub mod models;
pub mod one_shots;
pub mod runs;
pub mod schedules;
pub mod scripts;
pub mod webhooks;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS scripts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    command TEXT NOT NULL,
    working_dir TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    script_id INTEGER NOT NULL,
    status TEXT NOT NULL,
    started_at TEXT,
    finished_at TEXT,
    exit_code INTEGER,
    stdout TEXT,
    stderr TEXT,
    trigger TEXT,
    FOREIGN KEY (script_id) REFERENCES scripts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS schedules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    script_id INTEGER NOT NULL,
    interval_seconds INTEGER,
    cron TEXT,
    tz TEXT,
    last_run TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (script_id) REFERENCES scripts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS file_triggers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    script_id INTEGER NOT NULL,
    path TEXT NOT NULL,
    recursive INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    FOREIGN KEY (script_id) REFERENCES scripts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS webhooks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    script_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (script_id) REFERENCES scripts(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS locks (
    key TEXT PRIMARY KEY,
    owner TEXT NOT NULL,
    acquired_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS one_shots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    script_id INTEGER NOT NULL,
    run_at_utc TEXT NOT NULL,
    tz TEXT,
    fired_at_utc TEXT,
    created_at_utc TEXT NOT NULL,
    FOREIGN KEY (script_id) REFERENCES scripts(id)
);

CREATE INDEX IF NOT EXISTS idx_one_shots_due ON one_shots(fired_at_utc, run_at_utc);

CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic TEXT NOT NULL,
    payload_json TEXT,
    created_at_utc TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_events_topic_id ON events(topic, id);

CREATE TABLE IF NOT EXISTS subscriptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic TEXT NOT NULL,
    script_id INTEGER NOT NULL,
    created_at_utc TEXT NOT NULL,
    UNIQUE(topic, script_id),
    FOREIGN KEY (script_id) REFERENCES scripts(id)
);

CREATE INDEX IF NOT EXISTS idx_subscriptions_topic ON subscriptions(topic);

CREATE TABLE IF NOT EXISTS deliveries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL,
    subscription_id INTEGER NOT NULL,
    claimed_at_utc TEXT,
    claimed_by TEXT,
    processed_at_utc TEXT,
    UNIQUE(event_id, subscription_id),
    FOREIGN KEY (event_id) REFERENCES events(id),
    FOREIGN KEY (subscription_id) REFERENCES subscriptions(id)
);

CREATE INDEX IF NOT EXISTS idx_deliveries_claim ON deliveries(claimed_at_utc, processed_at_utc);
CREATE INDEX IF NOT EXISTS idx_deliveries_event ON deliveries(event_id);
"#;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if necessary) the database at `path`, run the schema
    /// and forward-only migrations, and return a ready-to-use store.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Open an in-memory store, primarily for tests.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init(&self) -> Result<()> {
        for statement in SCHEMA.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&self.pool).await?;
        }
        self.migrate().await
    }

    /// Forward-only migration: add any column this version of the schema
    /// expects but an older database file lacks. Never drops a column.
    async fn migrate(&self) -> Result<()> {
        self.add_missing_column("runs", "trigger", "TEXT").await?;
        self.add_missing_column("schedules", "cron", "TEXT").await?;
        self.add_missing_column("schedules", "tz", "TEXT").await?;
        Ok(())
    }

    async fn add_missing_column(&self, table: &str, column: &str, sql_type: &str) -> Result<()> {
        let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
            .fetch_all(&self.pool)
            .await?;
        let has_column = rows.iter().any(|r| r.get::<String, _>("name") == column);
        if !has_column {
            sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {column} {sql_type}"))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}
