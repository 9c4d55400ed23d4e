use chrono::Utc;

use super::Store;
use crate::error::Result;

impl Store {
    /// Atomically claim a named lock for `owner`. Returns `false` without
    /// error if another owner already holds it — a unique-constraint
    /// violation on `locks.key` is the only way two callers can race here,
    /// and SQLite's writer serializes that for us.
    pub async fn insert_lock(&self, key: &str, owner: &str) -> Result<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO locks (key, owner, acquired_at) VALUES (?, ?, ?)",
        )
        .bind(key)
        .bind(owner)
        .bind(now)
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Release a lock, but only if `owner` is the one holding it.
    pub async fn delete_lock(&self, key: &str, owner: &str) -> Result<()> {
        sqlx::query("DELETE FROM locks WHERE key = ? AND owner = ?")
            .bind(key)
            .bind(owner)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
