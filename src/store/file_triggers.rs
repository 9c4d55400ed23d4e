use chrono::Utc;

use super::models::{FileTrigger, FileTriggerView};
use super::Store;
use crate::error::Result;

impl Store {
    pub async fn add_file_trigger(
        &self,
        script_id: i64,
        path: &str,
        recursive: bool,
    ) -> Result<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO file_triggers (script_id, path, recursive, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(script_id)
        .bind(path)
        .bind(recursive)
        .bind(now)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    /// File triggers in the plain shape the file-watch source iterates.
    pub async fn all_file_triggers(&self) -> Result<Vec<FileTrigger>> {
        let rows = sqlx::query_as::<_, FileTrigger>("SELECT * FROM file_triggers ORDER BY id ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    pub async fn list_file_triggers(&self) -> Result<Vec<FileTriggerView>> {
        let rows = sqlx::query_as::<_, FileTriggerView>(
            r#"
            SELECT ft.id, ft.script_id, s.name AS script_name, ft.path, ft.recursive
            FROM file_triggers ft
            JOIN scripts s ON s.id = ft.script_id
            ORDER BY ft.id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn remove_file_trigger(&self, trigger_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM file_triggers WHERE id = ?")
            .bind(trigger_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
