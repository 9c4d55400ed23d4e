use chrono::Utc;

use super::models::WebhookView;
use super::Store;
use crate::error::Result;

impl Store {
    pub async fn add_webhook(&self, name: &str, script_id: i64) -> Result<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO webhooks (name, script_id, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(script_id)
        .bind(now)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    pub async fn list_webhooks(&self) -> Result<Vec<WebhookView>> {
        let rows = sqlx::query_as::<_, WebhookView>(
            r#"
            SELECT w.id, w.name, w.script_id, s.name AS script_name
            FROM webhooks w
            JOIN scripts s ON s.id = w.script_id
            ORDER BY w.id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn get_webhook(&self, name: &str) -> Result<Option<WebhookView>> {
        let row = sqlx::query_as::<_, WebhookView>(
            r#"
            SELECT w.id, w.name, w.script_id, s.name AS script_name
            FROM webhooks w
            JOIN scripts s ON s.id = w.script_id
            WHERE w.name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    pub async fn remove_webhook(&self, name: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM webhooks WHERE name = ?")
            .bind(name)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
