use chrono::Utc;

use super::models::ClaimedDelivery;
use super::Store;
use crate::error::Result;

impl Store {
    /// Publish an event and materialize one unprocessed delivery per
    /// existing subscription on the topic, in the same transaction.
    pub async fn publish_event(&self, topic: &str, payload_json: Option<&str>) -> Result<i64> {
        let now = Utc::now();
        let mut tx = self.pool().begin().await?;

        let event_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO events (topic, payload_json, created_at_utc)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(topic)
        .bind(payload_json)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO deliveries (event_id, subscription_id, claimed_at_utc, claimed_by, processed_at_utc)
            SELECT ?, s.id, NULL, NULL, NULL
            FROM subscriptions s
            WHERE s.topic = ?
            "#,
        )
        .bind(event_id)
        .bind(topic)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(event_id)
    }

    /// Subscribe a script to a topic, backfilling deliveries for events
    /// already published on that topic. Idempotent per `(topic, script_id)`.
    pub async fn subscribe(&self, topic: &str, script_id: i64) -> Result<i64> {
        let now = Utc::now();
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            "INSERT OR IGNORE INTO subscriptions (topic, script_id, created_at_utc) VALUES (?, ?, ?)",
        )
        .bind(topic)
        .bind(script_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let subscription_id: i64 = sqlx::query_scalar(
            "SELECT id FROM subscriptions WHERE topic = ? AND script_id = ?",
        )
        .bind(topic)
        .bind(script_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO deliveries (event_id, subscription_id, claimed_at_utc, claimed_by, processed_at_utc)
            SELECT e.id, ?, NULL, NULL, NULL
            FROM events e
            WHERE e.topic = ?
            "#,
        )
        .bind(subscription_id)
        .bind(topic)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(subscription_id)
    }

    /// Atomically claim up to `limit` unclaimed, unprocessed deliveries for
    /// `owner`, then resolve each to the script/topic/payload needed to run it.
    pub async fn claim_ready_deliveries(
        &self,
        owner: &str,
        limit: i64,
    ) -> Result<Vec<ClaimedDelivery>> {
        let now = Utc::now();

        let claimed_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            UPDATE deliveries
            SET claimed_at_utc = ?, claimed_by = ?
            WHERE id IN (
                SELECT d.id
                FROM deliveries d
                WHERE d.processed_at_utc IS NULL AND d.claimed_at_utc IS NULL
                ORDER BY d.id ASC
                LIMIT ?
            )
            RETURNING id
            "#,
        )
        .bind(now)
        .bind(owner)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        if claimed_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = claimed_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let sql = format!(
            r#"
            SELECT
                d.id AS delivery_id,
                d.event_id,
                s.script_id,
                e.topic,
                e.payload_json
            FROM deliveries d
            JOIN subscriptions s ON s.id = d.subscription_id
            JOIN events e ON e.id = d.event_id
            WHERE d.id IN ({placeholders})
            "#
        );
        let mut query = sqlx::query_as::<_, ClaimedDelivery>(&sql);
        for id in &claimed_ids {
            query = query.bind(id);
        }
        let rows = query.fetch_all(self.pool()).await?;
        Ok(rows)
    }

    pub async fn mark_delivery_processed(&self, delivery_id: i64) -> Result<()> {
        let now = Utc::now();
        sqlx::query("UPDATE deliveries SET processed_at_utc = ? WHERE id = ? AND processed_at_utc IS NULL")
            .bind(now)
            .bind(delivery_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
