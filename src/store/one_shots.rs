use chrono::{DateTime, Utc};

use super::models::OneShot;
use super::Store;
use crate::error::Result;

pub struct ClaimedOneShot {
    pub id: i64,
    pub script_id: i64,
    pub run_at_utc: DateTime<Utc>,
    pub tz: Option<String>,
}

impl Store {
    pub async fn add_one_shot(
        &self,
        script_id: i64,
        run_at_utc: DateTime<Utc>,
        tz: Option<&str>,
    ) -> Result<i64> {
        let created = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO one_shots (script_id, run_at_utc, tz, fired_at_utc, created_at_utc)
            VALUES (?, ?, ?, NULL, ?)
            RETURNING id
            "#,
        )
        .bind(script_id)
        .bind(run_at_utc)
        .bind(tz)
        .bind(created)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    pub async fn list_one_shots(&self, include_fired: bool) -> Result<Vec<OneShot>> {
        let sql = if include_fired {
            "SELECT * FROM one_shots ORDER BY run_at_utc ASC"
        } else {
            "SELECT * FROM one_shots WHERE fired_at_utc IS NULL ORDER BY run_at_utc ASC"
        };
        let rows = sqlx::query_as::<_, OneShot>(sql).fetch_all(self.pool()).await?;
        Ok(rows)
    }

    pub async fn remove_one_shot(&self, one_shot_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM one_shots WHERE id = ?")
            .bind(one_shot_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Atomically claim up to `limit` one-shots due at or before `now`,
    /// marking them fired in the same statement so no two callers (or two
    /// ticks of the same caller) can claim the same row.
    pub async fn claim_due_one_shots(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<ClaimedOneShot>> {
        let rows: Vec<(i64, i64, DateTime<Utc>, Option<String>)> = sqlx::query_as(
            r#"
            UPDATE one_shots
            SET fired_at_utc = ?
            WHERE id IN (
                SELECT id
                FROM one_shots
                WHERE fired_at_utc IS NULL AND run_at_utc <= ?
                ORDER BY run_at_utc ASC
                LIMIT ?
            )
            RETURNING id, script_id, run_at_utc, tz
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, script_id, run_at_utc, tz)| ClaimedOneShot {
                id,
                script_id,
                run_at_utc,
                tz,
            })
            .collect())
    }
}
