use chrono::{DateTime, Utc};

use super::models::{Schedule, ScheduleView};
use super::Store;
use crate::error::Result;

impl Store {
    pub async fn add_schedule(&self, script_id: i64, interval_seconds: i64) -> Result<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO schedules (script_id, interval_seconds, last_run, created_at)
            VALUES (?, ?, NULL, ?)
            RETURNING id
            "#,
        )
        .bind(script_id)
        .bind(interval_seconds)
        .bind(now)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    pub async fn add_cron_schedule(
        &self,
        script_id: i64,
        cron: &str,
        tz: Option<&str>,
    ) -> Result<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO schedules (script_id, interval_seconds, cron, tz, last_run, created_at)
            VALUES (?, NULL, ?, ?, NULL, ?)
            RETURNING id
            "#,
        )
        .bind(script_id)
        .bind(cron)
        .bind(tz)
        .bind(now)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    /// All schedules, regardless of whether they're currently due.
    pub async fn all_schedules(&self) -> Result<Vec<Schedule>> {
        let schedules = sqlx::query_as::<_, Schedule>("SELECT * FROM schedules ORDER BY id ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(schedules)
    }

    pub async fn list_schedules(&self) -> Result<Vec<ScheduleView>> {
        let rows = sqlx::query_as::<_, ScheduleView>(
            r#"
            SELECT
                sc.id,
                sc.script_id,
                s.name AS script_name,
                sc.interval_seconds,
                sc.cron,
                sc.tz,
                sc.last_run
            FROM schedules sc
            JOIN scripts s ON s.id = sc.script_id
            ORDER BY sc.id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    pub async fn mark_schedule_run(&self, schedule_id: i64, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE schedules SET last_run = ? WHERE id = ?")
            .bind(at)
            .bind(schedule_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
