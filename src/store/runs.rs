use chrono::Utc;

use super::models::Run;
use super::Store;
use crate::error::Result;

impl Store {
    pub async fn create_run(&self, script_id: i64, trigger: Option<&str>) -> Result<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO runs (script_id, status, started_at, trigger)
            VALUES (?, 'running', ?, ?)
            RETURNING id
            "#,
        )
        .bind(script_id)
        .bind(now)
        .bind(trigger)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    pub async fn finish_run(
        &self,
        run_id: i64,
        status: &str,
        exit_code: Option<i64>,
        stdout: &str,
        stderr: &str,
    ) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            UPDATE runs
            SET status = ?, finished_at = ?, exit_code = ?, stdout = ?, stderr = ?
            WHERE id = ?
            "#,
        )
        .bind(status)
        .bind(now)
        .bind(exit_code)
        .bind(stdout)
        .bind(stderr)
        .bind(run_id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn list_runs(&self, limit: i64, script_id: Option<i64>) -> Result<Vec<Run>> {
        let rows = match script_id {
            Some(sid) => {
                sqlx::query_as::<_, Run>(
                    "SELECT * FROM runs WHERE script_id = ? ORDER BY id DESC LIMIT ?",
                )
                .bind(sid)
                .bind(limit)
                .fetch_all(self.pool())
                .await?
            }
            None => {
                sqlx::query_as::<_, Run>("SELECT * FROM runs ORDER BY id DESC LIMIT ?")
                    .bind(limit)
                    .fetch_all(self.pool())
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get_run(&self, run_id: i64) -> Result<Option<Run>> {
        let row = sqlx::query_as::<_, Run>("SELECT * FROM runs WHERE id = ?")
            .bind(run_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row)
    }

    pub async fn clear_runs(&self) -> Result<()> {
        sqlx::query("DELETE FROM runs").execute(self.pool()).await?;
        Ok(())
    }
}
