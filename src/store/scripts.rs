use chrono::Utc;

use super::models::Script;
use super::Store;
use crate::error::{Error, Result};

impl Store {
    pub async fn add_script(
        &self,
        name: &str,
        command: &str,
        working_dir: Option<&str>,
    ) -> Result<i64> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO scripts (name, command, working_dir, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(command)
        .bind(working_dir)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    pub async fn list_scripts(&self) -> Result<Vec<Script>> {
        let scripts = sqlx::query_as::<_, Script>("SELECT * FROM scripts ORDER BY id ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(scripts)
    }

    pub async fn get_script(&self, script_id: i64) -> Result<Option<Script>> {
        let script = sqlx::query_as::<_, Script>("SELECT * FROM scripts WHERE id = ?")
            .bind(script_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(script)
    }

    pub async fn require_script(&self, script_id: i64) -> Result<Script> {
        self.get_script(script_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("script {script_id}")))
    }

    pub async fn get_script_by_name(&self, name: &str) -> Result<Option<Script>> {
        let script = sqlx::query_as::<_, Script>("SELECT * FROM scripts WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(script)
    }
}
