use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Script {
    pub id: i64,
    pub name: String,
    pub command: String,
    pub working_dir: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub script_id: i64,
    pub interval_seconds: Option<i64>,
    pub cron: Option<String>,
    pub tz: Option<String>,
    pub last_run: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// [`Schedule`] joined with its script's name, as used by listing commands.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ScheduleView {
    pub id: i64,
    pub script_id: i64,
    pub script_name: String,
    pub interval_seconds: Option<i64>,
    pub cron: Option<String>,
    pub tz: Option<String>,
    pub last_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FileTrigger {
    pub id: i64,
    pub script_id: i64,
    pub path: String,
    pub recursive: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FileTriggerView {
    pub id: i64,
    pub script_id: i64,
    pub script_name: String,
    pub path: String,
    pub recursive: bool,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct OneShot {
    pub id: i64,
    pub script_id: i64,
    pub run_at_utc: DateTime<Utc>,
    pub tz: Option<String>,
    pub fired_at_utc: Option<DateTime<Utc>>,
    pub created_at_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Webhook {
    pub id: i64,
    pub name: String,
    pub script_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct WebhookView {
    pub id: i64,
    pub name: String,
    pub script_id: i64,
    pub script_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Run {
    pub id: i64,
    pub script_id: i64,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub exit_code: Option<i64>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub trigger: Option<String>,
}

/// A delivery claimed for execution, joined with its event and subscription.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimedDelivery {
    pub delivery_id: i64,
    pub event_id: i64,
    pub script_id: i64,
    pub topic: String,
    pub payload_json: Option<String>,
}
