use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use crate::cron::{cron_next_after, parse_tz};
use crate::error::Result;
use crate::store::Store;

use super::{TriggerEvent, TriggerSource};

/// Polls interval and cron schedules, emitting an event and stamping
/// `last_run` for every schedule that is due.
#[derive(Default)]
pub struct ScheduleSource;

impl ScheduleSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TriggerSource for ScheduleSource {
    async fn poll(&mut self, store: &Store) -> Result<Vec<TriggerEvent>> {
        let now = Utc::now();
        let mut events = Vec::new();

        for schedule in store.all_schedules().await? {
            let due = if let Some(interval) = schedule.interval_seconds {
                match schedule.last_run {
                    None => true,
                    Some(last_run) => now >= last_run + Duration::seconds(interval),
                }
            } else if let Some(cron) = schedule.cron.as_deref() {
                let base = schedule.last_run.unwrap_or(now - Duration::minutes(1));
                // No explicit tz falls back to the process's local zone, not
                // UTC, matching how the original scheduler resolves this.
                let next = match schedule.tz.as_deref() {
                    Some(tz) => cron_next_after(cron, &base, parse_tz(tz)),
                    None => cron_next_after(cron, &base, chrono::Local),
                };
                match next {
                    Some(next) => next <= now,
                    None => false,
                }
            } else {
                false
            };

            if !due {
                continue;
            }

            store.mark_schedule_run(schedule.id, now).await?;

            events.push(TriggerEvent::new(
                format!("schedule:{}", schedule.id),
                schedule.script_id,
                json!({ "schedule_id": schedule.id }),
            ));
        }

        Ok(events)
    }
}
