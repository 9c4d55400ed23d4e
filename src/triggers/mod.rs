//! Normalized trigger events and the capability every poll-driven source
//! implements.

pub mod event_bus_source;
pub mod file_watch_source;
pub mod one_shot_source;
pub mod schedule_source;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::Store;

pub use event_bus_source::EventBusSource;
pub use file_watch_source::FileWatchSource;
pub use one_shot_source::OneShotSource;
pub use schedule_source::ScheduleSource;

/// A normalized intent to run a specific script, emitted by a [`TriggerSource`].
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    pub trigger_id: String,
    pub script_id: i64,
    pub payload: serde_json::Value,
}

impl TriggerEvent {
    pub fn new(trigger_id: impl Into<String>, script_id: i64, payload: serde_json::Value) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            script_id,
            payload,
        }
    }
}

/// A source of [`TriggerEvent`]s polled once per scheduler tick.
#[async_trait]
pub trait TriggerSource: Send + Sync {
    async fn poll(&mut self, store: &Store) -> Result<Vec<TriggerEvent>>;
}

/// The default source set named by the scheduler: interval/cron schedules,
/// one-shots, the event bus, and file-watch triggers.
pub fn default_sources(
    owner: String,
    file_quiet_seconds: u64,
    file_min_interval_seconds: u64,
) -> Vec<Box<dyn TriggerSource>> {
    vec![
        Box::new(ScheduleSource::new()),
        Box::new(OneShotSource::new()),
        Box::new(EventBusSource::new(owner)),
        Box::new(FileWatchSource::new(
            std::time::Duration::from_secs(file_quiet_seconds),
            std::time::Duration::from_secs(file_min_interval_seconds),
        )),
    ]
}
