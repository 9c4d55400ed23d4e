use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;
use crate::file_oracle::FileOracle;
use crate::store::Store;

use super::{TriggerEvent, TriggerSource};

/// Polls file triggers through a [`FileOracle`] and debounces/rate-caps
/// firing per trigger id. State is in-memory only and does not survive a
/// restart; that only resets the debounce/rate-cap clocks, not at-most-once
/// correctness (there is no durable claim for file triggers by design).
pub struct FileWatchSource {
    oracle: FileOracle,
    quiet: Duration,
    min_interval: Duration,
    last_change_seen: HashMap<i64, Instant>,
    last_executed_for_change: HashMap<i64, Instant>,
    last_exec_time: HashMap<i64, Instant>,
}

impl FileWatchSource {
    pub fn new(quiet: Duration, min_interval: Duration) -> Self {
        Self {
            oracle: FileOracle::new(),
            quiet,
            min_interval,
            last_change_seen: HashMap::new(),
            last_executed_for_change: HashMap::new(),
            last_exec_time: HashMap::new(),
        }
    }
}

#[async_trait]
impl TriggerSource for FileWatchSource {
    async fn poll(&mut self, store: &Store) -> Result<Vec<TriggerEvent>> {
        let now = Instant::now();
        let mut events = Vec::new();

        for ft in store.all_file_triggers().await? {
            let changed = self.oracle.scan(&ft.path, ft.recursive);
            if changed {
                self.last_change_seen.insert(ft.id, now);
                continue;
            }

            let Some(&last_change) = self.last_change_seen.get(&ft.id) else {
                continue;
            };
            if now.duration_since(last_change) < self.quiet {
                continue;
            }

            if let Some(&last_exec_for_change) = self.last_executed_for_change.get(&ft.id) {
                if last_exec_for_change >= last_change {
                    continue;
                }
            }

            if let Some(&last_exec) = self.last_exec_time.get(&ft.id) {
                if now.duration_since(last_exec) < self.min_interval {
                    continue;
                }
            }

            self.last_exec_time.insert(ft.id, now);
            self.last_executed_for_change.insert(ft.id, now);

            events.push(TriggerEvent::new(
                format!("file:{}", ft.id),
                ft.script_id,
                json!({
                    "file_trigger_id": ft.id,
                    "path": ft.path,
                    "recursive": ft.recursive,
                }),
            ));
        }

        Ok(events)
    }
}
