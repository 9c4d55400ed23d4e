use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;
use crate::store::Store;

use super::{TriggerEvent, TriggerSource};

const CLAIM_BATCH: i64 = 50;

/// Polls claimed-but-unprocessed deliveries for this process's owner id.
/// The delivery is NOT marked processed here — the scheduler does that once
/// the run it dispatches actually terminates, so a crash mid-run leaves the
/// delivery claimed rather than silently lost.
pub struct EventBusSource {
    owner: String,
}

impl EventBusSource {
    pub fn new(owner: String) -> Self {
        Self { owner }
    }
}

#[async_trait]
impl TriggerSource for EventBusSource {
    async fn poll(&mut self, store: &Store) -> Result<Vec<TriggerEvent>> {
        let claimed = store.claim_ready_deliveries(&self.owner, CLAIM_BATCH).await?;

        Ok(claimed
            .into_iter()
            .map(|row| {
                TriggerEvent::new(
                    format!("event:{}", row.topic),
                    row.script_id,
                    json!({
                        "topic": row.topic,
                        "event_id": row.event_id,
                        "delivery_id": row.delivery_id,
                        "payload_json": row.payload_json,
                    }),
                )
            })
            .collect())
    }
}
