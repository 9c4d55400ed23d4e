use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::error::Result;
use crate::store::Store;

use super::{TriggerEvent, TriggerSource};

const CLAIM_BATCH: i64 = 50;

/// Polls due one-shots via the store's atomic claim-by-`UPDATE...RETURNING`,
/// so a one-shot fires at most once no matter how many workers poll.
#[derive(Default)]
pub struct OneShotSource;

impl OneShotSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TriggerSource for OneShotSource {
    async fn poll(&mut self, store: &Store) -> Result<Vec<TriggerEvent>> {
        let claimed = store.claim_due_one_shots(Utc::now(), CLAIM_BATCH).await?;

        Ok(claimed
            .into_iter()
            .map(|row| {
                TriggerEvent::new(
                    format!("oneshot:{}", row.id),
                    row.script_id,
                    json!({ "run_at_utc": row.run_at_utc, "tz": row.tz }),
                )
            })
            .collect())
    }
}
