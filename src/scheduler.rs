//! The scheduler loop: poll every active source once per tick, dispatch
//! whatever each source emits, then sleep until the next tick.

use std::path::Path;

use crate::error::Result;
use crate::lock::owner_id;
use crate::run_service;
use crate::store::Store;
use crate::triggers::{self, TriggerSource};

pub struct RunLoopOptions {
    pub tick_seconds: u64,
    pub once: bool,
    pub file_quiet_seconds: u64,
    pub file_min_interval_seconds: u64,
}

impl Default for RunLoopOptions {
    fn default() -> Self {
        Self {
            tick_seconds: 2,
            once: false,
            file_quiet_seconds: 3,
            file_min_interval_seconds: 30,
        }
    }
}

pub async fn run_loop(db_path: &Path, options: RunLoopOptions) -> Result<()> {
    let store = Store::open(db_path).await?;
    let owner = owner_id();

    let mut sources = triggers::default_sources(
        owner.clone(),
        options.file_quiet_seconds,
        options.file_min_interval_seconds,
    );

    run_loop_with_sources(&store, &owner, &mut sources, &options).await
}

/// Drives the loop against an explicit source list and an already-open
/// store — the shape used by tests that need a single in-process tick.
pub async fn run_loop_with_sources(
    store: &Store,
    owner: &str,
    sources: &mut [Box<dyn TriggerSource>],
    options: &RunLoopOptions,
) -> Result<()> {
    loop {
        for source in sources.iter_mut() {
            let events = source.poll(store).await?;
            for event in events {
                let delivery_id = event
                    .payload
                    .get("delivery_id")
                    .and_then(|v| v.as_i64());

                let finished = run_service::execute(store, &event, owner).await?;

                if let (Some(delivery_id), Some(_)) = (delivery_id, finished.as_ref()) {
                    store.mark_delivery_processed(delivery_id).await?;
                }
            }
        }

        if options.once {
            return Ok(());
        }
        tokio::time::sleep(std::time::Duration::from_secs(options.tick_seconds)).await;
    }
}
