use serde_json::json;

use crate::error::Error;
use crate::lock::owner_id;
use crate::run_service;
use crate::store::Store;
use crate::triggers::TriggerEvent;

/// Manual trigger: run a script right now, outside any schedule, file
/// watch, one-shot, or event subscription.
pub async fn run(store: &Store, script_id: i64) -> anyhow::Result<()> {
    store.require_script(script_id).await?;

    let event = TriggerEvent::new("manual", script_id, json!({}));
    let owner = owner_id();

    match run_service::execute(store, &event, &owner).await? {
        Some(finished) => {
            println!("run #{} finished: {}", finished.run_id, finished.status);
            Ok(())
        }
        None => Err(Error::Conflict(format!("script {script_id} is already running")).into()),
    }
}
