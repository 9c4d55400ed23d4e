//! Wraps the executor with lock acquisition, run-record bookkeeping, and
//! error capture — the one place a [`TriggerEvent`] becomes an actual run.

use crate::error::Result;
use crate::executor::run_command;
use crate::lock::{script_lock_key, try_acquire};
use crate::store::Store;
use crate::triggers::TriggerEvent;

/// Outcome of dispatching a trigger event through the run service.
pub struct Finished {
    pub run_id: i64,
    pub status: String,
}

/// Resolve the event's script, acquire its per-script lock, run it, and
/// record the result. Returns `Ok(None)` — not an error — when the script
/// is missing or the lock is already held; both are routine coalescing
/// outcomes for a scheduler that polls the same triggers repeatedly.
pub async fn execute(store: &Store, event: &TriggerEvent, owner: &str) -> Result<Option<Finished>> {
    let Some(script) = store.get_script(event.script_id).await? else {
        return Ok(None);
    };

    let lock_key = script_lock_key(event.script_id);
    if !try_acquire(store, &lock_key, owner).await? {
        return Ok(None);
    }

    // From here on the lock is held: release it on every exit path, even if
    // creating or recording the run itself fails, or we wedge the script
    // forever (there is no lock TTL by design).
    let result = run_and_record(store, &script, event).await;
    crate::lock::release(store, &lock_key, owner).await?;
    result.map(Some)
}

async fn run_and_record(
    store: &Store,
    script: &crate::store::models::Script,
    event: &TriggerEvent,
) -> Result<Finished> {
    let run_id = store.create_run(script.id, Some(&event.trigger_id)).await?;

    let finished = match run_command(&script.command, script.working_dir.as_deref(), None).await {
        Ok(result) => {
            let status = if result.exit_code == Some(0) {
                "success"
            } else {
                "failed"
            };
            let _ = store
                .finish_run(run_id, status, result.exit_code, &result.stdout, &result.stderr)
                .await;
            Finished {
                run_id,
                status: status.to_string(),
            }
        }
        Err(e) => {
            let _ = store.finish_run(run_id, "failed", None, "", &e.to_string()).await;
            Finished {
                run_id,
                status: "failed".to_string(),
            }
        }
    };

    Ok(finished)
}
