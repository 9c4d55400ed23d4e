//! Best-effort named mutex backed by a durable row in the store.
//!
//! There is no lock timeout: a process that crashes holding a lock leaves
//! a stale row behind. Recovery is a manual operator action (clear the row)
//! rather than an automatic TTL, since a TTL would allow duplicate
//! concurrent execution under clock skew.

use crate::error::Result;
use crate::store::Store;

/// Build the owner string used to attribute locks and deliveries to this process.
pub fn owner_id() -> String {
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown-host".to_string());
    format!("{host}:{}", std::process::id())
}

pub fn script_lock_key(script_id: i64) -> String {
    format!("script:{script_id}")
}

pub async fn try_acquire(store: &Store, key: &str, owner: &str) -> Result<bool> {
    store.insert_lock(key, owner).await
}

pub async fn release(store: &Store, key: &str, owner: &str) -> Result<()> {
    store.delete_lock(key, owner).await
}
