use std::path::Path;

use crate::config_apply::apply_config;
use crate::config_export::export_config;
use crate::store::Store;

pub async fn apply(store: &Store, path: &Path) -> anyhow::Result<()> {
    apply_config(store, path).await?;
    println!("Applied config from {}", path.display());
    Ok(())
}

pub async fn export(store: &Store, path: &Path) -> anyhow::Result<()> {
    export_config(store, path).await?;
    println!("Exported config to {}", path.display());
    Ok(())
}
