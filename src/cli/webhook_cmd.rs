use std::sync::Arc;

use crate::store::Store;

pub async fn add(store: &Store, name: &str, script_id: i64) -> anyhow::Result<()> {
    let id = store.add_webhook(name, script_id).await?;
    println!("Added webhook #{id}: {name} -> script {script_id}");
    Ok(())
}

pub async fn list(store: &Store) -> anyhow::Result<()> {
    let rows = store.list_webhooks().await?;
    if rows.is_empty() {
        println!("No webhooks found.");
        return Ok(());
    }
    println!("id\tname\tscript");
    for r in rows {
        println!("{}\t{}\t{}", r.id, r.name, r.script_name);
    }
    Ok(())
}

pub async fn remove(store: &Store, name: &str) -> anyhow::Result<()> {
    let affected = store.remove_webhook(name).await?;
    if affected == 0 {
        println!("No such webhook: {name}");
    } else {
        println!("Removed webhook: {name}");
    }
    Ok(())
}

pub async fn serve(store: Arc<Store>, host: &str, port: u16) -> anyhow::Result<()> {
    crate::webhook::serve(store, host, port).await
}
