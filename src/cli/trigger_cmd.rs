use crate::file_oracle::FileOracle;
use crate::store::Store;

pub async fn add_file(
    store: &Store,
    script_id: i64,
    path: &str,
    recursive: bool,
) -> anyhow::Result<()> {
    let id = store.add_file_trigger(script_id, path, recursive).await?;
    println!("Added file trigger #{id} for script {script_id}: {path}");
    Ok(())
}

pub async fn list(store: &Store) -> anyhow::Result<()> {
    let rows = store.list_file_triggers().await?;
    if rows.is_empty() {
        println!("No file triggers found.");
        return Ok(());
    }
    println!("id\tscript\tpath\trecursive");
    for r in rows {
        println!("{}\t{}\t{}\t{}", r.id, r.script_name, r.path, r.recursive);
    }
    Ok(())
}

pub async fn remove(store: &Store, trigger_id: i64) -> anyhow::Result<()> {
    let affected = store.remove_file_trigger(trigger_id).await?;
    if affected == 0 {
        println!("No such file trigger: {trigger_id}");
    } else {
        println!("Removed file trigger #{trigger_id}");
    }
    Ok(())
}

/// Scans `path` twice with a fresh oracle, printing both results. Touches
/// no database — useful for sanity-checking a path/recursive combination
/// before wiring it to a script.
pub async fn debug_scan(path: &str, recursive: bool) -> anyhow::Result<()> {
    let mut oracle = FileOracle::new();
    let first = oracle.scan(path, recursive);
    let second = oracle.scan(path, recursive);
    println!("first scan changed: {first}");
    println!("second scan changed: {second}");
    Ok(())
}
