use crate::store::Store;

pub async fn add(store: &Store, name: &str, command: &str, working_dir: Option<&str>) -> anyhow::Result<()> {
    let id = store.add_script(name, command, working_dir).await?;
    println!("Added script #{id}: {name}");
    Ok(())
}

pub async fn list(store: &Store) -> anyhow::Result<()> {
    let scripts = store.list_scripts().await?;
    if scripts.is_empty() {
        println!("No scripts found.");
        return Ok(());
    }
    for s in scripts {
        println!("{}\t{}\t{}", s.id, s.name, s.command);
    }
    Ok(())
}

pub async fn show(store: &Store, script_id: i64) -> anyhow::Result<()> {
    let s = store.require_script(script_id).await?;
    println!("id: {}", s.id);
    println!("name: {}", s.name);
    println!("command: {}", s.command);
    println!("cwd: {}", s.working_dir.unwrap_or_default());
    println!("created_at: {}", s.created_at);
    println!("updated_at: {}", s.updated_at);
    Ok(())
}
