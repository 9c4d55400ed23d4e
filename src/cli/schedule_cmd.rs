use crate::store::Store;
use crate::timefmt::to_local_display;

pub async fn add(store: &Store, script_id: i64, interval_seconds: i64) -> anyhow::Result<()> {
    let id = store.add_schedule(script_id, interval_seconds).await?;
    println!("Added schedule #{id} for script {script_id} every {interval_seconds}s");
    Ok(())
}

pub async fn add_cron(
    store: &Store,
    script_id: i64,
    cron: &str,
    tz: Option<&str>,
) -> anyhow::Result<()> {
    let id = store.add_cron_schedule(script_id, cron, tz).await?;
    println!(
        "Added cron schedule #{id} for script {script_id}: {cron} ({})",
        tz.unwrap_or("local")
    );
    Ok(())
}

pub async fn list(store: &Store) -> anyhow::Result<()> {
    let rows = store.list_schedules().await?;
    if rows.is_empty() {
        println!("No schedules found.");
        return Ok(());
    }
    println!("id\tscript\tkind\tspec\ttz\tlast_run");
    for r in rows {
        let (kind, spec) = match &r.cron {
            Some(cron) => ("cron", cron.clone()),
            None => (
                "interval",
                format!("{}s", r.interval_seconds.unwrap_or_default()),
            ),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.id,
            r.script_name,
            kind,
            spec,
            r.tz.unwrap_or_default(),
            to_local_display(r.last_run),
        );
    }
    Ok(())
}
