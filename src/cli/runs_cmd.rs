use crate::error::Error;
use crate::store::Store;
use crate::timefmt::to_local_display;

pub async fn list(store: &Store, limit: i64, script_id: Option<i64>) -> anyhow::Result<()> {
    let rows = store.list_runs(limit, script_id).await?;
    if rows.is_empty() {
        println!("No runs found.");
        return Ok(());
    }
    println!("id\tscript\ttrigger\tstatus\texit\tstarted\t\t\tfinished");
    for r in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.id,
            r.script_id,
            r.trigger.unwrap_or_default(),
            r.status,
            r.exit_code.map(|c| c.to_string()).unwrap_or_default(),
            to_local_display(r.started_at),
            to_local_display(r.finished_at),
        );
    }
    Ok(())
}

pub async fn show(store: &Store, run_id: i64, max_chars: usize) -> anyhow::Result<()> {
    let r = store
        .get_run(run_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("run {run_id}")))?;

    let clip = |s: Option<String>| -> String {
        let s = s.unwrap_or_default();
        if s.chars().count() <= max_chars {
            s
        } else {
            let byte_idx = s
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(s.len());
            format!("{}\n...[truncated]", &s[..byte_idx])
        }
    };

    println!("id: {}", r.id);
    println!("script_id: {}", r.script_id);
    println!("status: {}", r.status);
    println!("exit_code: {}", r.exit_code.map(|c| c.to_string()).unwrap_or_default());
    println!("started: {}", to_local_display(r.started_at));
    println!("finished: {}", to_local_display(r.finished_at));
    println!("\n--- stdout ---");
    println!("{}", clip(r.stdout));
    println!("\n--- stderr ---");
    println!("{}", clip(r.stderr));
    Ok(())
}

pub async fn clear(store: &Store) -> anyhow::Result<()> {
    store.clear_runs().await?;
    println!("Cleared all runs.");
    Ok(())
}
