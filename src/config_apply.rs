//! Applies a declarative YAML entity-configuration document (scripts,
//! schedules, file triggers, webhooks) to the store. Purely additive:
//! re-applying the same file inserts the rows again rather than upserting.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::store::Store;

#[derive(Debug, Deserialize, Default)]
struct ConfigDocument {
    #[serde(default)]
    scripts: Vec<ScriptEntry>,
    #[serde(default)]
    schedules: Vec<ScheduleEntry>,
    #[serde(default)]
    file_triggers: Vec<FileTriggerEntry>,
    #[serde(default)]
    webhooks: Vec<WebhookEntry>,
}

#[derive(Debug, Deserialize)]
struct ScriptEntry {
    name: String,
    command: String,
    cwd: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScheduleEntry {
    script: ScriptRef,
    interval_seconds: Option<i64>,
    cron: Option<String>,
    tz: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileTriggerEntry {
    script: ScriptRef,
    path: String,
    #[serde(default)]
    recursive: bool,
}

#[derive(Debug, Deserialize)]
struct WebhookEntry {
    name: String,
    script: ScriptRef,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptRef {
    Id(i64),
    Name(String),
}

fn resolve_script(
    script_ref: &ScriptRef,
    name_to_id: &HashMap<String, i64>,
) -> Result<i64> {
    match script_ref {
        ScriptRef::Id(id) => Ok(*id),
        ScriptRef::Name(name) => {
            if let Ok(id) = name.parse::<i64>() {
                return Ok(id);
            }
            name_to_id
                .get(name)
                .copied()
                .ok_or_else(|| Error::InvalidArgument(format!("unknown script reference: {name}")))
        }
    }
}

pub async fn apply_config(store: &Store, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let doc: ConfigDocument = serde_yaml::from_str(&raw)?;

    let mut name_to_id: HashMap<String, i64> = HashMap::new();
    for s in &doc.scripts {
        let id = store.add_script(&s.name, &s.command, s.cwd.as_deref()).await?;
        name_to_id.insert(s.name.clone(), id);
    }

    for sch in &doc.schedules {
        let script_id = resolve_script(&sch.script, &name_to_id)?;
        if let Some(cron) = &sch.cron {
            store
                .add_cron_schedule(script_id, cron, sch.tz.as_deref())
                .await?;
        } else {
            let interval = sch.interval_seconds.ok_or_else(|| {
                Error::InvalidArgument("schedule needs either cron or interval_seconds".into())
            })?;
            store.add_schedule(script_id, interval).await?;
        }
    }

    for ft in &doc.file_triggers {
        let script_id = resolve_script(&ft.script, &name_to_id)?;
        store
            .add_file_trigger(script_id, &ft.path, ft.recursive)
            .await?;
    }

    for w in &doc.webhooks {
        let script_id = resolve_script(&w.script, &name_to_id)?;
        store.add_webhook(&w.name, script_id).await?;
    }

    Ok(())
}
