//! Exports the current store back into the same YAML shape `apply_config`
//! consumes, resolving script ids back to names where possible.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::store::Store;

#[derive(Debug, Serialize)]
struct ConfigDocument {
    scripts: Vec<ScriptEntry>,
    schedules: Vec<ScheduleEntry>,
    file_triggers: Vec<FileTriggerEntry>,
    webhooks: Vec<WebhookEntry>,
}

#[derive(Debug, Serialize)]
struct ScriptEntry {
    name: String,
    command: String,
    cwd: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScheduleEntry {
    script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tz: Option<String>,
}

#[derive(Debug, Serialize)]
struct FileTriggerEntry {
    script: String,
    path: String,
    recursive: bool,
}

#[derive(Debug, Serialize)]
struct WebhookEntry {
    name: String,
    script: String,
}

pub async fn export_config(store: &Store, path: &Path) -> Result<()> {
    let scripts = store.list_scripts().await?;
    let schedules = store.all_schedules().await?;
    let file_triggers = store.all_file_triggers().await?;
    let webhooks = store.list_webhooks().await?;

    let id_to_name: HashMap<i64, String> =
        scripts.iter().map(|s| (s.id, s.name.clone())).collect();
    let script_ref = |id: i64| id_to_name.get(&id).cloned().unwrap_or_else(|| id.to_string());

    let doc = ConfigDocument {
        scripts: scripts
            .iter()
            .map(|s| ScriptEntry {
                name: s.name.clone(),
                command: s.command.clone(),
                cwd: s.working_dir.clone(),
            })
            .collect(),
        schedules: schedules
            .iter()
            .map(|sch| {
                if let Some(cron) = &sch.cron {
                    ScheduleEntry {
                        script: script_ref(sch.script_id),
                        interval_seconds: None,
                        cron: Some(cron.clone()),
                        tz: sch.tz.clone(),
                    }
                } else {
                    ScheduleEntry {
                        script: script_ref(sch.script_id),
                        interval_seconds: sch.interval_seconds,
                        cron: None,
                        tz: None,
                    }
                }
            })
            .collect(),
        file_triggers: file_triggers
            .iter()
            .map(|ft| FileTriggerEntry {
                script: script_ref(ft.script_id),
                path: ft.path.clone(),
                recursive: ft.recursive,
            })
            .collect(),
        webhooks: webhooks
            .iter()
            .map(|w| WebhookEntry {
                name: w.name.clone(),
                script: script_ref(w.script_id),
            })
            .collect(),
    };

    let yaml = serde_yaml::to_string(&doc)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
