use notify_debouncer_mini::notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tauri::Emitter;

#[derive(Debug, Clone, serde::Serialize)]
pub struct SnapshotChanged {
    pub username: String,
    pub path: String,
}

/// Username whose snapshot file this path is, if it is one: `data/<username>.json`.
pub fn snapshot_username(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    let parent = path.parent()?.file_name()?.to_str()?;
    if parent != "data" {
        return None;
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
}

/// Usernames whose snapshot changed in one debounced batch, deduplicated.
/// Temp files and other non-snapshot paths in the batch are ignored.
pub fn changed_snapshots<'a>(paths: impl IntoIterator<Item = &'a Path>) -> BTreeMap<String, PathBuf> {
    let mut changed = BTreeMap::new();
    for path in paths {
        if let Some(username) = snapshot_username(path) {
            changed.insert(username, path.to_path_buf());
        }
    }
    changed
}

#[tauri::command]
pub async fn start_snapshot_watcher(site_root: String, app: tauri::AppHandle) -> Result<(), String> {
    let data_dir = PathBuf::from(&site_root).join("data");
    let (tx, rx) = mpsc::channel();

    // Batches are delivered once writes under data/ have been quiet for the timeout.
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)
        .map_err(|e| format!("Watcher init error: {}", e))?;

    debouncer
        .watcher()
        .watch(&data_dir, RecursiveMode::NonRecursive)
        .map_err(|e| format!("Watch error: {}", e))?;
    log::info!("watching {} for snapshot changes", data_dir.display());

    std::thread::spawn(move || {
        let _debouncer = debouncer; // Keep watcher alive

        for result in rx {
            let events = match result {
                Ok(events) => events,
                Err(e) => {
                    log::debug!("snapshot watch error: {:?}", e);
                    continue;
                }
            };
            for (username, path) in changed_snapshots(events.iter().map(|event| event.path.as_path())) {
                crate::commands::loader::invalidate_cache(&site_root, &username);
                let _ = app.emit(
                    "snapshot_changed",
                    SnapshotChanged {
                        username,
                        path: path.to_string_lossy().to_string(),
                    },
                );
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_snapshot_files_only() {
        assert_eq!(
            snapshot_username(Path::new("/site/data/octo.json")),
            Some("octo".to_string())
        );
        assert_eq!(snapshot_username(Path::new("/site/data/octo.json.tmp")), None);
        assert_eq!(snapshot_username(Path::new("/site/assets/octo.json")), None);
        assert_eq!(snapshot_username(Path::new("octo.json")), None);
    }

    #[test]
    fn atomic_save_batch_reports_the_snapshot_once() {
        let batch = [
            PathBuf::from("/site/data/.octo.json.tmp"),
            PathBuf::from("/site/data/octo.json"),
            PathBuf::from("/site/data/octo.json"),
            PathBuf::from("/site/data/README.md"),
        ];

        let changed = changed_snapshots(batch.iter().map(PathBuf::as_path));
        let users: Vec<&str> = changed.keys().map(String::as_str).collect();
        assert_eq!(users, vec!["octo"]);
        assert_eq!(changed["octo"], PathBuf::from("/site/data/octo.json"));
    }

    #[test]
    fn batch_without_snapshots_changes_nothing() {
        let batch = [PathBuf::from("/site/data/.octo.json.swp")];
        assert!(changed_snapshots(batch.iter().map(PathBuf::as_path)).is_empty());
    }
}
