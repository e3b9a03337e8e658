pub mod analysis;
pub mod commands;
pub mod error;
pub mod models;
pub mod render;

use commands::{
    settings::{get_settings, save_settings},
    showcase::{load_showcase, query_activity, query_repos},
    watcher::start_snapshot_watcher,
};
use models::showcase::ShowcaseState;
use std::sync::{Arc, Mutex};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(Arc::new(Mutex::new(ShowcaseState::default())))
        .invoke_handler(tauri::generate_handler![
            load_showcase,
            query_repos,
            query_activity,
            get_settings,
            save_settings,
            start_snapshot_watcher,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
