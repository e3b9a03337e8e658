use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 2;

pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 10;
pub const DEFAULT_PINNED_COUNT: u64 = 4;
pub const DEFAULT_EVENT_LIMIT: u64 = 30;
pub const DEFAULT_LANGUAGE_BAR_LIMIT: u64 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `<site_root>/data/<username>.json`
    File,
    /// `<base_url>/data/<username>.json`
    Http { base_url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseSettings {
    pub username: String,
    pub source: DataSource,
    pub cache_ttl_ms: i64,
    pub pinned_count: usize,
    pub event_limit: usize,
    pub language_bar_limit: usize,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            source: DataSource::File,
            cache_ttl_ms: (DEFAULT_CACHE_TTL_MINUTES * 60 * 1000) as i64,
            pinned_count: DEFAULT_PINNED_COUNT as usize,
            event_limit: DEFAULT_EVENT_LIMIT as usize,
            language_bar_limit: DEFAULT_LANGUAGE_BAR_LIMIT as usize,
        }
    }
}

#[tauri::command]
pub async fn get_settings(site_root: String) -> Result<Value, String> {
    load_settings_from_disk(&site_root)
}

#[tauri::command]
pub async fn save_settings(site_root: String, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(&site_root, settings)
}

/// Settings for a page load. Storage problems fall back to defaults and never fail the load.
pub fn load_showcase_settings(site_root: &str) -> ShowcaseSettings {
    match load_settings_from_disk(site_root) {
        Ok(settings) => effective_settings(&settings),
        Err(e) => {
            log::debug!("settings unavailable for {site_root}, using defaults: {e}");
            ShowcaseSettings::default()
        }
    }
}

/// Reads an already-sanitized settings document into its typed form.
pub fn effective_settings(settings: &Value) -> ShowcaseSettings {
    let defaults = ShowcaseSettings::default();
    let u64_or = |key: &str, default: u64| settings.get(key).and_then(Value::as_u64).unwrap_or(default);

    let username = settings
        .get("username")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_USERNAME)
        .to_string();

    let base_url = settings
        .get("dataBaseUrl")
        .and_then(Value::as_str)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_default();

    let source = match settings.get("dataSource").and_then(Value::as_str) {
        Some("http") if !base_url.is_empty() => DataSource::Http { base_url },
        _ => DataSource::File,
    };

    ShowcaseSettings {
        username,
        source,
        cache_ttl_ms: (u64_or("cacheTtlMinutes", DEFAULT_CACHE_TTL_MINUTES) * 60 * 1000) as i64,
        pinned_count: u64_or("pinnedCount", defaults.pinned_count as u64) as usize,
        event_limit: u64_or("eventLimit", defaults.event_limit as u64) as usize,
        language_bar_limit: u64_or("languageBarLimit", defaults.language_bar_limit as u64) as usize,
    }
}

pub fn load_settings_from_disk(site_root: &str) -> Result<Value, String> {
    let path = settings_path(site_root);

    let original = if path.is_file() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|_| json!({}))
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        // Read-only sites still get migrated settings in memory.
        if let Err(e) = ensure_showcase_dir(site_root).and_then(|_| write_settings_file(&path, &migrated)) {
            log::debug!("settings not persisted: {e}");
        }
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(site_root: &str, settings: Value) -> Result<Value, String> {
    let path = settings_path(site_root);
    ensure_showcase_dir(site_root)?;

    let mut merged = load_settings_from_disk(site_root).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    log::info!("saved showcase settings for {site_root}");
    Ok(migrated)
}

pub fn showcase_dir(site_root: &str) -> PathBuf {
    Path::new(site_root).join(".showcase")
}

fn settings_path(site_root: &str) -> PathBuf {
    showcase_dir(site_root).join("settings.json")
}

pub fn ensure_showcase_dir(site_root: &str) -> Result<(), String> {
    fs::create_dir_all(showcase_dir(site_root))
        .map_err(|e| format!("Failed to create .showcase directory: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version < 2 {
        // V1 stored the cache lifetime in milliseconds.
        migrate_ttl_from_millis(&mut out);
    }

    deep_merge_defaults(&mut out, &default_settings());
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "username": DEFAULT_USERNAME,
        "dataSource": "file",
        "dataBaseUrl": "",
        "cacheTtlMinutes": DEFAULT_CACHE_TTL_MINUTES,
        "pinnedCount": DEFAULT_PINNED_COUNT,
        "eventLimit": DEFAULT_EVENT_LIMIT,
        "languageBarLimit": DEFAULT_LANGUAGE_BAR_LIMIT
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn migrate_ttl_from_millis(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    if let Some(ms) = obj.remove("cacheTtlMs").and_then(|v| v.as_u64()) {
        obj.entry("cacheTtlMinutes".to_string())
            .or_insert_with(|| json!(ms / 60_000));
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    // Clamp numerics.
    clamp_u64(obj, "cacheTtlMinutes", 0, 1440, DEFAULT_CACHE_TTL_MINUTES);
    clamp_u64(obj, "pinnedCount", 1, 12, DEFAULT_PINNED_COUNT);
    clamp_u64(obj, "eventLimit", 1, 100, DEFAULT_EVENT_LIMIT);
    clamp_u64(obj, "languageBarLimit", 1, 50, DEFAULT_LANGUAGE_BAR_LIMIT);

    // Validate enums.
    sanitize_enum(obj, "dataSource", &["file", "http"], "file");

    ensure_string(obj, "username", DEFAULT_USERNAME);
    ensure_string(obj, "dataBaseUrl", "");
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn sanitize_enum(map: &mut Map<String, Value>, key: &str, allowed: &[&str], default: &str) {
    let valid = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| allowed.contains(value))
        .unwrap_or(default);
    map.insert(key.to_string(), json!(valid));
}

fn ensure_string(map: &mut Map<String, Value>, key: &str, default: &str) {
    let value = map
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string();
    map.insert(key.to_string(), json!(value));
}
