use gh_showcase_lib::commands::settings::{get_settings, save_settings};
use gh_showcase_lib::commands::showcase::{
    load_showcase_internal, query_activity_internal, query_repos_internal, SharedShowcase,
};
use gh_showcase_lib::models::showcase::{ActivityFilter, RepoQuery, ShowcaseState};
use gh_showcase_lib::render::{Slot, SlotContent};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MINUTE_MS: i64 = 60 * 1000;

fn snapshot_json() -> serde_json::Value {
    json!({
        "user": {
            "login": "octo",
            "name": "Octo Cat",
            "avatar_url": "https://avatars.example/octo.png",
            "bio": "Builds <things>",
            "followers": 1200,
            "following": 3,
            "html_url": "https://github.com/octo"
        },
        "repos": [
            {
                "name": "parser-kit",
                "description": "Fast parser toolkit",
                "html_url": "https://github.com/octo/parser-kit",
                "language": "Rust",
                "languages_bytes": { "Rust": 900, "Shell": 100 },
                "stargazers_count": 20,
                "forks_count": 2,
                "topics": ["parsing"],
                "created_at": "2022-01-01T00:00:00Z",
                "updated_at": "2024-05-01T00:00:00Z"
            },
            {
                "name": "dotfiles",
                "description": null,
                "html_url": "https://github.com/octo/dotfiles",
                "language": "Shell",
                "languages_bytes": { "Shell": 300 },
                "stargazers_count": 5,
                "forks_count": 0,
                "created_at": "2021-01-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z"
            },
            {
                "name": "upstream-fork",
                "fork": true,
                "stargazers_count": 50,
                "languages_bytes": {},
                "updated_at": "2023-01-01T00:00:00Z"
            }
        ],
        "events": [
            { "type": "PushEvent", "created_at": "2024-06-01T00:00:00Z", "repo": { "name": "octo/dotfiles" },
              "payload": { "commits": [ { "message": "tweak prompt" } ] } },
            { "type": "WatchEvent", "created_at": "2024-05-30T00:00:00Z", "repo": { "name": "rust-lang/rust" } }
        ],
        "commit_activity": [
            { "week": 1704585600, "total": 13, "days": [0, 3, 0, 10, 0, 0, 0] }
        ]
    })
}

fn create_site() -> (TempDir, String) {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let site_root = temp_dir.path().to_string_lossy().to_string();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).expect("create data dir");
    fs::write(
        data_dir.join("octo.json"),
        serde_json::to_string_pretty(&snapshot_json()).expect("encode snapshot"),
    )
    .expect("write snapshot");
    (temp_dir, site_root)
}

async fn configure(site_root: &str, settings: serde_json::Value) {
    save_settings(site_root.to_string(), settings)
        .await
        .expect("save settings");
}

fn all_slots() -> Vec<String> {
    Slot::ALL.iter().map(|slot| slot.id().to_string()).collect()
}

fn new_state() -> SharedShowcase {
    Arc::new(Mutex::new(ShowcaseState::default()))
}

fn value_of(updates: &BTreeMap<String, SlotContent>, id: &str) -> String {
    match updates.get(id).unwrap_or_else(|| panic!("missing update for {id}")) {
        SlotContent::Text { value } | SlotContent::Html { value } => value.clone(),
        SlotContent::Attr { value, .. } => value.clone(),
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[tokio::test]
async fn unwritable_showcase_dir_still_renders_the_page() {
    let (tmp, site_root) = create_site();
    fs::copy(
        tmp.path().join("data").join("octo.json"),
        tmp.path().join("data").join("octocat.json"),
    )
    .expect("copy snapshot for the default user");
    fs::write(tmp.path().join(".showcase"), "not a directory").expect("block settings dir");
    let state = new_state();

    let result = load_showcase_internal(&site_root, &all_slots(), &state, now())
        .await
        .expect("load showcase");

    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    assert_eq!(value_of(&result.updates, "gh-name"), "Octo Cat");
    assert!(value_of(&result.updates, "repos-grid").contains("parser-kit"));
}

#[tokio::test]
async fn load_renders_every_section_from_the_data_file() {
    let (_tmp, site_root) = create_site();
    configure(&site_root, json!({ "username": "octo" })).await;
    let state = new_state();

    let result = load_showcase_internal(&site_root, &all_slots(), &state, now())
        .await
        .expect("load showcase");

    assert!(result.error.is_none());
    let updates = &result.updates;
    assert_eq!(value_of(updates, "gh-name"), "Octo Cat");
    assert_eq!(value_of(updates, "gh-login"), "@octo");
    assert_eq!(value_of(updates, "gh-followers"), "1,200");
    assert_eq!(value_of(updates, "gh-repos-count"), "3");
    assert_eq!(value_of(updates, "gh-profile-link"), "https://github.com/octo");

    let pinned = value_of(updates, "pinned-list");
    assert!(pinned.contains("parser-kit"));
    assert!(!pinned.contains("upstream-fork"));

    let bars = value_of(updates, "lang-bars");
    assert!(bars.contains("Rust"));
    assert!(bars.contains("69.2%"));

    assert!(value_of(updates, "filter-language").contains(r#"<option value="Shell">"#));
    assert!(value_of(updates, "activity-list").contains("tweak prompt"));
    assert!(value_of(updates, "heatmap").contains("heat-l4"));
    assert_eq!(
        value_of(updates, "repo-counters"),
        "Repositories: 3 • ⭐ 75 • 🍴 2"
    );

    let guard = state.lock().expect("state lock");
    assert_eq!(guard.repos.len(), 3);
    assert_eq!(guard.settings.username, "octo");
}

#[tokio::test]
async fn missing_slots_are_skipped() {
    let (_tmp, site_root) = create_site();
    configure(&site_root, json!({ "username": "octo" })).await;

    let slots = vec!["gh-name".to_string(), "repos-grid".to_string(), "unknown".to_string()];
    let result = load_showcase_internal(&site_root, &slots, &new_state(), now())
        .await
        .expect("load showcase");

    let keys: Vec<&str> = result.updates.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["gh-name", "repos-grid"]);
}

#[tokio::test]
async fn missing_snapshot_surfaces_only_in_the_repository_grid() {
    let (_tmp, site_root) = create_site();
    configure(&site_root, json!({ "username": "nobody" })).await;

    let result = load_showcase_internal(&site_root, &all_slots(), &new_state(), now())
        .await
        .expect("load returns a rendered error");

    let error = result.error.expect("load error");
    assert!(error.contains("404"), "unexpected error: {error}");
    assert_eq!(result.updates.len(), 1);
    assert!(value_of(&result.updates, "repos-grid").contains("Failed to load data"));
}

#[tokio::test]
async fn fresh_cache_entry_is_served_without_reading_the_source() {
    let (tmp, site_root) = create_site();
    configure(&site_root, json!({ "username": "octo", "cacheTtlMinutes": 10 })).await;
    let start = now();

    load_showcase_internal(&site_root, &all_slots(), &new_state(), start)
        .await
        .expect("first load");
    fs::remove_file(tmp.path().join("data").join("octo.json")).expect("remove snapshot");

    let cached = load_showcase_internal(&site_root, &all_slots(), &new_state(), start + 9 * MINUTE_MS)
        .await
        .expect("cached load");
    assert!(cached.error.is_none());
    assert_eq!(value_of(&cached.updates, "gh-name"), "Octo Cat");

    let expired = load_showcase_internal(&site_root, &all_slots(), &new_state(), start + 10 * MINUTE_MS)
        .await
        .expect("expired load");
    assert!(expired.error.is_some());
}

#[tokio::test]
async fn zero_ttl_disables_the_cache() {
    let (tmp, site_root) = create_site();
    configure(&site_root, json!({ "username": "octo", "cacheTtlMinutes": 0 })).await;

    load_showcase_internal(&site_root, &all_slots(), &new_state(), now())
        .await
        .expect("first load");
    fs::remove_file(tmp.path().join("data").join("octo.json")).expect("remove snapshot");

    let second = load_showcase_internal(&site_root, &all_slots(), &new_state(), now())
        .await
        .expect("second load");
    assert!(second.error.is_some());
}

#[tokio::test]
async fn http_source_fetches_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/octo.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(snapshot_json().to_string()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/broken.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (_tmp, site_root) = create_site();
    configure(
        &site_root,
        json!({ "username": "octo", "dataSource": "http", "dataBaseUrl": server.uri(), "cacheTtlMinutes": 0 }),
    )
    .await;

    let ok = load_showcase_internal(&site_root, &all_slots(), &new_state(), now())
        .await
        .expect("http load");
    assert!(ok.error.is_none());
    assert_eq!(value_of(&ok.updates, "gh-login"), "@octo");

    configure(&site_root, json!({ "username": "broken" })).await;
    let failed = load_showcase_internal(&site_root, &all_slots(), &new_state(), now())
        .await
        .expect("http failure is rendered");
    let error = failed.error.expect("status error");
    assert!(error.contains("HTTP 500"), "unexpected error: {error}");
}

#[tokio::test]
async fn repo_and_activity_queries_rerender_their_sections() {
    let (_tmp, site_root) = create_site();
    configure(&site_root, json!({ "username": "octo" })).await;
    let state = new_state();
    load_showcase_internal(&site_root, &all_slots(), &state, now())
        .await
        .expect("load showcase");

    let updates = query_repos_internal(
        &RepoQuery {
            search: "PARSER".to_string(),
            language: String::new(),
            sort: "stars_desc".to_string(),
        },
        &all_slots(),
        &state,
    )
    .expect("query repos");
    let grid = value_of(&updates, "repos-grid");
    assert!(grid.contains("parser-kit"));
    assert!(!grid.contains("dotfiles"));
    assert_eq!(value_of(&updates, "repo-counters"), "Repositories: 1 • ⭐ 20 • 🍴 2");

    let by_language = query_repos_internal(
        &RepoQuery {
            language: "Shell".to_string(),
            sort: "name_asc".to_string(),
            ..RepoQuery::default()
        },
        &all_slots(),
        &state,
    )
    .expect("query by language");
    let grid = value_of(&by_language, "repos-grid");
    let dotfiles = grid.find("dotfiles").expect("dotfiles shown");
    let parser = grid.find("parser-kit").expect("parser-kit shown");
    assert!(dotfiles < parser);

    let activity = query_activity_internal(
        &ActivityFilter {
            event_type: "WatchEvent".to_string(),
            ..ActivityFilter::default()
        },
        &all_slots(),
        &state,
        now(),
    )
    .expect("query activity");
    let list = value_of(&activity, "activity-list");
    assert!(list.contains("rust-lang/rust"));
    assert!(!list.contains("octo/dotfiles"));
}

#[tokio::test]
async fn settings_commands_round_trip_and_merge_partial_updates() {
    let (_tmp, site_root) = create_site();

    let initial = get_settings(site_root.clone()).await.expect("load settings");
    assert_eq!(initial["cacheTtlMinutes"], json!(10));
    assert_eq!(initial["pinnedCount"], json!(4));

    let saved = save_settings(site_root.clone(), json!({ "pinnedCount": 6, "eventLimit": 20 }))
        .await
        .expect("save settings");
    assert_eq!(saved["pinnedCount"], json!(6));
    assert_eq!(saved["eventLimit"], json!(20));
    assert_eq!(saved["cacheTtlMinutes"], initial["cacheTtlMinutes"]);

    let reloaded = get_settings(site_root.clone()).await.expect("reload settings");
    assert_eq!(reloaded, saved);
}
