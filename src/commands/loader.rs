use crate::commands::db;
use crate::commands::settings::{DataSource, ShowcaseSettings};
use crate::error::{LoadError, Result};
use crate::models::snapshot::Snapshot;
use std::path::Path;

pub fn snapshot_location(site_root: &str, source: &DataSource, username: &str) -> String {
    match source {
        DataSource::File => Path::new(site_root)
            .join("data")
            .join(format!("{username}.json"))
            .to_string_lossy()
            .to_string(),
        DataSource::Http { base_url } => format!("{base_url}/data/{username}.json"),
    }
}

/// Loads the snapshot for the configured user, serving from the cache while it is fresh.
pub async fn load_snapshot(site_root: &str, settings: &ShowcaseSettings, now_ms: i64) -> Result<Snapshot> {
    let username = settings.username.as_str();
    let use_cache = settings.cache_ttl_ms > 0;

    if use_cache {
        if let Some(cached) = read_cache(site_root, username, settings.cache_ttl_ms, now_ms) {
            log::debug!("serving snapshot for {username} from cache");
            return Ok(cached);
        }
    }

    let location = snapshot_location(site_root, &settings.source, username);
    let snapshot = fetch_snapshot(&settings.source, &location).await?;
    log::info!(
        "loaded snapshot for {username} from {location} ({} repos, {} events)",
        snapshot.repos.len(),
        snapshot.events.len()
    );

    if use_cache {
        write_cache(site_root, username, &snapshot, now_ms);
    }

    Ok(snapshot)
}

pub async fn fetch_snapshot(source: &DataSource, location: &str) -> Result<Snapshot> {
    let body = match source {
        DataSource::File => read_file(location).await?,
        DataSource::Http { .. } => fetch_http(location).await?,
    };
    Ok(serde_json::from_str(&body)?)
}

async fn read_file(path: &str) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::Status {
            status: 404,
            url: path.to_string(),
        }),
        Err(source) => Err(LoadError::Io {
            path: path.to_string(),
            source,
        }),
    }
}

async fn fetch_http(url: &str) -> Result<String> {
    let response = reqwest::Client::new()
        .get(url)
        .header("Cache-Control", "no-store")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(LoadError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}

// Connections are opened and dropped inside these helpers so none is held across an await.
fn read_cache(site_root: &str, username: &str, ttl_ms: i64, now_ms: i64) -> Option<Snapshot> {
    match db::get_db_connection(site_root) {
        Ok(conn) => db::read_cached_snapshot(&conn, username, ttl_ms, now_ms),
        Err(e) => {
            log::debug!("cache unavailable: {e}");
            None
        }
    }
}

fn write_cache(site_root: &str, username: &str, snapshot: &Snapshot, now_ms: i64) {
    match db::get_db_connection(site_root) {
        Ok(conn) => db::write_cached_snapshot(&conn, username, snapshot, now_ms),
        Err(e) => log::debug!("cache unavailable: {e}"),
    }
}

pub fn invalidate_cache(site_root: &str, username: &str) {
    let removed = db::get_db_connection(site_root)
        .and_then(|conn| db::remove_item(&conn, &db::cache_key(username)));
    if let Err(e) = removed {
        log::debug!("could not drop cache entry for {username}: {e}");
    }
}
