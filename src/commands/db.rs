use crate::models::cache::CacheEntry;
use crate::models::snapshot::Snapshot;
use rusqlite::{params, Connection, OptionalExtension, Result};

const DB_SCHEMA_VERSION: i64 = 1;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )
}

pub fn get_db_connection(site_root: &str) -> Result<Connection> {
    // A missing directory surfaces as an open error below.
    let _ = crate::commands::settings::ensure_showcase_dir(site_root);
    let db_path = crate::commands::settings::showcase_dir(site_root).join("cache.db");
    let conn = Connection::open(db_path)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

pub fn cache_key(username: &str) -> String {
    format!("gh_cache_{username}")
}

pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM kv_store WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove_item(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
    Ok(())
}

/// Cached payload for `username` if the entry is younger than `ttl_ms`.
/// Storage and decoding failures count as a miss.
pub fn read_cached_snapshot(conn: &Connection, username: &str, ttl_ms: i64, now_ms: i64) -> Option<Snapshot> {
    let raw = match get_item(conn, &cache_key(username)) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::debug!("cache read failed for {username}: {e}");
            return None;
        }
    };

    let entry: CacheEntry = match serde_json::from_str(&raw) {
        Ok(entry) => entry,
        Err(e) => {
            log::debug!("ignoring malformed cache entry for {username}: {e}");
            return None;
        }
    };

    entry.is_fresh(ttl_ms, now_ms).then_some(entry.payload)
}

pub fn write_cached_snapshot(conn: &Connection, username: &str, snapshot: &Snapshot, now_ms: i64) {
    let entry = CacheEntry {
        saved_at: now_ms,
        payload: snapshot.clone(),
    };
    let raw = match serde_json::to_string(&entry) {
        Ok(raw) => raw,
        Err(e) => {
            log::debug!("could not encode cache entry for {username}: {e}");
            return;
        }
    };

    if let Err(e) = set_item(conn, &cache_key(username), &raw) {
        log::debug!("cache write failed for {username}: {e}");
    }
}
