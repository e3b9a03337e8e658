use crate::analysis::{activity, heatmap, languages, pinned, repos, stats};
use crate::commands::loader::load_snapshot;
use crate::commands::settings::load_showcase_settings;
use crate::models::showcase::{ActivityFilter, RepoQuery, ShowcaseState};
use crate::render::sections::*;
use crate::render::{Page, Slot, SlotContent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub type SharedShowcase = Arc<Mutex<ShowcaseState>>;

/// Slot updates for the host page, plus the load failure if there was one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    pub error: Option<String>,
    pub updates: BTreeMap<String, SlotContent>,
}

#[tauri::command]
pub async fn load_showcase(
    site_root: String,
    slots: Vec<String>,
    state: tauri::State<'_, SharedShowcase>,
) -> Result<RenderResult, String> {
    load_showcase_internal(&site_root, &slots, state.inner(), now_ms()).await
}

/// Loads settings and the snapshot, replaces the session state, and renders every section.
/// A failed load renders an error card into the repository grid instead of returning `Err`.
pub async fn load_showcase_internal(
    site_root: &str,
    slots: &[String],
    state: &SharedShowcase,
    now_ms: i64,
) -> Result<RenderResult, String> {
    let mut page = Page::from_ids(slots);

    let settings = load_showcase_settings(site_root);
    let snapshot = match load_snapshot(site_root, &settings, now_ms).await {
        Ok(snapshot) => snapshot,
        Err(e) => return Ok(failed_load(site_root, page, e.to_string())),
    };

    let mut guard = state.lock().map_err(|_| "Showcase state lock error".to_string())?;
    *guard = ShowcaseState {
        repos: repos::enrich_repos(&snapshot.repos),
        settings,
        snapshot: Some(snapshot),
    };
    render_full_page(&guard, &mut page, now_ms);

    Ok(RenderResult {
        error: None,
        updates: page.into_updates(),
    })
}

fn failed_load(site_root: &str, mut page: Page, reason: String) -> RenderResult {
    log::error!("failed to load showcase from {site_root}: {reason}");
    render_load_error(&mut page, &reason);
    RenderResult {
        error: Some(reason),
        updates: page.into_updates(),
    }
}

/// Renders every section of a loaded showcase with default controls.
pub fn render_full_page(state: &ShowcaseState, page: &mut Page, now_ms: i64) {
    let Some(snapshot) = state.snapshot.as_ref() else {
        return;
    };
    let settings = &state.settings;

    render_profile(page, &snapshot.user, snapshot.repos.len());

    let totals = languages::language_totals(&snapshot.repos);
    render_language_bars(page, &languages::language_shares(&totals, settings.language_bar_limit));
    render_select_options(
        page,
        Slot::LanguageFilter,
        "All languages",
        &languages::language_options(&snapshot.repos),
        "",
    );

    render_select_options(
        page,
        Slot::ActivityTypeFilter,
        "All events",
        &activity::event_types(&snapshot.events),
        "",
    );
    render_activity(
        page,
        &activity::build_activity(&snapshot.events, &ActivityFilter::default(), settings.event_limit, now_ms),
    );

    render_pinned(page, &pinned::select_pinned(&snapshot.repos, settings.pinned_count));
    render_quick_stats(page, &stats::quick_stats(&snapshot.repos, now_ms));
    if !snapshot.commit_activity.is_empty() {
        render_heatmap(page, &heatmap::build_heatmap(&snapshot.commit_activity));
    }

    render_repos(page, &repos::select_repos(&state.repos, &RepoQuery::default()));
}

#[tauri::command]
pub async fn query_repos(
    query: RepoQuery,
    slots: Vec<String>,
    state: tauri::State<'_, SharedShowcase>,
) -> Result<BTreeMap<String, SlotContent>, String> {
    query_repos_internal(&query, &slots, state.inner())
}

/// Re-renders the grid and counters for the current control values.
pub fn query_repos_internal(
    query: &RepoQuery,
    slots: &[String],
    state: &SharedShowcase,
) -> Result<BTreeMap<String, SlotContent>, String> {
    let guard = state.lock().map_err(|_| "Showcase state lock error".to_string())?;
    ensure_loaded(&guard)?;

    let mut page = Page::from_ids(slots);
    let selection = repos::select_repos(&guard.repos, query);
    log::debug!(
        "repo query {:?}: {} shown, {} filtered out",
        query,
        selection.visible.len(),
        selection.excluded
    );
    render_repos(&mut page, &selection);
    Ok(page.into_updates())
}

#[tauri::command]
pub async fn query_activity(
    filter: ActivityFilter,
    slots: Vec<String>,
    state: tauri::State<'_, SharedShowcase>,
) -> Result<BTreeMap<String, SlotContent>, String> {
    query_activity_internal(&filter, &slots, state.inner(), now_ms())
}

pub fn query_activity_internal(
    filter: &ActivityFilter,
    slots: &[String],
    state: &SharedShowcase,
    now_ms: i64,
) -> Result<BTreeMap<String, SlotContent>, String> {
    let guard = state.lock().map_err(|_| "Showcase state lock error".to_string())?;
    let snapshot = ensure_loaded(&guard)?;

    let mut page = Page::from_ids(slots);
    let items = activity::build_activity(&snapshot.events, filter, guard.settings.event_limit, now_ms);
    render_activity(&mut page, &items);
    Ok(page.into_updates())
}

fn ensure_loaded(state: &ShowcaseState) -> Result<&crate::models::snapshot::Snapshot, String> {
    state
        .snapshot
        .as_ref()
        .ok_or("No showcase data loaded. Call load_showcase first.".to_string())
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
