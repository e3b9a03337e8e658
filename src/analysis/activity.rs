use crate::models::showcase::{ActivityFilter, ActivityItem};
use crate::models::snapshot::{timestamp_ms, Event};

const DEFAULT_ICON: &str = "•";
const MAX_COMMIT_MESSAGES: usize = 3;

const EVENT_ICONS: &[(&str, &str)] = &[
    ("PushEvent", "📦"),
    ("CreateEvent", "🆕"),
    ("ForkEvent", "🍴"),
    ("WatchEvent", "⭐"),
    ("IssuesEvent", "❗"),
    ("IssueCommentEvent", "💬"),
    ("PullRequestEvent", "🔀"),
    ("ReleaseEvent", "🏷️"),
];

pub fn activity_icon(event_type: &str) -> &'static str {
    EVENT_ICONS
        .iter()
        .find(|(name, _)| *name == event_type)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Coarse elapsed-time label using only the largest non-zero unit.
pub fn time_ago(then_ms: i64, now_ms: i64) -> String {
    let secs = (now_ms - then_ms).max(0) / 1000;
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days} d ago")
    } else if hours > 0 {
        format!("{hours} h ago")
    } else if mins > 0 {
        format!("{mins} min ago")
    } else {
        format!("{secs} s ago")
    }
}

pub fn matches_filter(event: &Event, filter: &ActivityFilter) -> bool {
    let wanted_type = filter.event_type.trim();
    if !wanted_type.is_empty() && event.event_type != wanted_type {
        return false;
    }

    let needle = filter.search.trim().to_lowercase();
    needle.is_empty()
        || event.repo_name().to_lowercase().contains(&needle)
        || event.event_type.to_lowercase().contains(&needle)
}

/// Events are assumed newest-first already; the filter applies before truncation.
pub fn build_activity(
    events: &[Event],
    filter: &ActivityFilter,
    limit: usize,
    now_ms: i64,
) -> Vec<ActivityItem> {
    events
        .iter()
        .filter(|event| matches_filter(event, filter))
        .take(limit)
        .map(|event| ActivityItem {
            icon: activity_icon(&event.event_type).to_string(),
            event_type: event.event_type.clone(),
            repo: event.repo_name().to_string(),
            elapsed: event
                .created_at
                .as_deref()
                .map(|raw| time_ago(timestamp_ms(Some(raw)), now_ms))
                .unwrap_or_default(),
            commits: event
                .payload
                .as_ref()
                .map(|payload| {
                    payload
                        .commits
                        .iter()
                        .take(MAX_COMMIT_MESSAGES)
                        .map(|c| c.message.lines().next().unwrap_or_default().to_string())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Distinct event types in snapshot order, for the type filter selector.
pub fn event_types(events: &[Event]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for event in events {
        if !event.event_type.is_empty() && !types.contains(&event.event_type) {
            types.push(event.event_type.clone());
        }
    }
    types
}
