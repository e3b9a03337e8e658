use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full profile payload as written by the snapshot generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub user: GithubUser,
    pub repos: Vec<Repository>,
    pub events: Vec<Event>,
    pub commit_activity: Vec<WeekActivity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubUser {
    pub login: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub html_url: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub language: Option<String>,
    pub languages_bytes: BTreeMap<String, u64>,
    pub topics: Vec<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub fork: bool,
    pub size: Option<u64>,
    pub license: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub contributors: Vec<Contributor>,
    pub stargazers_recent: Vec<Stargazer>,
    pub pulls_count_open: u64,
    pub pulls_count_closed: u64,
    pub releases_count: u64,
    pub latest_release: Option<LatestRelease>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributor {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub contributions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stargazer {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub starred_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestRelease {
    pub tag_name: Option<String>,
    pub name: Option<String>,
    pub html_url: Option<String>,
    pub published_at: Option<String>,
}

/// Public event as returned by `/users/<login>/events/public`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: Option<String>,
    pub repo: Option<EventRepo>,
    pub payload: Option<EventPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    pub commits: Vec<PushCommit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushCommit {
    pub message: String,
}

/// One week of aggregated commit counts (`week` is the epoch second of the week start).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekActivity {
    pub week: i64,
    pub total: u64,
    pub days: Vec<u64>,
}

impl Event {
    pub fn repo_name(&self) -> &str {
        self.repo.as_ref().map(|r| r.name.as_str()).unwrap_or("")
    }
}

/// Parses an ISO-8601 timestamp into epoch milliseconds, 0 when absent or invalid.
pub fn timestamp_ms(value: Option<&str>) -> i64 {
    value
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}
