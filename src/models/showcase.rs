use crate::models::snapshot::{Repository, Snapshot};
use crate::commands::settings::ShowcaseSettings;
use serde::{Deserialize, Serialize};

/// Repository with the numeric fields the grid sorts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRepo {
    #[serde(flatten)]
    pub repo: Repository,
    pub created_ms: i64,
    pub updated_ms: i64,
    pub size_kb: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    UpdatedDesc,
    StarsDesc,
    CreatedDesc,
    SizeDesc,
    NameAsc,
}

impl SortMode {
    /// Unknown values fall back to `updated_desc`, same as the select's default option.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "stars_desc" => SortMode::StarsDesc,
            "created_desc" => SortMode::CreatedDesc,
            "size_desc" => SortMode::SizeDesc,
            "name_asc" => SortMode::NameAsc,
            _ => SortMode::UpdatedDesc,
        }
    }
}

/// Current state of the search / sort / language controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoQuery {
    pub search: String,
    pub language: String,
    pub sort: String,
}

impl RepoQuery {
    pub fn sort_mode(&self) -> SortMode {
        SortMode::parse(&self.sort)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFilter {
    pub event_type: String,
    pub search: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCounters {
    pub count: usize,
    pub stars: u64,
    pub forks: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    pub percent: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopLanguage {
    pub language: String,
    pub percent: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub avg_stars: f64,
    pub avg_age_days: i64,
    pub top_language: Option<TopLanguage>,
    pub most_starred: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub icon: String,
    pub event_type: String,
    pub repo: String,
    pub elapsed: String,
    pub commits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: String,
    pub count: u64,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapWeek {
    pub week: i64,
    pub total: u64,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapView {
    pub max: u64,
    pub weeks: Vec<HeatmapWeek>,
}

/// Session state for one loaded snapshot. Replaced wholesale on reload.
#[derive(Debug, Default)]
pub struct ShowcaseState {
    pub settings: ShowcaseSettings,
    pub snapshot: Option<Snapshot>,
    pub repos: Vec<EnrichedRepo>,
}
