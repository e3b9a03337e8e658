pub mod html;
pub mod sections;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Elements of the host page the showcase writes into, by DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Avatar,
    Name,
    Login,
    Bio,
    ReposCount,
    Followers,
    Following,
    ProfileLink,
    LanguageBars,
    LanguageFilter,
    ActivityTypeFilter,
    ActivityList,
    ReposGrid,
    RepoCounters,
    PinnedList,
    QuickStats,
    Heatmap,
    HeatmapLegend,
}

impl Slot {
    pub const ALL: [Slot; 18] = [
        Slot::Avatar,
        Slot::Name,
        Slot::Login,
        Slot::Bio,
        Slot::ReposCount,
        Slot::Followers,
        Slot::Following,
        Slot::ProfileLink,
        Slot::LanguageBars,
        Slot::LanguageFilter,
        Slot::ActivityTypeFilter,
        Slot::ActivityList,
        Slot::ReposGrid,
        Slot::RepoCounters,
        Slot::PinnedList,
        Slot::QuickStats,
        Slot::Heatmap,
        Slot::HeatmapLegend,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Slot::Avatar => "gh-avatar",
            Slot::Name => "gh-name",
            Slot::Login => "gh-login",
            Slot::Bio => "gh-bio",
            Slot::ReposCount => "gh-repos-count",
            Slot::Followers => "gh-followers",
            Slot::Following => "gh-following",
            Slot::ProfileLink => "gh-profile-link",
            Slot::LanguageBars => "lang-bars",
            Slot::LanguageFilter => "filter-language",
            Slot::ActivityTypeFilter => "filter-activity-type",
            Slot::ActivityList => "activity-list",
            Slot::ReposGrid => "repos-grid",
            Slot::RepoCounters => "repo-counters",
            Slot::PinnedList => "pinned-list",
            Slot::QuickStats => "quick-stats",
            Slot::Heatmap => "heatmap",
            Slot::HeatmapLegend => "heatmap-legend",
        }
    }

    pub fn from_id(id: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

/// What the host should do with a slot element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotContent {
    /// Replace `textContent`.
    Text { value: String },
    /// Replace `innerHTML`; the value is already escaped.
    Html { value: String },
    /// Set an attribute and reveal the element.
    Attr { name: String, value: String },
}

impl SlotContent {
    pub fn text(value: impl Into<String>) -> Self {
        SlotContent::Text { value: value.into() }
    }

    pub fn html(value: impl Into<String>) -> Self {
        SlotContent::Html { value: value.into() }
    }

    pub fn attr(name: &str, value: impl Into<String>) -> Self {
        SlotContent::Attr {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// The set of slots a host page provides, plus the updates rendered into them.
/// Writes to a slot the page lacks are dropped.
#[derive(Debug, Clone, Default)]
pub struct Page {
    available: BTreeSet<Slot>,
    updates: BTreeMap<Slot, SlotContent>,
}

impl Page {
    pub fn new(available: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            available: available.into_iter().collect(),
            updates: BTreeMap::new(),
        }
    }

    pub fn with_all_slots() -> Self {
        Self::new(Slot::ALL)
    }

    /// Builds a page from DOM ids reported by the host; unknown ids are ignored.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        Self::new(ids.iter().filter_map(|id| Slot::from_id(id.as_ref())))
    }

    pub fn has(&self, slot: Slot) -> bool {
        self.available.contains(&slot)
    }

    pub fn set(&mut self, slot: Slot, content: SlotContent) -> bool {
        if !self.has(slot) {
            return false;
        }
        self.updates.insert(slot, content);
        true
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotContent> {
        self.updates.get(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Updates keyed by DOM id, ready to hand to the host.
    pub fn into_updates(self) -> BTreeMap<String, SlotContent> {
        self.updates
            .into_iter()
            .map(|(slot, content)| (slot.id().to_string(), content))
            .collect()
    }
}
