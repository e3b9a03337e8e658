use crate::models::showcase::{EnrichedRepo, RepoCounters, RepoQuery, SortMode};
use crate::models::snapshot::{timestamp_ms, Repository};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub fn enrich_repos(repos: &[Repository]) -> Vec<EnrichedRepo> {
    repos
        .iter()
        .map(|repo| EnrichedRepo {
            created_ms: timestamp_ms(repo.created_at.as_deref()),
            updated_ms: timestamp_ms(repo.updated_at.as_deref()),
            size_kb: repo.size.unwrap_or(0),
            repo: repo.clone(),
        })
        .collect()
}

/// Result of applying a query: the visible repositories plus how many were filtered out.
#[derive(Debug, Clone)]
pub struct RepoSelection<'a> {
    pub visible: Vec<&'a EnrichedRepo>,
    pub excluded: usize,
}

impl RepoSelection<'_> {
    pub fn counters(&self) -> RepoCounters {
        RepoCounters {
            count: self.visible.len(),
            stars: self.visible.iter().map(|r| r.repo.stargazers_count).sum(),
            forks: self.visible.iter().map(|r| r.repo.forks_count).sum(),
        }
    }
}

pub fn select_repos<'a>(repos: &'a [EnrichedRepo], query: &RepoQuery) -> RepoSelection<'a> {
    let (mut visible, excluded): (Vec<&EnrichedRepo>, Vec<&EnrichedRepo>) =
        repos.iter().partition(|repo| matches_query(repo, query));
    sort_repos(&mut visible, query.sort_mode());

    RepoSelection {
        visible,
        excluded: excluded.len(),
    }
}

pub fn matches_query(repo: &EnrichedRepo, query: &RepoQuery) -> bool {
    matches_search(&repo.repo, &query.search) && matches_language(&repo.repo, &query.language)
}

fn matches_search(repo: &Repository, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    repo.name.to_lowercase().contains(&needle)
        || repo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

fn matches_language(repo: &Repository, language: &str) -> bool {
    let language = language.trim();
    if language.is_empty() {
        return true;
    }

    repo.language.as_deref() == Some(language)
        || repo.languages_bytes.get(language).is_some_and(|bytes| *bytes > 0)
}

/// Stable sort; ties keep their encounter order.
pub fn sort_repos(repos: &mut [&EnrichedRepo], mode: SortMode) {
    match mode {
        SortMode::StarsDesc => {
            repos.sort_by(|a, b| b.repo.stargazers_count.cmp(&a.repo.stargazers_count))
        }
        SortMode::CreatedDesc => repos.sort_by(|a, b| b.created_ms.cmp(&a.created_ms)),
        SortMode::SizeDesc => repos.sort_by(|a, b| b.size_kb.cmp(&a.size_kb)),
        SortMode::NameAsc => repos.sort_by(|a, b| locale_compare(&a.repo.name, &b.repo.name)),
        SortMode::UpdatedDesc => repos.sort_by(|a, b| b.updated_ms.cmp(&a.updated_ms)),
    }
}

/// Accent- and case-insensitive ordering. Ties fall back to the accented form,
/// then lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
