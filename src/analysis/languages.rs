use crate::models::showcase::{LanguageShare, TopLanguage};
use crate::models::snapshot::Repository;
use std::collections::{BTreeMap, BTreeSet};

/// Language totals: language → summed byte count across all repositories.
pub type LanguageTotals = BTreeMap<String, u64>;

pub fn language_totals(repos: &[Repository]) -> LanguageTotals {
    let mut totals = LanguageTotals::new();
    for repo in repos {
        for (language, bytes) in &repo.languages_bytes {
            *totals.entry(language.clone()).or_insert(0) += bytes;
        }
    }
    totals
}

/// Percentage denominator, never zero.
pub fn total_bytes(totals: &LanguageTotals) -> u64 {
    totals.values().sum::<u64>().max(1)
}

/// Languages ordered by bytes descending, truncated to `limit`, with one-decimal shares.
pub fn language_shares(totals: &LanguageTotals, limit: usize) -> Vec<LanguageShare> {
    let sum = total_bytes(totals) as f64;
    let mut ordered: Vec<(&String, &u64)> = totals.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(a.1));

    ordered
        .into_iter()
        .take(limit)
        .map(|(language, bytes)| LanguageShare {
            language: language.clone(),
            bytes: *bytes,
            percent: (*bytes as f64 / sum * 1000.0).round() / 10.0,
            color: hash_color(language),
        })
        .collect()
}

pub fn top_language(totals: &LanguageTotals) -> Option<TopLanguage> {
    let sum = total_bytes(totals) as f64;
    // max_by_key keeps the last maximum; iterate in reverse so ties resolve to the first name
    totals
        .iter()
        .rev()
        .max_by_key(|(_, bytes)| **bytes)
        .map(|(language, bytes)| TopLanguage {
            language: language.clone(),
            percent: (*bytes as f64 / sum * 100.0).round() as u64,
        })
}

/// Every language mentioned by any repository, sorted, for the filter selector.
pub fn language_options(repos: &[Repository]) -> Vec<String> {
    let mut all = BTreeSet::new();
    for repo in repos {
        all.extend(repo.languages_bytes.keys().cloned());
        if let Some(language) = repo.language.as_ref().filter(|l| !l.is_empty()) {
            all.insert(language.clone());
        }
    }
    all.into_iter().collect()
}

/// Stable HSL color for any language name.
pub fn hash_color(name: &str) -> String {
    format!("hsl({} 70% 55%)", hash_hue(name))
}

/// Same hue with a translucent alpha, used for tag backgrounds.
pub fn hash_color_translucent(name: &str) -> String {
    format!("hsl({} 70% 55% / 0.13)", hash_hue(name))
}

fn hash_hue(name: &str) -> u32 {
    let hash = name
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32));
    hash % 360
}
