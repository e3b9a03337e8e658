use crate::analysis::languages::{language_totals, top_language};
use crate::models::showcase::QuickStats;
use crate::models::snapshot::{timestamp_ms, Repository};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Aggregate summary over every repository in the snapshot.
pub fn quick_stats(repos: &[Repository], now_ms: i64) -> QuickStats {
    let total_repos = repos.len();
    let total_stars: u64 = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks: u64 = repos.iter().map(|r| r.forks_count).sum();

    let avg_stars = if total_repos > 0 {
        (total_stars as f64 / total_repos as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    // Repositories without a creation date carry no age.
    let ages: Vec<f64> = repos
        .iter()
        .map(|r| timestamp_ms(r.created_at.as_deref()))
        .filter(|created| *created > 0)
        .map(|created| (now_ms - created) as f64 / MS_PER_DAY)
        .collect();
    let avg_age_days = if ages.is_empty() {
        0
    } else {
        (ages.iter().sum::<f64>() / ages.len() as f64).round() as i64
    };

    let most_starred = repos
        .iter()
        .filter(|r| r.stargazers_count > 0)
        .fold(None::<&Repository>, |best, r| match best {
            Some(b) if b.stargazers_count >= r.stargazers_count => Some(b),
            _ => Some(r),
        })
        .map(|r| r.name.clone());

    QuickStats {
        total_repos,
        total_stars,
        total_forks,
        avg_stars,
        avg_age_days,
        top_language: top_language(&language_totals(repos)),
        most_starred,
    }
}
