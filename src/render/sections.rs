use crate::analysis::heatmap::LEVELS;
use crate::analysis::languages::hash_color_translucent;
use crate::analysis::repos::RepoSelection;
use crate::models::showcase::{ActivityItem, HeatmapView, LanguageShare, QuickStats, RepoCounters};
use crate::models::snapshot::{GithubUser, Repository};
use crate::render::html::{external_link, format_count, format_date, html_escape};
use crate::render::{Page, Slot, SlotContent};

const FALLBACK_AVATAR: &str = "assets/avatar.png";
const PLACEHOLDER: &str = "—";
const CARD_TOPICS: usize = 3;

pub fn render_profile(page: &mut Page, user: &GithubUser, repo_count: usize) {
    page.set(
        Slot::Avatar,
        SlotContent::attr("src", user.avatar_url.as_deref().unwrap_or(FALLBACK_AVATAR)),
    );
    page.set(
        Slot::Name,
        SlotContent::text(non_empty(user.name.as_deref()).unwrap_or(PLACEHOLDER)),
    );
    page.set(
        Slot::Login,
        SlotContent::text(
            non_empty(user.login.as_deref())
                .map(|login| format!("@{login}"))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        ),
    );
    page.set(Slot::Bio, SlotContent::text(user.bio.clone().unwrap_or_default()));
    page.set(Slot::ReposCount, SlotContent::text(format_count(repo_count as u64)));
    page.set(Slot::Followers, SlotContent::text(format_count(user.followers)));
    page.set(Slot::Following, SlotContent::text(format_count(user.following)));
    if let Some(url) = non_empty(user.html_url.as_deref()) {
        page.set(Slot::ProfileLink, SlotContent::attr("href", url));
    }
}

pub fn render_language_bars(page: &mut Page, shares: &[LanguageShare]) {
    let rows: String = shares
        .iter()
        .map(|share| {
            format!(
                r#"<div class="lang-row"><div class="lang-label">{label}</div><div class="lang-bar-wrap"><div class="lang-bar" style="width:{pct}%;background:{color};color:#021">{pct}%</div></div></div>"#,
                label = html_escape(&share.language),
                pct = share.percent,
                color = share.color,
            )
        })
        .collect();
    page.set(Slot::LanguageBars, SlotContent::html(rows));
}

/// Options for a `<select>` with a leading "all" entry; `selected` stays selected if still offered.
pub fn render_select_options(page: &mut Page, slot: Slot, all_label: &str, options: &[String], selected: &str) {
    let mut html = format!(r#"<option value="">{}</option>"#, html_escape(all_label));
    for option in options {
        let escaped = html_escape(option);
        let marker = if option == selected { " selected" } else { "" };
        html.push_str(&format!(r#"<option value="{escaped}"{marker}>{escaped}</option>"#));
    }
    page.set(slot, SlotContent::html(html));
}

pub fn render_activity(page: &mut Page, items: &[ActivityItem]) {
    let html: String = items
        .iter()
        .map(|item| {
            let repo = html_escape(&item.repo);
            let commits: String = item
                .commits
                .iter()
                .map(|message| format!(r#"<div class="activity-commit">{}</div>"#, html_escape(message)))
                .collect();
            format!(
                r#"<li class="activity-item"><span class="activity-emoji">{icon}</span><div><div><strong>{kind}</strong> in {link}</div>{commits}<div class="muted">{elapsed}</div></div></li>"#,
                icon = item.icon,
                kind = html_escape(&item.event_type),
                link = external_link(&format!("https://github.com/{}", item.repo), "activity-repo", &repo),
                commits = commits,
                elapsed = html_escape(&item.elapsed),
            )
        })
        .collect();
    page.set(Slot::ActivityList, SlotContent::html(html));
}

pub fn render_repos(page: &mut Page, selection: &RepoSelection<'_>) {
    render_repo_counters(page, &selection.counters());

    let cards: String = selection
        .visible
        .iter()
        .map(|enriched| repo_card(&enriched.repo))
        .collect();
    page.set(Slot::ReposGrid, SlotContent::html(cards));
}

fn render_repo_counters(page: &mut Page, counters: &RepoCounters) {
    page.set(
        Slot::RepoCounters,
        SlotContent::text(format!(
            "Repositories: {} • ⭐ {} • 🍴 {}",
            format_count(counters.count as u64),
            format_count(counters.stars),
            format_count(counters.forks),
        )),
    );
}

fn repo_card(repo: &Repository) -> String {
    let mut meta = String::new();
    if let Some(language) = non_empty(repo.language.as_deref()) {
        meta.push_str(&format!(
            r#"<span class="repo-tag" style="background:{bg}">{name}</span>"#,
            bg = hash_color_translucent(language),
            name = html_escape(language),
        ));
    }
    for topic in repo.topics.iter().take(CARD_TOPICS) {
        meta.push_str(&format!(r##"<span class="repo-tag">#{}</span>"##, html_escape(topic)));
    }
    if let Some(license) = non_empty(repo.license.as_deref()) {
        meta.push_str(&format!(r#"<span class="repo-tag">{}</span>"#, html_escape(license)));
    }
    if let Some(tag) = repo
        .latest_release
        .as_ref()
        .and_then(|release| non_empty(release.tag_name.as_deref()))
    {
        meta.push_str(&format!(r#"<span class="repo-tag repo-release">🏷️ {}</span>"#, html_escape(tag)));
    }
    meta.push_str(&format!(
        r#"<span class="repo-stats">⭐ {}  🍴 {}  ❗ {}</span>"#,
        format_count(repo.stargazers_count),
        format_count(repo.forks_count),
        format_count(repo.open_issues_count),
    ));

    format!(
        r#"<div class="repo-card">{name}<div class="repo-desc">{desc}</div><div class="repo-meta">{meta}</div><div class="repo-updated">Updated: {updated}</div></div>"#,
        name = external_link(
            repo.html_url.as_deref().unwrap_or("#"),
            "repo-name",
            &html_escape(&repo.name)
        ),
        desc = html_escape(repo.description.as_deref().unwrap_or_default()),
        meta = meta,
        updated = format_date(repo.updated_at.as_deref()),
    )
}

pub fn render_pinned(page: &mut Page, pinned: &[&Repository]) {
    let html: String = pinned
        .iter()
        .map(|repo| {
            let mut inner = format!(
                "<div><strong>{}</strong> • ⭐ {}</div>",
                html_escape(&repo.name),
                format_count(repo.stargazers_count)
            );
            if let Some(desc) = non_empty(repo.description.as_deref()) {
                inner.push_str(&format!(r#"<div class="pinned-desc">{}</div>"#, html_escape(desc)));
            }
            external_link(repo.html_url.as_deref().unwrap_or("#"), "pinned-item", &inner)
        })
        .collect();
    page.set(Slot::PinnedList, SlotContent::html(html));
}

pub fn render_quick_stats(page: &mut Page, stats: &QuickStats) {
    let mut rows = vec![
        ("Total repositories", format_count(stats.total_repos as u64)),
        (
            "Total stars",
            format!("⭐ {} (avg: {})", format_count(stats.total_stars), stats.avg_stars),
        ),
        ("Total forks", format!("🍴 {}", format_count(stats.total_forks))),
        ("Average project age", format!("{} d", format_count(stats.avg_age_days.max(0) as u64))),
    ];
    if let Some(top) = &stats.top_language {
        rows.push(("Top language", format!("{} — {}%", top.language, top.percent)));
    }
    if let Some(name) = &stats.most_starred {
        rows.push(("Most starred", name.clone()));
    }

    let html: String = rows
        .into_iter()
        .map(|(label, value)| format!("<li><strong>{label}:</strong> {}</li>", html_escape(&value)))
        .collect();
    page.set(Slot::QuickStats, SlotContent::html(html));
}

pub fn render_heatmap(page: &mut Page, view: &HeatmapView) {
    let columns: String = view
        .weeks
        .iter()
        .map(|week| {
            let cells: String = week
                .cells
                .iter()
                .map(|cell| {
                    format!(
                        r#"<div class="heat-cell heat-l{level}" title="{date}: {count}"></div>"#,
                        level = cell.level,
                        date = cell.date,
                        count = cell.count,
                    )
                })
                .collect();
            format!(r#"<div class="heat-week" data-total="{}">{cells}</div>"#, week.total)
        })
        .collect();
    page.set(Slot::Heatmap, SlotContent::html(columns));

    let legend: String = (0..LEVELS)
        .map(|level| format!(r#"<span class="heat-cell heat-l{level}"></span>"#))
        .collect();
    page.set(
        Slot::HeatmapLegend,
        SlotContent::html(format!("<span>Less</span>{legend}<span>More</span>")),
    );
}

/// Load failures only touch the repository grid.
pub fn render_load_error(page: &mut Page, reason: &str) {
    page.set(
        Slot::ReposGrid,
        SlotContent::html(format!(
            r#"<div class="repo-card">Failed to load data: {}</div>"#,
            html_escape(reason)
        )),
    );
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
