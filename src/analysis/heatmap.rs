use crate::models::showcase::{HeatmapCell, HeatmapView, HeatmapWeek};
use crate::models::snapshot::WeekActivity;

pub const LEVELS: u8 = 5;
const SECS_PER_DAY: i64 = 86_400;

/// Largest single-day count across all weeks, at least 1.
pub fn max_day_count(weeks: &[WeekActivity]) -> u64 {
    weeks
        .iter()
        .flat_map(|w| w.days.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1)
}

/// 0 for an empty day, otherwise `ceil(count / max * 4)` clamped to 1..=4.
pub fn intensity_level(count: u64, max: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let scaled = (count as f64 / max.max(1) as f64 * 4.0).ceil();
    scaled.clamp(1.0, (LEVELS - 1) as f64) as u8
}

pub fn build_heatmap(weeks: &[WeekActivity]) -> HeatmapView {
    let max = max_day_count(weeks);

    let weeks = weeks
        .iter()
        .map(|week| HeatmapWeek {
            week: week.week,
            total: week.total,
            cells: week
                .days
                .iter()
                .enumerate()
                .map(|(offset, count)| HeatmapCell {
                    date: day_start(week.week, offset).map(day_label).unwrap_or_default(),
                    count: *count,
                    level: intensity_level(*count, max),
                })
                .collect(),
        })
        .collect();

    HeatmapView { max, weeks }
}

fn day_start(week_start: i64, offset: usize) -> Option<i64> {
    (offset as i64)
        .checked_mul(SECS_PER_DAY)
        .and_then(|delta| week_start.checked_add(delta))
}

fn day_label(epoch_secs: i64) -> String {
    chrono::DateTime::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
