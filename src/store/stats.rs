//! Summary counts for the statistics panel.
//!
//! "Recent" users are counted by reading each record's id as a millisecond
//! Unix timestamp. That holds for records created through
//! [`UserStore::create`](crate::store::UserStore::create), whose ids are
//! creation times, but not for seeded records with small numeric ids, which
//! always land far outside the window.

use crate::domain::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default width of the "recent" window, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Largest accepted window, in days.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Labels of the two charted series, in chart order.
const CHART_LABELS: [&str; 2] = ["Total Users", "Users Added Last Week"];

/// Bar/line colours matching [`CHART_LABELS`].
const CHART_COLORS: [&str; 2] = ["#4caf50", "#2196f3"];

/// Titles and chart kinds of the statistics panels, in display order.
const CHART_PANELS: [(&str, ChartKind); 2] = [
    ("Total Users", ChartKind::Bar),
    ("User Activity Over Time", ChartKind::Line),
];

/// Derived counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub users_last_week: usize,
}

/// Chart-ready dataset handed to the host's charting library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub data: Vec<usize>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
}

/// How a panel draws its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// One titled chart in the statistics panel. Every panel plots the same
/// [`ChartSeries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPanel {
    pub title: String,
    pub kind: ChartKind,
}

/// Counts the collection using the default seven-day window.
#[must_use]
pub fn compute_stats(users: &[User], now: DateTime<Utc>) -> UserStats {
    compute_stats_with_window(users, now, Duration::days(DEFAULT_WINDOW_DAYS))
}

/// Counts the collection; a record is recent when its id, read as a
/// millisecond timestamp, is strictly after `now - window`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use userdesk::domain::User;
/// use userdesk::store::compute_stats_with_window;
///
/// let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
/// let fresh = now.timestamp_millis() - 1_000;
/// let users = vec![
///     User { id: 1, name: "Seeded".into(), email: "s@x".into(), phone: String::new() },
///     User { id: fresh, name: "New".into(), email: "n@x".into(), phone: String::new() },
/// ];
///
/// let stats = compute_stats_with_window(&users, now, Duration::days(7));
/// assert_eq!(stats.total_users, 2);
/// assert_eq!(stats.users_last_week, 1);
/// ```
#[must_use]
pub fn compute_stats_with_window(users: &[User], now: DateTime<Utc>, window: Duration) -> UserStats {
    // A window reaching past chrono's range counts everyone (or no one).
    let cutoff = now.checked_sub_signed(window).map_or_else(
        || if window > Duration::zero() { i64::MIN } else { i64::MAX },
        |start| start.timestamp_millis(),
    );

    let stats = UserStats {
        total_users: users.len(),
        users_last_week: users.iter().filter(|u| u.id > cutoff).count(),
    };

    tracing::debug!(
        total = stats.total_users,
        recent = stats.users_last_week,
        cutoff_ms = cutoff,
        "stats computed"
    );
    stats
}

/// Builds the two-bar dataset shown in the statistics panel.
#[must_use]
pub fn chart_series(stats: &UserStats) -> ChartSeries {
    let owned = |items: [&str; 2]| items.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();

    ChartSeries {
        label: "User Stats".to_string(),
        labels: owned(CHART_LABELS),
        data: vec![stats.total_users, stats.users_last_week],
        background_color: owned(CHART_COLORS),
        border_color: owned(CHART_COLORS),
        border_width: 1,
    }
}

/// The charts the statistics panel shows: a bar chart then a line chart.
#[must_use]
pub fn chart_panels() -> Vec<ChartPanel> {
    CHART_PANELS
        .iter()
        .map(|&(title, kind)| ChartPanel {
            title: title.to_string(),
            kind,
        })
        .collect()
}
