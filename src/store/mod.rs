//! User collection and the values derived from it.
//!
//! # Modules
//!
//! - `collection`: [`UserStore`], the only owner and mutator of the record list
//! - `projection`: search filter and name sort producing the visible list
//! - `stats`: total and recent counts plus the chart dataset and panels

pub mod collection;
pub mod projection;
pub mod stats;

pub use collection::{FixedAnswer, Prompt, UserStore, DELETE_CONFIRMATION};
pub use projection::{locale_cmp, project, SortOrder};
pub use stats::{
    chart_panels, chart_series, compute_stats, compute_stats_with_window, ChartKind, ChartPanel,
    ChartSeries, UserStats, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
};
