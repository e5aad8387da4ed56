//! Performance analytics: the validated write pipeline for monthly rows,
//! cross-campaign aggregation, and dashboard summary stats.

pub mod aggregate;
pub mod pipeline;
pub mod stats;

pub use aggregate::{aggregate_monthly, MonthlyTotals};
pub use pipeline::PerformancePipeline;
pub use stats::{compute_stats, DashboardStats};
