use clap::Subcommand;
use quill_core::entities::PerformanceRange;

#[derive(Clone, Debug, Subcommand)]
pub enum AnalyticsCommands {
    /// Daily views, clicks and conversions.
    Performance {
        /// Days covered, e.g. 7, 30 or 90.
        #[arg(long, default_value = "30")]
        range: PerformanceRange,
    },
    /// Totals and rates over the range.
    Overview {
        #[arg(long, default_value = "30")]
        range: PerformanceRange,
    },
}
