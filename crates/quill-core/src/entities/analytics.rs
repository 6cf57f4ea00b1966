use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Longest range the analytics screens request.
const MAX_RANGE_DAYS: u32 = 365;

/// Number of days covered by an analytics request (`"7"`, `"30"`, `"90"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PerformanceRange(u32);

impl PerformanceRange {
    /// Build a range, rejecting zero and anything beyond a year.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `days` is out of bounds.
    pub fn new(days: u32) -> Result<Self, CoreError> {
        if days == 0 || days > MAX_RANGE_DAYS {
            return Err(CoreError::Validation(format!(
                "range must be between 1 and {MAX_RANGE_DAYS} days, got {days}"
            )));
        }
        Ok(Self(days))
    }

    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }

    /// Deterministic stand-in series used by mock mode and as the fallback
    /// when the backend is unreachable.
    ///
    /// Contains `days + 1` points (day 0 through day `days` inclusive),
    /// ending at `end`.
    #[must_use]
    pub fn mock_series(self, end: NaiveDate) -> Vec<PerformancePoint> {
        let start = end
            .checked_sub_days(Days::new(u64::from(self.0)))
            .unwrap_or(end);
        (0..=self.0)
            .map(|offset| {
                let i = u64::from(offset);
                let views = 800 + (i * 7919) % 400;
                let clicks = views / 10 + i % 7;
                let conversions = clicks / 8 + i % 3;
                #[allow(clippy::cast_precision_loss)]
                let engagement_rate = 2.0 + ((i * 37) % 50) as f64 / 10.0;
                PerformancePoint {
                    date: start
                        .checked_add_days(Days::new(i))
                        .unwrap_or(end),
                    views,
                    clicks,
                    conversions,
                    engagement_rate,
                }
            })
            .collect()
    }
}

impl Default for PerformanceRange {
    fn default() -> Self {
        Self(30)
    }
}

impl fmt::Display for PerformanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PerformanceRange {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let days = value
            .trim()
            .trim_end_matches('d')
            .parse::<u32>()
            .map_err(|_| CoreError::Validation(format!("invalid range: {value}")))?;
        Self::new(days)
    }
}

/// One day of content performance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub views: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub engagement_rate: f64,
}

/// Totals shown on the analytics dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsOverview {
    pub range_days: u32,
    pub total_views: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub click_through_rate: f64,
    pub conversion_rate: f64,
}

impl AnalyticsOverview {
    /// Aggregate a performance series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_points(range: PerformanceRange, points: &[PerformancePoint]) -> Self {
        let total_views: u64 = points.iter().map(|p| p.views).sum();
        let total_clicks: u64 = points.iter().map(|p| p.clicks).sum();
        let total_conversions: u64 = points.iter().map(|p| p.conversions).sum();
        let ratio = |num: u64, den: u64| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        Self {
            range_days: range.days(),
            total_views,
            total_clicks,
            total_conversions,
            click_through_rate: ratio(total_clicks, total_views),
            conversion_rate: ratio(total_conversions, total_clicks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn thirty_day_series_is_inclusive_of_day_zero() {
        let range: PerformanceRange = "30".parse().unwrap();
        let series = range.mock_series(end());
        assert_eq!(series.len(), 31);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(series[30].date, end());
    }

    #[test]
    fn series_is_deterministic() {
        let range = PerformanceRange::new(7).unwrap();
        assert_eq!(range.mock_series(end()), range.mock_series(end()));
    }

    #[test]
    fn range_rejects_zero_and_garbage() {
        assert!(PerformanceRange::new(0).is_err());
        assert!("abc".parse::<PerformanceRange>().is_err());
        assert!("400".parse::<PerformanceRange>().is_err());
        assert_eq!("90d".parse::<PerformanceRange>().unwrap().days(), 90);
    }

    #[test]
    fn overview_totals_match_series() {
        let range = PerformanceRange::new(7).unwrap();
        let series = range.mock_series(end());
        let overview = AnalyticsOverview::from_points(range, &series);
        assert_eq!(overview.range_days, 7);
        assert_eq!(overview.total_views, series.iter().map(|p| p.views).sum::<u64>());
        assert!(overview.click_through_rate > 0.0 && overview.click_through_rate < 1.0);
    }

    #[test]
    fn overview_of_empty_series_has_zero_rates() {
        let overview = AnalyticsOverview::from_points(PerformanceRange::default(), &[]);
        assert!(overview.conversion_rate.abs() < f64::EPSILON);
        assert_eq!(overview.range_days, 30);
    }
}
