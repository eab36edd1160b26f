//! Activity data source seams.
//!
//! The health store and the live pedometer are collaborators behind narrow
//! traits; platform fetches are awaited by the caller before readings reach
//! the core, so the seams here are synchronous. When a source fails, the
//! update cycle is simply skipped -- core state is never left invalid.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ActivityError;

/// One day's activity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub steps: u32,
    pub distance_m: f64,
    pub calories: f64,
}

impl DailyMetrics {
    /// Reconcile two sources by taking the per-metric maximum.
    ///
    /// The health store and the pedometer disagree while the store catches
    /// up with live counts; the larger reading per metric is kept.
    pub fn reconcile(a: DailyMetrics, b: DailyMetrics) -> DailyMetrics {
        DailyMetrics {
            steps: a.steps.max(b.steps),
            distance_m: a.distance_m.max(b.distance_m),
            calories: a.calories.max(b.calories),
        }
    }
}

/// Aggregated activity history source (the health store).
pub trait ActivitySource {
    /// Steps recorded so far today.
    fn today_steps(&self) -> Result<u32, ActivityError>;

    /// Walking distance in meters so far today.
    fn today_distance_m(&self) -> Result<f64, ActivityError>;

    /// Active calories burned so far today.
    fn today_calories(&self) -> Result<f64, ActivityError>;

    /// Daily step totals for an inclusive date range.
    fn steps_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, u32>, ActivityError>;

    /// Per-hour step counts (hour 0-23) for one day.
    fn hourly_steps(&self, date: NaiveDate) -> Result<BTreeMap<u32, u32>, ActivityError>;
}

/// A live step-counting reading since some start instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PedometerReading {
    pub steps: u32,
    pub distance_m: f64,
}

/// Live pedometer source.
pub trait PedometerSource {
    /// Steps and distance accumulated since `start`.
    fn steps_since(&self, start: DateTime<Utc>) -> Result<PedometerReading, ActivityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_takes_per_metric_max() {
        let health = DailyMetrics {
            steps: 8_000,
            distance_m: 5_200.0,
            calories: 240.0,
        };
        let pedometer = DailyMetrics {
            steps: 8_350,
            distance_m: 5_100.0,
            calories: 0.0,
        };
        let merged = DailyMetrics::reconcile(health, pedometer);
        assert_eq!(merged.steps, 8_350);
        assert_eq!(merged.distance_m, 5_200.0);
        assert_eq!(merged.calories, 240.0);
    }
}
