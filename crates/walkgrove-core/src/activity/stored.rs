//! Activity source backed by the local database.
//!
//! Serves hosts without a platform health store: readings recorded via the
//! CLI (or a sync job) are read back through the same [`ActivitySource`]
//! seam the health store would fill.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::source::ActivitySource;
use crate::error::ActivityError;
use crate::storage::Database;

/// [`ActivitySource`] over recorded daily readings.
pub struct StoredActivitySource<'a> {
    db: &'a Database,
    today: NaiveDate,
}

impl<'a> StoredActivitySource<'a> {
    pub fn new(db: &'a Database, today: NaiveDate) -> Self {
        Self { db, today }
    }

    fn query_failed(err: rusqlite::Error) -> ActivityError {
        ActivityError::QueryFailed(err.to_string())
    }
}

impl ActivitySource for StoredActivitySource<'_> {
    fn today_steps(&self) -> Result<u32, ActivityError> {
        Ok(self
            .db
            .activity_on(self.today)
            .map_err(Self::query_failed)?
            .map(|m| m.steps)
            .unwrap_or(0))
    }

    fn today_distance_m(&self) -> Result<f64, ActivityError> {
        Ok(self
            .db
            .activity_on(self.today)
            .map_err(Self::query_failed)?
            .map(|m| m.distance_m)
            .unwrap_or(0.0))
    }

    fn today_calories(&self) -> Result<f64, ActivityError> {
        Ok(self
            .db
            .activity_on(self.today)
            .map_err(Self::query_failed)?
            .map(|m| m.calories)
            .unwrap_or(0.0))
    }

    fn steps_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, u32>, ActivityError> {
        self.db.steps_in_range(from, to).map_err(Self::query_failed)
    }

    fn hourly_steps(&self, _date: NaiveDate) -> Result<BTreeMap<u32, u32>, ActivityError> {
        // Daily granularity only; hour-level data needs a live health store.
        Err(ActivityError::Unavailable {
            src: "stored activity".into(),
        })
    }
}
