use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::growth::GrowthStage;

/// Every state change in the system produces an Event.
/// A GUI polls for events; the CLI prints them as they happen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A step reading was applied to the growing tree.
    ProgressUpdated {
        steps: u32,
        goal: u32,
        progress: f64,
        stage: GrowthStage,
        at: DateTime<Utc>,
    },
    /// The growing tree moved to a different stage.
    StageChanged {
        from: GrowthStage,
        to: GrowthStage,
        at: DateTime<Utc>,
    },
    /// The daily goal was reached; tree type and stage are frozen for the day.
    TreeLocked {
        tree_type_id: String,
        at: DateTime<Utc>,
    },
    /// The user picked a different tree type for the growing tree.
    TreeTypeSelected {
        tree_type_id: String,
        at: DateTime<Utc>,
    },
    /// A calendar-day rollover discarded the old growing tree.
    TreeReset {
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    /// A ready tree was committed to a garden slot.
    TreePlanted {
        tree_id: Uuid,
        tree_type_id: String,
        row: usize,
        col: usize,
        at: DateTime<Utc>,
    },
    /// The streak advanced (or restarted at 1).
    StreakUpdated {
        current: u32,
        longest: u32,
        at: DateTime<Utc>,
    },
    /// Inactivity decay zeroed the current streak.
    StreakBroken {
        previous: u32,
        longest: u32,
        at: DateTime<Utc>,
    },
    /// The current streak landed exactly on a badge milestone.
    BadgeUnlocked {
        days: u32,
        name: String,
        at: DateTime<Utc>,
    },
    /// The active garden reached full capacity.
    GardenCompleted {
        garden_id: Uuid,
        tree_count: u32,
        at: DateTime<Utc>,
    },
}
