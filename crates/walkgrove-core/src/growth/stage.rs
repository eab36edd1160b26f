//! Growth stages derived from daily step-goal progress.
//!
//! A tree advances through five stages as the day's steps approach the goal.
//! The mapping is a pure function of the progress ratio; day-scoped state
//! (locking, rollover) lives in [`super::GrowthEngine`].

use serde::{Deserialize, Serialize};

/// Upper bound of the Seed band (exclusive).
pub const SEED_MAX_PROGRESS: f64 = 0.20;
/// Upper bound of the Sprout band (exclusive).
pub const SPROUT_MAX_PROGRESS: f64 = 0.40;
/// Upper bound of the Young band (exclusive).
pub const YOUNG_MAX_PROGRESS: f64 = 0.60;
/// Upper bound of the Mature band (exclusive); everything above is Adult.
pub const MATURE_MAX_PROGRESS: f64 = 0.80;

/// Growth stage of the tree growing today.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    #[default]
    Seed,
    Sprout,
    Young,
    Mature,
    /// Ready to plant once the day's goal locks it in.
    Adult,
}

impl GrowthStage {
    /// All stages in growth order.
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seed,
        GrowthStage::Sprout,
        GrowthStage::Young,
        GrowthStage::Mature,
        GrowthStage::Adult,
    ];

    /// Map a progress ratio (0.0 to 1.0+) onto a stage.
    ///
    /// Bands are half-open: [0, 0.20) Seed, [0.20, 0.40) Sprout,
    /// [0.40, 0.60) Young, [0.60, 0.80) Mature, [0.80, ∞) Adult.
    pub fn for_progress(progress: f64) -> Self {
        if progress < SEED_MAX_PROGRESS {
            GrowthStage::Seed
        } else if progress < SPROUT_MAX_PROGRESS {
            GrowthStage::Sprout
        } else if progress < YOUNG_MAX_PROGRESS {
            GrowthStage::Young
        } else if progress < MATURE_MAX_PROGRESS {
            GrowthStage::Mature
        } else {
            GrowthStage::Adult
        }
    }

    /// Stage for a raw step count against a daily goal.
    ///
    /// A zero goal yields `Seed` defensively rather than an error.
    pub fn for_steps(steps: u32, goal: u32) -> Self {
        if goal == 0 {
            return GrowthStage::Seed;
        }
        Self::for_progress(steps as f64 / goal as f64)
    }

    /// Display name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            GrowthStage::Seed => "Seed",
            GrowthStage::Sprout => "Sprout",
            GrowthStage::Young => "Young Tree",
            GrowthStage::Mature => "Mature Tree",
            GrowthStage::Adult => "Adult Tree",
        }
    }

    /// Asset filename suffix for the stage.
    pub fn asset_suffix(&self) -> &'static str {
        match self {
            GrowthStage::Seed => "seed",
            GrowthStage::Sprout => "sprout",
            GrowthStage::Young => "young",
            GrowthStage::Mature => "mature",
            GrowthStage::Adult => "adult",
        }
    }

    /// Progress band label for display.
    pub fn progress_range(&self) -> &'static str {
        match self {
            GrowthStage::Seed => "0-19%",
            GrowthStage::Sprout => "20-39%",
            GrowthStage::Young => "40-59%",
            GrowthStage::Mature => "60-79%",
            GrowthStage::Adult => "80-100%",
        }
    }

    /// Whether a tree at this stage can be planted into the garden.
    pub fn is_ready_to_plant(&self) -> bool {
        *self == GrowthStage::Adult
    }
}
