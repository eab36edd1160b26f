//! Growth engine implementation.
//!
//! The growth engine is a calendar-day-scoped state machine. It has no
//! internal clock -- the caller feeds it step readings and invokes
//! `check_day_rollover()` on resume and on day-change signals.
//!
//! ## State Transitions
//!
//! ```text
//! Seed -> Sprout -> Young -> Mature -> Adult -> Adult(locked)
//! ```
//!
//! Locking happens the first time progress reaches 100% and is one-way for
//! the rest of the day; only a day rollover (or a plant) produces a fresh
//! unlocked Seed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stage::GrowthStage;
use crate::events::Event;

/// Record handed back when a ready tree is planted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantedTree {
    pub id: Uuid,
    pub tree_type_id: String,
    pub planted_at: DateTime<Utc>,
}

/// Core growth engine.
///
/// Serializes directly as the persisted snapshot; restore with
/// `serde_json::from_str` and then apply `check_day_rollover()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthEngine {
    tree_type_id: String,
    /// Calendar day this growth cycle belongs to.
    start_date: NaiveDate,
    stage: GrowthStage,
    /// Ratio of steps to goal; >= 0, unbounded above.
    progress: f64,
    /// One-way for the day: set when progress first reaches 1.0.
    locked: bool,
}

impl GrowthEngine {
    /// Fresh Seed tree of the given type, scoped to `today`.
    pub fn new(tree_type_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            tree_type_id: tree_type_id.into(),
            start_date: today,
            stage: GrowthStage::Seed,
            progress: 0.0,
            locked: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tree_type_id(&self) -> &str {
        &self.tree_type_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn stage(&self) -> GrowthStage {
        self.stage
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Adult and locked: the only state `plant()` accepts.
    pub fn is_ready_to_plant(&self) -> bool {
        self.stage == GrowthStage::Adult && self.locked
    }

    /// Tree type can change only before the goal is reached.
    pub fn can_change_type(&self) -> bool {
        !self.locked && self.progress < 1.0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a step reading for the current day.
    ///
    /// Recomputes stage and progress; the first time progress reaches 1.0
    /// the tree locks for the remainder of the day.
    pub fn update_progress(&mut self, steps: u32, goal: u32) -> Vec<Event> {
        let progress = if goal == 0 {
            0.0
        } else {
            steps as f64 / goal as f64
        };
        let new_stage = GrowthStage::for_steps(steps, goal);
        let old_stage = self.stage;

        self.progress = progress;
        self.stage = new_stage;

        let mut events = vec![Event::ProgressUpdated {
            steps,
            goal,
            progress,
            stage: new_stage,
            at: Utc::now(),
        }];
        if new_stage != old_stage {
            events.push(Event::StageChanged {
                from: old_stage,
                to: new_stage,
                at: Utc::now(),
            });
        }
        if !self.locked && progress >= 1.0 {
            self.locked = true;
            events.push(Event::TreeLocked {
                tree_type_id: self.tree_type_id.clone(),
                at: Utc::now(),
            });
        }
        events
    }

    /// Change the tree type. Returns `false` (no-op) once the tree is locked
    /// or the goal has been reached -- the caller surfaces "tree locked".
    pub fn select_tree_type(&mut self, tree_type_id: impl Into<String>) -> bool {
        if !self.can_change_type() {
            return false;
        }
        self.tree_type_id = tree_type_id.into();
        true
    }

    /// Explicitly lock the tree. Idempotent.
    pub fn lock(&mut self) -> Option<Event> {
        if self.locked {
            return None;
        }
        self.locked = true;
        Some(Event::TreeLocked {
            tree_type_id: self.tree_type_id.clone(),
            at: Utc::now(),
        })
    }

    /// Plant the tree when it is Adult and locked.
    ///
    /// Returns the planted record and resets the engine to a fresh Seed of
    /// the same type with `start_date = today` (the next growth cycle).
    /// Returns `None` when the tree is not ready.
    pub fn plant(&mut self, today: NaiveDate) -> Option<PlantedTree> {
        if !self.is_ready_to_plant() {
            return None;
        }
        let planted = PlantedTree {
            id: Uuid::new_v4(),
            tree_type_id: self.tree_type_id.clone(),
            planted_at: Utc::now(),
        };
        self.reset(today);
        Some(planted)
    }

    /// Discard the growth cycle if it belongs to a previous calendar day.
    ///
    /// Steps never carry over; an out-of-date snapshot becomes a fresh Seed
    /// of the same type.
    pub fn check_day_rollover(&mut self, today: NaiveDate) -> Option<Event> {
        if self.start_date == today {
            return None;
        }
        self.reset(today);
        Some(Event::TreeReset {
            date: today,
            at: Utc::now(),
        })
    }

    fn reset(&mut self, today: NaiveDate) {
        self.start_date = today;
        self.stage = GrowthStage::Seed;
        self.progress = 0.0;
        self.locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn full_day_scenario() {
        // goal=10000; readings [0, 2500, 6500, 10500] walk the stages up
        // and lock exactly at the final reading.
        let mut engine = GrowthEngine::new("oak", day("2025-06-01"));
        let goal = 10_000;

        engine.update_progress(0, goal);
        assert_eq!(engine.stage(), GrowthStage::Seed);
        engine.update_progress(2_500, goal);
        assert_eq!(engine.stage(), GrowthStage::Sprout);
        engine.update_progress(6_500, goal);
        assert_eq!(engine.stage(), GrowthStage::Mature);
        assert!(!engine.is_locked());

        let events = engine.update_progress(10_500, goal);
        assert_eq!(engine.stage(), GrowthStage::Adult);
        assert!(engine.is_locked());
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TreeLocked { .. })));

        let planted = engine.plant(day("2025-06-01")).expect("tree was ready");
        assert_eq!(planted.tree_type_id, "oak");
        assert_eq!(engine.stage(), GrowthStage::Seed);
        assert_eq!(engine.progress(), 0.0);
        assert!(!engine.is_locked());
    }

    #[test]
    fn lock_is_one_way_within_a_day() {
        let mut engine = GrowthEngine::new("oak", day("2025-06-01"));
        engine.update_progress(10_000, 10_000);
        assert!(engine.is_locked());

        // Type changes fail until a rollover produces a new tree.
        assert!(!engine.select_tree_type("pine"));
        assert_eq!(engine.tree_type_id(), "oak");

        // A later reading does not re-emit the lock event.
        let events = engine.update_progress(12_000, 10_000);
        assert!(!events.iter().any(|e| matches!(e, Event::TreeLocked { .. })));

        engine.check_day_rollover(day("2025-06-02"));
        assert!(!engine.is_locked());
        assert!(engine.select_tree_type("pine"));
    }

    #[test]
    fn select_type_before_goal() {
        let mut engine = GrowthEngine::new("oak", day("2025-06-01"));
        engine.update_progress(4_000, 10_000);
        assert!(engine.select_tree_type("willow"));
        assert_eq!(engine.tree_type_id(), "willow");
    }

    #[test]
    fn plant_requires_ready_state() {
        let mut engine = GrowthEngine::new("oak", day("2025-06-01"));
        engine.update_progress(9_000, 10_000);
        assert_eq!(engine.stage(), GrowthStage::Adult);
        // Adult but not locked: 90% never reached the goal.
        assert!(engine.plant(day("2025-06-01")).is_none());

        // Explicit lock makes it plantable.
        engine.lock();
        assert!(engine.plant(day("2025-06-01")).is_some());
    }

    #[test]
    fn rollover_discards_previous_day() {
        let mut engine = GrowthEngine::new("oak", day("2025-06-01"));
        engine.update_progress(10_000, 10_000);

        let event = engine.check_day_rollover(day("2025-06-03"));
        assert!(matches!(event, Some(Event::TreeReset { .. })));
        assert_eq!(engine.stage(), GrowthStage::Seed);
        assert_eq!(engine.progress(), 0.0);
        assert_eq!(engine.start_date(), day("2025-06-03"));

        // Same-day check is a no-op.
        assert!(engine.check_day_rollover(day("2025-06-03")).is_none());
    }

    #[test]
    fn snapshot_round_trip() {
        let mut engine = GrowthEngine::new("maple", day("2025-06-01"));
        engine.update_progress(5_000, 10_000);

        let json = serde_json::to_string(&engine).unwrap();
        let restored: GrowthEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.tree_type_id(), "maple");
        assert_eq!(restored.stage(), GrowthStage::Young);
        assert_eq!(restored.progress(), 0.5);
    }
}
