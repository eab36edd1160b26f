//! Consecutive-day streak tracking.
//!
//! A streak counts calendar days on which the step goal was met, with no
//! gap larger than one day. The tracker never reads the clock itself --
//! completion dates and "today" arrive as explicit arguments, so the host
//! drives day-change checks (the midnight bug fix lives with the caller).

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::badges::{self, BadgeMilestone};
use crate::events::Event;

/// Persisted streak state.
///
/// Invariant: `longest_streak >= current_streak`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Last calendar day the goal was met.
    pub last_completed: Option<NaiveDate>,
    /// First day of the current streak run.
    pub started: Option<NaiveDate>,
}

/// Streak state machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakTracker {
    data: StreakData,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted data. The caller should follow up with
    /// `check_and_recover()` so a stale streak decays on load.
    pub fn from_data(data: StreakData) -> Self {
        Self { data }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn data(&self) -> &StreakData {
        &self.data
    }

    pub fn current(&self) -> u32 {
        self.data.current_streak
    }

    pub fn longest(&self) -> u32 {
        self.data.longest_streak
    }

    /// Goal already met today.
    pub fn is_active_today(&self, today: NaiveDate) -> bool {
        self.data.last_completed == Some(today)
    }

    /// Last completion was yesterday: today is the day the streak survives
    /// or breaks.
    pub fn is_at_risk(&self, today: NaiveDate) -> bool {
        self.data
            .last_completed
            .map(|last| today - last == chrono::Duration::days(1))
            .unwrap_or(false)
    }

    /// Badges unlocked by the longest streak, ascending.
    pub fn unlocked_badges(&self) -> Vec<&'static BadgeMilestone> {
        badges::unlocked(self.data.longest_streak)
    }

    /// Next badge beyond the current streak.
    pub fn next_badge(&self) -> Option<&'static BadgeMilestone> {
        badges::next_after(self.data.current_streak)
    }

    /// Progress toward the next badge, in [0, 1].
    pub fn progress_to_next_badge(&self) -> f64 {
        badges::progress_to_next(self.data.current_streak)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record a goal completion for `date`.
    ///
    /// No-op unless `goal_met`, and idempotent for repeated calls on the
    /// same calendar day. A one-day gap extends the streak; anything larger
    /// (or no prior completion) restarts it at 1. `longest_streak` is the
    /// running maximum. Emits a streak-updated event, plus a badge event
    /// when the new streak lands exactly on a milestone.
    pub fn update(&mut self, date: NaiveDate, goal_met: bool) -> Vec<Event> {
        if !goal_met {
            return Vec::new();
        }

        let mut current = self.data.current_streak;
        let mut started = self.data.started;

        match self.data.last_completed {
            Some(last) => {
                let days_diff = (date - last).num_days();
                if days_diff == 1 {
                    current += 1;
                } else if days_diff > 1 {
                    current = 1;
                    started = Some(date);
                } else {
                    // Same day (idempotent) or a backdated reading.
                    return Vec::new();
                }
            }
            None => {
                current = 1;
                started = Some(date);
            }
        }

        let longest = self.data.longest_streak.max(current);
        self.data = StreakData {
            current_streak: current,
            longest_streak: longest,
            last_completed: Some(date),
            started,
        };

        let mut events = vec![Event::StreakUpdated {
            current,
            longest,
            at: Utc::now(),
        }];
        if let Some(milestone) = badges::milestone_for(current) {
            events.push(Event::BadgeUnlocked {
                days: milestone.days,
                name: milestone.name.to_string(),
                at: Utc::now(),
            });
        }
        events
    }

    /// Decay check: more than one day since the last completion breaks the
    /// streak. Zeroes `current_streak` and clears the dates; `longest_streak`
    /// is untouched. Invoked on load and on every day-change signal.
    pub fn check_and_recover(&mut self, today: NaiveDate) -> Option<Event> {
        let last = self.data.last_completed?;
        if (today - last).num_days() <= 1 {
            return None;
        }
        let previous = self.data.current_streak;
        self.data = StreakData {
            current_streak: 0,
            longest_streak: self.data.longest_streak,
            last_completed: None,
            started: None,
        };
        Some(Event::StreakBroken {
            previous,
            longest: self.data.longest_streak,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn first_completion_starts_at_one() {
        let mut tracker = StreakTracker::new();
        tracker.update(day("2025-06-01"), true);
        assert_eq!(tracker.current(), 1);
        assert_eq!(tracker.longest(), 1);
        assert_eq!(tracker.data().started, Some(day("2025-06-01")));
    }

    #[test]
    fn goal_not_met_is_a_noop() {
        let mut tracker = StreakTracker::new();
        assert!(tracker.update(day("2025-06-01"), false).is_empty());
        assert_eq!(tracker.current(), 0);
    }

    #[test]
    fn same_day_is_idempotent() {
        let mut tracker = StreakTracker::new();
        tracker.update(day("2025-06-01"), true);
        let events = tracker.update(day("2025-06-01"), true);
        assert!(events.is_empty());
        assert_eq!(tracker.current(), 1);
    }

    #[test]
    fn next_day_extends_larger_gap_resets() {
        let mut tracker = StreakTracker::new();
        tracker.update(day("2025-06-01"), true);
        tracker.update(day("2025-06-02"), true);
        assert_eq!(tracker.current(), 2);

        tracker.update(day("2025-06-05"), true);
        assert_eq!(tracker.current(), 1);
        assert_eq!(tracker.longest(), 2);
        assert_eq!(tracker.data().started, Some(day("2025-06-05")));
    }

    #[test]
    fn decay_zeroes_current_but_keeps_longest() {
        let mut tracker = StreakTracker::new();
        for d in ["2025-06-01", "2025-06-02", "2025-06-03"] {
            tracker.update(day(d), true);
        }
        assert_eq!(tracker.current(), 3);

        // Next day: still alive.
        assert!(tracker.check_and_recover(day("2025-06-04")).is_none());
        assert_eq!(tracker.current(), 3);

        // Two days later: broken.
        let event = tracker.check_and_recover(day("2025-06-05"));
        assert!(matches!(event, Some(Event::StreakBroken { previous: 3, .. })));
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.longest(), 3);
        assert!(tracker.data().last_completed.is_none());
    }

    #[test]
    fn badge_event_on_exact_milestone() {
        let mut tracker = StreakTracker::new();
        let mut unlocked = Vec::new();
        for offset in 0..7 {
            let date = day("2025-06-01") + chrono::Duration::days(offset);
            for event in tracker.update(date, true) {
                if let Event::BadgeUnlocked { days, .. } = event {
                    unlocked.push(days);
                }
            }
        }
        assert_eq!(unlocked, vec![3, 5, 7]);
    }

    #[test]
    fn at_risk_and_active_queries() {
        let mut tracker = StreakTracker::new();
        tracker.update(day("2025-06-01"), true);
        assert!(tracker.is_active_today(day("2025-06-01")));
        assert!(tracker.is_at_risk(day("2025-06-02")));
        assert!(!tracker.is_at_risk(day("2025-06-03")));
    }

    #[test]
    fn longest_never_below_current() {
        let mut tracker = StreakTracker::new();
        for offset in 0..10 {
            let date = day("2025-06-01") + chrono::Duration::days(offset);
            tracker.update(date, true);
            assert!(tracker.longest() >= tracker.current());
        }
    }
}
