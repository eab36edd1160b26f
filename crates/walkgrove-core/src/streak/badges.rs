//! Badge milestone table for streak achievements.
//!
//! Fixed, ordered list of 25 milestones; a milestone is unlocked once the
//! longest streak reaches its day count.

use serde::Serialize;

/// A streak badge milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeMilestone {
    /// Streak length (consecutive days) that unlocks the badge.
    pub days: u32,
    pub name: &'static str,
    pub description: &'static str,
}

const fn badge(days: u32, name: &'static str, description: &'static str) -> BadgeMilestone {
    BadgeMilestone {
        days,
        name,
        description,
    }
}

/// All badge milestones, day counts strictly increasing.
pub const MILESTONES: [BadgeMilestone; 25] = [
    badge(3, "Warm Start", "Started your walking journey"),
    badge(5, "Rhythm Found", "Found your daily rhythm"),
    badge(7, "First Week", "Completed your first week"),
    badge(14, "Two-Week Flow", "Two weeks of consistency"),
    badge(21, "Habit Seeded", "A habit is forming"),
    badge(30, "Monthly Maker", "A full month of steps"),
    badge(40, "Momentum", "Building unstoppable momentum"),
    badge(50, "Half-Century", "50 days of dedication"),
    badge(60, "Steady Walker", "Two months strong"),
    badge(75, "Three-Quarter Mark", "Three-quarters to 100"),
    badge(90, "Season Strong", "A full season of walking"),
    badge(100, "Centurion", "100 days of commitment"),
    badge(110, "Overdrive", "Going beyond 100"),
    badge(125, "One-Two-Five", "125 days achieved"),
    badge(150, "Trailblazer", "Blazing the trail"),
    badge(180, "Six-Month Streak", "Half a year of steps"),
    badge(200, "Double Century", "200 days strong"),
    badge(222, "Triple Two", "The lucky 222"),
    badge(250, "Quarter Thousand", "250 days achieved"),
    badge(300, "Three Hundred Club", "Elite walker status"),
    badge(333, "Triple Three", "The magic 333"),
    badge(365, "Year Runner-Up", "A full year of walking"),
    badge(400, "Four Hundred Force", "Unstoppable force"),
    badge(444, "Triple Four", "The powerful 444"),
    badge(500, "Legendary 500", "Legendary status achieved"),
];

/// Milestone whose day count exactly matches `streak`, if any.
pub fn milestone_for(streak: u32) -> Option<&'static BadgeMilestone> {
    MILESTONES.iter().find(|m| m.days == streak)
}

/// All milestones unlocked at `streak`, ordered by day count ascending.
pub fn unlocked(streak: u32) -> Vec<&'static BadgeMilestone> {
    MILESTONES.iter().filter(|m| m.days <= streak).collect()
}

/// First milestone strictly beyond `streak`, or `None` past the last one.
pub fn next_after(streak: u32) -> Option<&'static BadgeMilestone> {
    MILESTONES.iter().find(|m| m.days > streak)
}

/// Progress from the previous milestone toward the next, in [0, 1].
///
/// Returns 1.0 once every milestone is achieved.
pub fn progress_to_next(streak: u32) -> f64 {
    let Some(next) = next_after(streak) else {
        return 1.0;
    };
    let previous = MILESTONES
        .iter()
        .rev()
        .find(|m| m.days <= streak)
        .map(|m| m.days)
        .unwrap_or(0);
    let range = (next.days - previous) as f64;
    (((streak - previous) as f64) / range).clamp(0.0, 1.0)
}
