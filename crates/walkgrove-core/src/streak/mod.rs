mod badges;
mod tracker;

pub use badges::{
    milestone_for, next_after, progress_to_next, unlocked, BadgeMilestone, MILESTONES,
};
pub use tracker::{StreakData, StreakTracker};
