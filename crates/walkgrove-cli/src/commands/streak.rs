use clap::Subcommand;
use serde_json::json;

use super::{open_service, today};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current and longest streak
    Show,
    /// Unlocked badges and progress to the next one
    Badges,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;
    let streak = service.streak();

    match action {
        StreakAction::Show => {
            let now = today();
            let shown = json!({
                "current_streak": streak.current(),
                "longest_streak": streak.longest(),
                "last_completed": streak.data().last_completed,
                "started": streak.data().started,
                "active_today": streak.is_active_today(now),
                "at_risk": streak.is_at_risk(now),
            });
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        StreakAction::Badges => {
            let shown = json!({
                "unlocked": streak.unlocked_badges(),
                "next": streak.next_badge(),
                "progress_to_next": streak.progress_to_next_badge(),
            });
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }
    Ok(())
}
