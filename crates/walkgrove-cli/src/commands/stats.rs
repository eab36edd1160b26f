use chrono::Duration;
use clap::Subcommand;
use serde_json::json;
use walkgrove_core::{ActivitySource, StoredActivitySource};

use super::{open_service, today};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's activity against the goal
    Today,
    /// All-time stats
    All,
    /// Daily history
    History {
        /// How many days back to include
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = open_service()?;
    let goal = service.goal();
    let now = today();

    match action {
        StatsAction::Today => {
            let metrics = service.db().activity_on(now)?.unwrap_or_default();
            let shown = json!({
                "date": now,
                "steps": metrics.steps,
                "distance_m": metrics.distance_m,
                "calories": metrics.calories,
                "goal": goal,
                "goal_progress": metrics.steps as f64 / goal as f64,
            });
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        StatsAction::All => {
            let stats = service.db().stats_all(goal)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::History { days } => {
            let source = StoredActivitySource::new(service.db(), now);
            let from = now - Duration::days(days.saturating_sub(1) as i64);
            let by_day = source.steps_in_range(from, now)?;

            let mut rows = Vec::new();
            for offset in 0..days as i64 {
                let date = from + Duration::days(offset);
                let steps = by_day.get(&date).copied().unwrap_or(0);
                rows.push(json!({
                    "date": date,
                    "steps": steps,
                    "goal_progress": steps as f64 / goal as f64,
                }));
            }
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}
