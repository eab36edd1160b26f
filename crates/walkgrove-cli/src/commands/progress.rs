use chrono::NaiveDate;
use clap::Subcommand;
use walkgrove_core::DailyMetrics;

use super::{open_service, today};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Record a step reading for the day
    Record {
        /// Step count so far today
        steps: u32,
        /// Walking distance in meters
        #[arg(long)]
        distance_m: Option<f64>,
        /// Active calories burned
        #[arg(long)]
        calories: Option<f64>,
        /// Calendar day of the reading (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show today's status
    Status,
    /// Run the day-rollover and streak-decay check
    Tick,
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service()?;

    match action {
        ProgressAction::Record {
            steps,
            distance_m,
            calories,
            date,
        } => {
            let date = date.unwrap_or_else(today);
            let metrics = DailyMetrics {
                steps,
                distance_m: distance_m.unwrap_or(0.0),
                calories: calories.unwrap_or(0.0),
            };
            let events = service.record_activity(&metrics, date)?;
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
        ProgressAction::Status => {
            let snapshot = service.status_snapshot(today())?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        ProgressAction::Tick => {
            let events = service.check_day_rollover(today())?;
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }
    Ok(())
}
