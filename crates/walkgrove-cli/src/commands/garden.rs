use clap::Subcommand;
use serde_json::json;
use walkgrove_core::{PlantTarget, Point};

use super::{open_service, today};

#[derive(Subcommand)]
pub enum GardenAction {
    /// Show the active garden grid
    Show,
    /// Plant the ready tree into the garden
    Plant {
        /// Explicit slot row
        #[arg(long, requires = "col")]
        row: Option<usize>,
        /// Explicit slot column
        #[arg(long, requires = "row")]
        col: Option<usize>,
        /// Drop-point x on the canvas (nearest free slot wins)
        #[arg(long, requires = "y")]
        x: Option<f64>,
        /// Drop-point y on the canvas
        #[arg(long, requires = "x")]
        y: Option<f64>,
    },
    /// List all gardens, newest first
    List,
    /// Archive the completed garden and start a fresh one
    Archive,
}

pub fn run(action: GardenAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = open_service()?;

    match action {
        GardenAction::Show => {
            let grid = service.grid();
            let shown = json!({
                "garden": service.garden(),
                "occupied": grid.occupied_count(),
                "is_full": grid.is_full(),
                "slots": grid.slots(),
            });
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        GardenAction::Plant { row, col, x, y } => {
            let target = match (row, col, x, y) {
                (Some(row), Some(col), _, _) => PlantTarget::Slot { row, col },
                (_, _, Some(x), Some(y)) => PlantTarget::Near(Point::new(x, y)),
                _ => PlantTarget::Auto,
            };
            let events = service.plant_tree(target, today())?;
            if events.is_empty() {
                eprintln!("nothing planted: tree not ready, garden full, or slot taken");
                std::process::exit(1);
            }
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
        GardenAction::List => {
            let gardens = service.db().gardens()?;
            println!("{}", serde_json::to_string_pretty(&gardens)?);
        }
        GardenAction::Archive => match service.archive_completed_garden()? {
            Some(fresh) => println!("{}", serde_json::to_string_pretty(&fresh)?),
            None => {
                eprintln!("no completed garden to archive");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
