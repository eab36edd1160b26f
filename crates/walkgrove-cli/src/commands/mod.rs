pub mod config;
pub mod garden;
pub mod progress;
pub mod redeem;
pub mod stats;
pub mod streak;
pub mod tree;

use chrono::{Local, NaiveDate};
use walkgrove_core::{Config, Database, ProgressService, TreeCatalog};

/// Today in the local calendar -- day-boundary logic runs on local days.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Open the progress service over the on-disk database and config.
pub fn open_service() -> Result<ProgressService, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let catalog = TreeCatalog::with_defaults();
    Ok(ProgressService::open(db, config, catalog, today())?)
}
