mod catalog;
mod engine;
mod stage;

pub use catalog::{TreeCatalog, TreeRarity, TreeType};
pub use engine::{GrowthEngine, PlantedTree};
pub use stage::{
    GrowthStage, MATURE_MAX_PROGRESS, SEED_MAX_PROGRESS, SPROUT_MAX_PROGRESS, YOUNG_MAX_PROGRESS,
};
