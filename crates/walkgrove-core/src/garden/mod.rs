mod grid;
mod planting;
mod status;

pub use grid::{
    GardenGrid, PlacementSlot, Point, CANVAS_SIZE, CAPACITY, GRASS_CENTER_X, GRASS_START_Y,
    GRID_COLS, GRID_ROWS, TILE_HEIGHT, TILE_WIDTH,
};
pub use planting::PlantingFlow;
pub use status::GardenStatus;
