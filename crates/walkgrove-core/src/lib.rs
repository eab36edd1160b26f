//! # Walkgrove Core Library
//!
//! This library provides the core business logic for Walkgrove, a
//! step-to-garden habit tracker. It implements a CLI-first philosophy where
//! all operations are available via a standalone CLI binary, with any GUI
//! shell being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Growth Engine**: A calendar-day-scoped state machine that maps step
//!   readings onto tree growth stages; the caller feeds readings and
//!   invokes `check_day_rollover()` on resume and day changes
//! - **Streak Tracker**: Consecutive-day goal completion with badge
//!   milestone unlocking and inactivity decay
//! - **Garden**: Fixed 5x6 isometric placement grid with a drag-and-confirm
//!   planting flow and a garden lifecycle (active, complete, archived,
//!   redeemed)
//! - **Storage**: SQLite-backed activity history, gardens, and opaque state
//!   snapshots, plus TOML-based configuration
//! - **Activity**: Narrow trait seams for health-store and pedometer data
//! - **Redemption**: Async provider seam for trading completed gardens for
//!   real-world tree planting (mock implementation included)
//!
//! ## Key Components
//!
//! - [`GrowthEngine`]: Growing-tree state machine
//! - [`StreakTracker`]: Streak state machine
//! - [`GardenGrid`]: Placement grid
//! - [`ProgressService`]: Process-scoped orchestration over storage
//! - [`Database`] / [`Config`]: Persistence

pub mod activity;
pub mod error;
pub mod events;
pub mod garden;
pub mod growth;
pub mod redemption;
pub mod service;
pub mod storage;
pub mod streak;

pub use activity::{ActivitySource, DailyMetrics, PedometerSource, StoredActivitySource};
pub use error::{
    ActivityError, ConfigError, CoreError, RedemptionError, StoreError, ValidationError,
};
pub use events::Event;
pub use garden::{GardenGrid, GardenStatus, PlacementSlot, PlantingFlow, Point, CAPACITY};
pub use growth::{GrowthEngine, GrowthStage, PlantedTree, TreeCatalog, TreeRarity, TreeType};
pub use redemption::{
    MockRedemptionProvider, OrderReference, OrderStatus, PlantingStatus, RedemptionProvider,
};
pub use service::{PlantTarget, ProgressService, StatusSnapshot};
pub use storage::{Config, Database, GardenRecord, PlantedTreeRecord, Stats, Theme};
pub use streak::{BadgeMilestone, StreakData, StreakTracker};
