//! SQLite-based garden and activity storage.
//!
//! Provides persistent storage for:
//! - Daily activity readings (steps, distance, calories)
//! - Gardens and their planted trees
//! - Key-value store for opaque state snapshots (growing tree, streak)

use chrono::{DateTime, NaiveDate, Utc};
use indoc::indoc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::data_dir;
use crate::activity::DailyMetrics;
use crate::garden::GardenStatus;

/// A garden row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenRecord {
    pub id: Uuid,
    pub status: GardenStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Redemption order id, once the garden has been traded in.
    pub order_id: Option<String>,
}

/// A planted tree row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantedTreeRecord {
    pub id: Uuid,
    pub garden_id: Uuid,
    pub tree_type_id: String,
    pub row: usize,
    pub col: usize,
    pub planted_at: DateTime<Utc>,
}

/// All-time statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_steps: u64,
    pub days_tracked: u64,
    pub days_goal_met: u64,
    pub trees_planted: u64,
    pub gardens_completed: u64,
}

/// Parse datetime from RFC3339 string with fallback to current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an ISO calendar date with fallback to today.
fn parse_date_fallback(date_str: &str) -> NaiveDate {
    date_str
        .parse()
        .unwrap_or_else(|_| Utc::now().date_naive())
}

fn parse_uuid_fallback(id_str: &str) -> Uuid {
    Uuid::parse_str(id_str).unwrap_or_else(|_| Uuid::nil())
}

fn row_to_garden(row: &rusqlite::Row) -> Result<GardenRecord, rusqlite::Error> {
    let status_str: String = row.get(1)?;
    Ok(GardenRecord {
        id: parse_uuid_fallback(&row.get::<_, String>(0)?),
        status: status_str.parse().unwrap_or(GardenStatus::Active),
        created_at: parse_datetime_fallback(&row.get::<_, String>(2)?),
        completed_at: row
            .get::<_, Option<String>>(3)?
            .map(|s| parse_datetime_fallback(&s)),
        order_id: row.get(4)?,
    })
}

/// SQLite database for walkgrove state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/walkgrove/walkgrove.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("walkgrove.db");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(indoc! {"
            CREATE TABLE IF NOT EXISTS daily_activity (
                date       TEXT PRIMARY KEY,
                steps      INTEGER NOT NULL,
                distance_m REAL NOT NULL DEFAULT 0,
                calories   REAL NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS gardens (
                id           TEXT PRIMARY KEY,
                status       TEXT NOT NULL,
                created_at   TEXT NOT NULL,
                completed_at TEXT,
                order_id     TEXT
            );

            CREATE TABLE IF NOT EXISTS planted_trees (
                id           TEXT PRIMARY KEY,
                garden_id    TEXT NOT NULL,
                tree_type_id TEXT NOT NULL,
                row          INTEGER NOT NULL,
                col          INTEGER NOT NULL,
                planted_at   TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_planted_trees_garden ON planted_trees(garden_id);
            CREATE INDEX IF NOT EXISTS idx_gardens_status ON gardens(status);
        "})?;
        Ok(())
    }

    // ── Activity ─────────────────────────────────────────────────────

    /// Record (or replace) one day's activity totals.
    pub fn record_activity(
        &self,
        date: NaiveDate,
        metrics: &DailyMetrics,
    ) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO daily_activity (date, steps, distance_m, calories)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                date.to_string(),
                metrics.steps,
                metrics.distance_m,
                metrics.calories
            ],
        )?;
        Ok(())
    }

    /// Activity totals for one day, if recorded.
    pub fn activity_on(&self, date: NaiveDate) -> Result<Option<DailyMetrics>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT steps, distance_m, calories FROM daily_activity WHERE date = ?1")?;
        let result = stmt.query_row(params![date.to_string()], |row| {
            Ok(DailyMetrics {
                steps: row.get(0)?,
                distance_m: row.get(1)?,
                calories: row.get(2)?,
            })
        });
        match result {
            Ok(m) => Ok(Some(m)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Daily step totals for an inclusive date range. Days with no reading
    /// are simply absent from the map.
    pub fn steps_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, u32>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT date, steps FROM daily_activity WHERE date >= ?1 AND date <= ?2 ORDER BY date",
        )?;
        let mut rows = stmt.query(params![from.to_string(), to.to_string()])?;
        let mut result = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let date = parse_date_fallback(&row.get::<_, String>(0)?);
            result.insert(date, row.get(1)?);
        }
        Ok(result)
    }

    // ── Gardens ──────────────────────────────────────────────────────

    /// The single active garden, created on first use.
    pub fn active_garden(&self) -> Result<GardenRecord, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, status, created_at, completed_at, order_id
             FROM gardens WHERE status = 'active'
             ORDER BY created_at LIMIT 1",
        )?;
        let result = stmt.query_row([], row_to_garden);
        match result {
            Ok(garden) => Ok(garden),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                let garden = GardenRecord {
                    id: Uuid::new_v4(),
                    status: GardenStatus::Active,
                    created_at: Utc::now(),
                    completed_at: None,
                    order_id: None,
                };
                self.insert_garden(&garden)?;
                Ok(garden)
            }
            Err(e) => Err(e),
        }
    }

    pub fn insert_garden(&self, garden: &GardenRecord) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO gardens (id, status, created_at, completed_at, order_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                garden.id.to_string(),
                garden.status.as_str(),
                garden.created_at.to_rfc3339(),
                garden.completed_at.map(|d| d.to_rfc3339()),
                garden.order_id
            ],
        )?;
        Ok(())
    }

    /// All gardens, newest first.
    pub fn gardens(&self) -> Result<Vec<GardenRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, status, created_at, completed_at, order_id
             FROM gardens ORDER BY created_at DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(row_to_garden(row)?);
        }
        Ok(result)
    }

    /// Move a garden to a new lifecycle status.
    pub fn update_garden_status(
        &self,
        id: Uuid,
        status: GardenStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE gardens SET status = ?2, completed_at = COALESCE(?3, completed_at)
             WHERE id = ?1",
            params![
                id.to_string(),
                status.as_str(),
                completed_at.map(|d| d.to_rfc3339())
            ],
        )?;
        Ok(())
    }

    /// Attach a redemption order to a garden.
    pub fn set_garden_order(&self, id: Uuid, order_id: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "UPDATE gardens SET order_id = ?2 WHERE id = ?1",
            params![id.to_string(), order_id],
        )?;
        Ok(())
    }

    // ── Planted trees ────────────────────────────────────────────────

    pub fn insert_planted_tree(&self, tree: &PlantedTreeRecord) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO planted_trees (id, garden_id, tree_type_id, row, col, planted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tree.id.to_string(),
                tree.garden_id.to_string(),
                tree.tree_type_id,
                tree.row as i64,
                tree.col as i64,
                tree.planted_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// All trees planted in one garden, in planting order.
    pub fn planted_trees(&self, garden_id: Uuid) -> Result<Vec<PlantedTreeRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, garden_id, tree_type_id, row, col, planted_at
             FROM planted_trees WHERE garden_id = ?1 ORDER BY planted_at",
        )?;
        let mut rows = stmt.query(params![garden_id.to_string()])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(PlantedTreeRecord {
                id: parse_uuid_fallback(&row.get::<_, String>(0)?),
                garden_id: parse_uuid_fallback(&row.get::<_, String>(1)?),
                tree_type_id: row.get(2)?,
                row: row.get::<_, i64>(3)? as usize,
                col: row.get::<_, i64>(4)? as usize,
                planted_at: parse_datetime_fallback(&row.get::<_, String>(5)?),
            });
        }
        Ok(result)
    }

    // ── Stats ────────────────────────────────────────────────────────

    /// All-time statistics against a daily goal.
    pub fn stats_all(&self, goal: u32) -> Result<Stats, rusqlite::Error> {
        let mut stats = Stats::default();

        let mut stmt = self.conn.prepare(
            "SELECT COALESCE(SUM(steps), 0), COUNT(*),
                    COALESCE(SUM(CASE WHEN steps >= ?1 THEN 1 ELSE 0 END), 0)
             FROM daily_activity",
        )?;
        let row = stmt.query_row(params![goal], |row| {
            Ok((
                row.get::<_, u64>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;
        stats.total_steps = row.0;
        stats.days_tracked = row.1;
        stats.days_goal_met = row.2;

        stats.trees_planted =
            self.conn
                .query_row("SELECT COUNT(*) FROM planted_trees", [], |row| row.get(0))?;
        stats.gardens_completed = self.conn.query_row(
            "SELECT COUNT(*) FROM gardens WHERE status != 'active'",
            [],
            |row| row.get(0),
        )?;

        Ok(stats)
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn record_and_query_activity() {
        let db = Database::open_memory().unwrap();
        let metrics = DailyMetrics {
            steps: 11_200,
            distance_m: 8_400.0,
            calories: 310.0,
        };
        db.record_activity(day("2025-06-01"), &metrics).unwrap();
        assert_eq!(db.activity_on(day("2025-06-01")).unwrap(), Some(metrics));
        assert!(db.activity_on(day("2025-06-02")).unwrap().is_none());

        // Re-recording the same day replaces the reading.
        let updated = DailyMetrics {
            steps: 12_000,
            ..metrics
        };
        db.record_activity(day("2025-06-01"), &updated).unwrap();
        assert_eq!(
            db.activity_on(day("2025-06-01")).unwrap().unwrap().steps,
            12_000
        );
    }

    #[test]
    fn range_query_skips_missing_days() {
        let db = Database::open_memory().unwrap();
        for (d, steps) in [("2025-06-01", 4_000u32), ("2025-06-03", 9_000)] {
            db.record_activity(
                day(d),
                &DailyMetrics {
                    steps,
                    ..Default::default()
                },
            )
            .unwrap();
        }
        let range = db
            .steps_in_range(day("2025-06-01"), day("2025-06-03"))
            .unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[&day("2025-06-01")], 4_000);
        assert_eq!(range[&day("2025-06-03")], 9_000);
    }

    #[test]
    fn active_garden_created_once() {
        let db = Database::open_memory().unwrap();
        let first = db.active_garden().unwrap();
        let second = db.active_garden().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.status, GardenStatus::Active);
    }

    #[test]
    fn planted_trees_round_trip() {
        let db = Database::open_memory().unwrap();
        let garden = db.active_garden().unwrap();
        let tree = PlantedTreeRecord {
            id: Uuid::new_v4(),
            garden_id: garden.id,
            tree_type_id: "maple".into(),
            row: 2,
            col: 4,
            planted_at: Utc::now(),
        };
        db.insert_planted_tree(&tree).unwrap();

        let trees = db.planted_trees(garden.id).unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].tree_type_id, "maple");
        assert_eq!((trees[0].row, trees[0].col), (2, 4));
    }

    #[test]
    fn garden_status_transitions_persist() {
        let db = Database::open_memory().unwrap();
        let garden = db.active_garden().unwrap();
        db.update_garden_status(garden.id, GardenStatus::Complete, Some(Utc::now()))
            .unwrap();
        db.set_garden_order(garden.id, "order-123").unwrap();

        let gardens = db.gardens().unwrap();
        assert_eq!(gardens.len(), 1);
        assert_eq!(gardens[0].status, GardenStatus::Complete);
        assert_eq!(gardens[0].order_id.as_deref(), Some("order-123"));
        assert!(gardens[0].completed_at.is_some());
    }

    #[test]
    fn stats_counts_goal_days() {
        let db = Database::open_memory().unwrap();
        for (d, steps) in [
            ("2025-06-01", 10_500u32),
            ("2025-06-02", 4_000),
            ("2025-06-03", 10_000),
        ] {
            db.record_activity(
                day(d),
                &DailyMetrics {
                    steps,
                    ..Default::default()
                },
            )
            .unwrap();
        }
        let stats = db.stats_all(10_000).unwrap();
        assert_eq!(stats.total_steps, 24_500);
        assert_eq!(stats.days_tracked, 3);
        assert_eq!(stats.days_goal_met, 2);
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
    }
}
