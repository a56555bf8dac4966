//! Persistent storage using redb.
//!
//! Holds the crafting timer between runs: the configured duration and the
//! start instant of the running craft. Values are JSON-encoded.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::craft::{CraftDuration, CraftTimer};
use crate::error::{PortfolioError, PortfolioResult};

/// Craft timer values (key: field name, value: JSON)
const CRAFT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("craft");

const CRAFT_START_KEY: &str = "craft_start_time";
const CRAFT_DURATION_KEY: &str = "craft_duration";

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// Creates the parent directory and all tables if they don't exist.
    pub fn new(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CRAFT_TABLE)?;
        }
        write_txn.commit()?;

        info!(?path, "Opened storage");
        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> PortfolioResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(CRAFT_TABLE)?;
            let data =
                serde_json::to_vec(value).map_err(|e| PortfolioError::Serialization(e.to_string()))?;
            table.insert(key, data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> PortfolioResult<Option<T>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(CRAFT_TABLE)?;

        match table.get(key)? {
            Some(v) => {
                let value = serde_json::from_slice(v.value())
                    .map_err(|e| PortfolioError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn remove(&self, key: &str) -> PortfolioResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(CRAFT_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Craft Timer Operations
    // ═══════════════════════════════════════════════════════════════════════

    pub fn save_craft_duration(&self, duration: &CraftDuration) -> PortfolioResult<()> {
        debug!(%duration, "Saving craft duration");
        self.put(CRAFT_DURATION_KEY, duration)
    }

    /// Load the configured duration, falling back to the default craft length
    pub fn load_craft_duration(&self) -> PortfolioResult<CraftDuration> {
        Ok(self.get(CRAFT_DURATION_KEY)?.unwrap_or_default())
    }

    pub fn save_craft_start(&self, started_at_ms: i64) -> PortfolioResult<()> {
        debug!(started_at_ms, "Saving craft start");
        self.put(CRAFT_START_KEY, &started_at_ms)
    }

    pub fn load_craft_start(&self) -> PortfolioResult<Option<i64>> {
        self.get(CRAFT_START_KEY)
    }

    /// Forget the running craft. Succeeds even if none was started.
    pub fn clear_craft_start(&self) -> PortfolioResult<()> {
        debug!("Clearing craft start");
        self.remove(CRAFT_START_KEY)
    }

    pub fn load_craft_timer(&self) -> PortfolioResult<CraftTimer> {
        Ok(CraftTimer {
            duration: self.load_craft_duration()?,
            started_at_ms: self.load_craft_start()?,
        })
    }

    /// Persist both fields; an idle timer clears the stored start
    pub fn save_craft_timer(&self, timer: &CraftTimer) -> PortfolioResult<()> {
        self.save_craft_duration(&timer.duration)?;
        match timer.started_at_ms {
            Some(start) => self.save_craft_start(start),
            None => self.clear_craft_start(),
        }
    }
}
