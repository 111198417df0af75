//! SQLite trade store adapter.

use crate::domain::error::TradelogError;
use crate::domain::trade::{ResolvedTrade, StoredTrade};
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_store_port::TradeStorePort;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradelogError> {
        let db_path =
            config
                .get_string("store", "path")
                .ok_or_else(|| TradelogError::ConfigMissing {
                    section: "store".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("store", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool =
            Pool::builder()
                .max_size(pool_size)
                .build(manager)
                .map_err(|e: r2d2::Error| TradelogError::Database {
                    reason: e.to_string(),
                })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, TradelogError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| TradelogError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn initialize_schema(&self) -> Result<(), TradelogError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| TradelogError::Database {
                reason: e.to_string(),
            })?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS trades (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                pair TEXT NOT NULL,
                leverage INTEGER,
                qty REAL,
                entry_price REAL,
                entry_value REAL,
                exit_price REAL,
                exit_value REAL,
                commission_pct REAL,
                commission REAL,
                pnl REAL,
                roi REAL
            );",
        )
        .map_err(|e: rusqlite::Error| TradelogError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

impl TradeStorePort for SqliteStore {
    fn insert(&self, trade: &ResolvedTrade) -> Result<i64, TradelogError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| TradelogError::Database {
                reason: e.to_string(),
            })?;

        conn.execute(
            "INSERT INTO trades (timestamp, pair, leverage, qty,
                                 entry_price, entry_value, exit_price, exit_value,
                                 commission_pct, commission, pnl, roi)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                trade.timestamp,
                trade.pair,
                trade.leverage,
                trade.qty,
                trade.entry_price,
                trade.entry_value,
                trade.exit_price,
                trade.exit_value,
                trade.commission_pct,
                trade.commission,
                trade.pnl,
                trade.roi
            ],
        )
        .map_err(|e: rusqlite::Error| TradelogError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(conn.last_insert_rowid())
    }

    fn load_all(&self) -> Result<Vec<StoredTrade>, TradelogError> {
        let conn = self
            .pool
            .get()
            .map_err(|e: r2d2::Error| TradelogError::Database {
                reason: e.to_string(),
            })?;

        let query = "SELECT id, timestamp, pair, leverage, qty,
                            entry_price, entry_value, exit_price, exit_value,
                            commission_pct, commission, pnl, roi
                     FROM trades
                     ORDER BY id ASC";

        let mut stmt =
            conn.prepare(query)
                .map_err(|e: rusqlite::Error| TradelogError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoredTrade {
                    id: row.get(0)?,
                    trade: ResolvedTrade {
                        timestamp: row.get(1)?,
                        pair: row.get(2)?,
                        leverage: row.get(3)?,
                        qty: row.get(4)?,
                        entry_price: row.get(5)?,
                        entry_value: row.get(6)?,
                        exit_price: row.get(7)?,
                        exit_value: row.get(8)?,
                        commission_pct: row.get(9)?,
                        commission: row.get(10)?,
                        pnl: row.get(11)?,
                        roi: row.get(12)?,
                    },
                })
            })
            .map_err(|e: rusqlite::Error| TradelogError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut trades = Vec::new();
        for row in rows {
            trades.push(
                row.map_err(|e: rusqlite::Error| TradelogError::DatabaseQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(trades)
    }
}
