//! SQLite store adapter.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::domain::daily_data::DailyData;
use crate::domain::error::StockmanError;
use crate::domain::stock::Stock;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;

const DATE_FORMAT: &str = "%Y-%m-%d";
const ENTERED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    /// Open (creating if absent) a file-backed store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StockmanError> {
        let manager = SqliteConnectionManager::file(path.as_ref());
        Self::from_manager(manager, 4)
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StockmanError> {
        let db_path =
            config
                .get_string("store", "path")
                .ok_or_else(|| StockmanError::ConfigMissing {
                    section: "store".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("store", "pool_size", 4);
        if pool_size < 1 {
            return Err(StockmanError::ConfigInvalid {
                section: "store".into(),
                key: "pool_size".into(),
                reason: format!("must be at least 1, got {pool_size}"),
            });
        }

        let manager = SqliteConnectionManager::file(&db_path);
        Self::from_manager(manager, pool_size as u32)
    }

    pub fn in_memory() -> Result<Self, StockmanError> {
        Self::from_manager(SqliteConnectionManager::memory(), 1)
    }

    fn from_manager(
        manager: SqliteConnectionManager,
        pool_size: u32,
    ) -> Result<Self, StockmanError> {
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| StockmanError::Storage {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(
        &self,
    ) -> Result<r2d2::PooledConnection<SqliteConnectionManager>, StockmanError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| StockmanError::Storage {
                reason: e.to_string(),
            })
    }
}

impl StorePort for SqliteStore {
    fn initialize(&self) -> Result<(), StockmanError> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS stocks (
                symbol TEXT NOT NULL PRIMARY KEY,
                name TEXT NOT NULL,
                shares REAL NOT NULL
            );
            CREATE TABLE IF NOT EXISTS daily_data (
                symbol TEXT NOT NULL,
                date TEXT NOT NULL,
                close REAL NOT NULL,
                volume REAL NOT NULL,
                entered TEXT,
                PRIMARY KEY (symbol, date)
            );
            CREATE INDEX IF NOT EXISTS idx_daily_data_symbol ON daily_data(symbol);",
        )
        .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self) -> Result<Vec<Stock>, StockmanError> {
        let conn = self.conn()?;

        let mut stock_stmt = conn
            .prepare("SELECT symbol, name, shares FROM stocks ORDER BY symbol")
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

        let stock_rows = stock_stmt
            .query_map([], |row| {
                Ok(Stock {
                    symbol: row.get(0)?,
                    name: row.get(1)?,
                    shares: row.get(2)?,
                    data: Vec::new(),
                })
            })
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

        let mut stocks = Vec::new();
        for row in stock_rows {
            stocks.push(
                row.map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        let mut data_stmt = conn
            .prepare(
                "SELECT date, close, volume, entered
                 FROM daily_data
                 WHERE symbol = ?1
                 ORDER BY date ASC",
            )
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

        for stock in &mut stocks {
            let rows = data_stmt
                .query_map(params![stock.symbol], |row| {
                    let date_str: String = row.get(0)?;
                    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            date_str.len(),
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                    let entered_str: Option<String> = row.get(3)?;
                    let entered = match entered_str {
                        Some(s) => Some(
                            NaiveDateTime::parse_from_str(&s, ENTERED_FORMAT).map_err(|e| {
                                rusqlite::Error::FromSqlConversionFailure(
                                    s.len(),
                                    rusqlite::types::Type::Text,
                                    Box::new(e),
                                )
                            })?,
                        ),
                        None => None,
                    };
                    Ok(DailyData {
                        date,
                        close: row.get(1)?,
                        volume: row.get(2)?,
                        entered,
                    })
                })
                .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                    reason: e.to_string(),
                })?;

            for row in rows {
                stock.data.push(row.map_err(|e: rusqlite::Error| {
                    StockmanError::StorageQuery {
                        reason: e.to_string(),
                    }
                })?);
            }
        }

        Ok(stocks)
    }

    fn save(&self, stocks: &[Stock]) -> Result<(), StockmanError> {
        let mut conn = self.conn()?;

        let tx = conn
            .transaction()
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

        // Full replace: an uncommitted failure rolls back to the prior
        // contents.
        tx.execute("DELETE FROM daily_data", [])
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;
        tx.execute("DELETE FROM stocks", [])
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

        for stock in stocks {
            tx.execute(
                "INSERT INTO stocks (symbol, name, shares) VALUES (?1, ?2, ?3)",
                params![stock.symbol, stock.name, stock.shares],
            )
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

            for d in &stock.data {
                tx.execute(
                    "INSERT OR REPLACE INTO daily_data (symbol, date, close, volume, entered)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        stock.symbol,
                        d.date.format(DATE_FORMAT).to_string(),
                        d.close,
                        d.volume,
                        d.entered.map(|t| t.format(ENTERED_FORMAT).to_string()),
                    ],
                )
                .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                    reason: e.to_string(),
                })?;
            }
        }

        tx.commit()
            .map_err(|e: rusqlite::Error| StockmanError::StorageQuery {
                reason: e.to_string(),
            })?;

        Ok(())
    }
}
