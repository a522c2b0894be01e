//! In-memory tracked set and the operations both shells consume.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use super::daily_data::DailyData;
use super::error::StockmanError;
use super::ordering::{sort_all_daily_data, sort_daily_data, sort_stocks};
use super::report::StockReport;
use super::stock::Stock;
use crate::ports::store_port::StorePort;

/// The tracked set of stocks. Owned by the process's composition root and
/// passed explicitly to the shell and the persistence boundary; the set is
/// kept sorted by symbol and each stock's observations chronologically.
#[derive(Debug, Default)]
pub struct Portfolio {
    stocks: Vec<Stock>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self { stocks: Vec::new() }
    }

    /// Start tracking a new stock. A symbol already tracked (compared
    /// case-insensitively) is rejected; history is never silently dropped.
    pub fn add_stock(
        &mut self,
        symbol: &str,
        name: &str,
        shares: f64,
    ) -> Result<&Stock, StockmanError> {
        let stock = Stock::new(symbol, name, shares)?;
        if self.find(&stock.symbol).is_some() {
            return Err(StockmanError::InvalidOperation {
                reason: format!("{} is already tracked", stock.symbol),
            });
        }
        let symbol = stock.symbol.clone();
        self.stocks.push(stock);
        sort_stocks(&mut self.stocks);
        // Re-locate after the sort.
        self.stock(&symbol)
    }

    /// Stop tracking a stock, dropping its entire history with it.
    pub fn delete_stock(&mut self, symbol: &str) -> Result<Stock, StockmanError> {
        let idx = self.index_of(symbol)?;
        Ok(self.stocks.remove(idx))
    }

    /// Buy shares of a tracked stock. Returns the new share count.
    pub fn buy(&mut self, symbol: &str, quantity: f64) -> Result<f64, StockmanError> {
        let stock = self.stock_mut(symbol)?;
        stock.buy(quantity)?;
        Ok(stock.shares)
    }

    /// Sell shares of a tracked stock. Returns the new share count.
    pub fn sell(&mut self, symbol: &str, quantity: f64) -> Result<f64, StockmanError> {
        let stock = self.stock_mut(symbol)?;
        stock.sell(quantity)?;
        Ok(stock.shares)
    }

    /// Record one manually-entered observation, stamped with the current
    /// local time.
    pub fn add_daily_data(
        &mut self,
        symbol: &str,
        date: NaiveDate,
        close: f64,
        volume: f64,
    ) -> Result<(), StockmanError> {
        let entry = DailyData::new(date, close, volume)?.with_entry_time(entry_timestamp());
        let stock = self.stock_mut(symbol)?;
        stock.add_data(entry);
        sort_daily_data(stock);
        Ok(())
    }

    /// Bulk-merge observations produced by an ingestion adapter. The target
    /// stock is resolved before any mutation, so a missing symbol changes
    /// nothing. Returns the number of entries merged.
    pub fn merge_daily(
        &mut self,
        symbol: &str,
        entries: Vec<DailyData>,
    ) -> Result<usize, StockmanError> {
        let stock = self.stock_mut(symbol)?;
        let count = entries.len();
        for entry in entries {
            stock.add_data(entry);
        }
        sort_daily_data(stock);
        Ok(count)
    }

    /// Summary report for one stock.
    pub fn report(&self, symbol: &str) -> Result<StockReport, StockmanError> {
        Ok(StockReport::for_stock(self.stock(symbol)?))
    }

    /// Replace the tracked set with the store's contents. On failure the set
    /// is left empty and valid so the caller can proceed without history.
    pub fn load_from(&mut self, store: &dyn StorePort) -> Result<(), StockmanError> {
        self.stocks.clear();
        let mut stocks = store.load()?;
        sort_stocks(&mut stocks);
        sort_all_daily_data(&mut stocks);
        self.stocks = stocks;
        Ok(())
    }

    /// Write the whole tracked set to the store.
    pub fn save_to(&self, store: &dyn StorePort) -> Result<(), StockmanError> {
        store.save(&self.stocks)
    }

    /// The tracked stocks, ordered by symbol.
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Look up a tracked stock by symbol.
    pub fn stock(&self, symbol: &str) -> Result<&Stock, StockmanError> {
        let idx = self.index_of(symbol)?;
        Ok(&self.stocks[idx])
    }

    fn stock_mut(&mut self, symbol: &str) -> Result<&mut Stock, StockmanError> {
        let idx = self.index_of(symbol)?;
        Ok(&mut self.stocks[idx])
    }

    fn index_of(&self, symbol: &str) -> Result<usize, StockmanError> {
        self.find(symbol).ok_or_else(|| StockmanError::NotFound {
            symbol: symbol.trim().to_uppercase(),
        })
    }

    fn find(&self, symbol: &str) -> Option<usize> {
        let needle = symbol.trim();
        self.stocks
            .iter()
            .position(|s| s.symbol.eq_ignore_ascii_case(needle))
    }
}

/// Current local time at whole-second precision, matching what the store
/// can round-trip.
fn entry_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
