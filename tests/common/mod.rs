#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::process::ExitCode;

use stockman::domain::daily_data::DailyData;
use stockman::domain::error::StockmanError;
use stockman::domain::stock::Stock;
use stockman::ports::quote_port::QuotePort;
use stockman::ports::store_port::StorePort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_day(date_str: &str, close: f64, volume: f64) -> DailyData {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap();
    DailyData::new(date, close, volume).unwrap()
}

pub fn make_stock(symbol: &str, name: &str, shares: f64) -> Stock {
    Stock::new(symbol, name, shares).unwrap()
}

/// ExitCode has no PartialEq; compare the Debug renderings.
pub fn assert_exit(actual: ExitCode, expected: ExitCode) {
    assert_eq!(format!("{actual:?}"), format!("{expected:?}"));
}

pub struct MockQuotePort {
    pub data: HashMap<String, Vec<DailyData>>,
    pub errors: HashMap<String, String>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_days(mut self, symbol: &str, days: Vec<DailyData>) -> Self {
        self.data.insert(symbol.to_string(), days);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyData>, StockmanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockmanError::Retrieval {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|days| {
                days.iter()
                    .filter(|d| d.date >= from && d.date <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// A store whose every operation fails, for exercising the
/// unavailable-store paths.
pub struct FailingStore;

impl StorePort for FailingStore {
    fn initialize(&self) -> Result<(), StockmanError> {
        Err(StockmanError::Storage {
            reason: "store is unavailable".into(),
        })
    }

    fn load(&self) -> Result<Vec<Stock>, StockmanError> {
        Err(StockmanError::Storage {
            reason: "store is unavailable".into(),
        })
    }

    fn save(&self, _stocks: &[Stock]) -> Result<(), StockmanError> {
        Err(StockmanError::Storage {
            reason: "store is unavailable".into(),
        })
    }
}
