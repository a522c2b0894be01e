//! Per-stock summary statistics.

use std::fmt;

use chrono::NaiveDateTime;

use super::stock::Stock;

/// Derived figures for one stock: observation count, close-price extremes and
/// average, total traded volume, and the most recent row's close and entry
/// timestamp. Price statistics are `None` when no data is held.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReport {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub observations: usize,
    pub min_close: Option<f64>,
    pub max_close: Option<f64>,
    pub avg_close: Option<f64>,
    pub total_volume: f64,
    pub last_close: Option<f64>,
    pub last_entered: Option<NaiveDateTime>,
}

impl StockReport {
    /// Compute the report. Assumes the stock's data is chronologically
    /// sorted, as maintained by the ordering utility.
    pub fn for_stock(stock: &Stock) -> Self {
        let observations = stock.data.len();
        let mut min_close = None;
        let mut max_close = None;
        let mut total_close = 0.0;
        let mut total_volume = 0.0;

        for d in &stock.data {
            min_close = Some(min_close.map_or(d.close, |m: f64| m.min(d.close)));
            max_close = Some(max_close.map_or(d.close, |m: f64| m.max(d.close)));
            total_close += d.close;
            total_volume += d.volume;
        }

        let avg_close = if observations > 0 {
            Some(total_close / observations as f64)
        } else {
            None
        };

        StockReport {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            shares: stock.shares,
            observations,
            min_close,
            max_close,
            avg_close,
            total_volume,
            last_close: stock.latest().map(|d| d.close),
            last_entered: stock.latest().and_then(|d| d.entered),
        }
    }
}

impl fmt::Display for StockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol: {}", self.symbol)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Shares: {}", self.shares)?;
        if self.observations == 0 {
            return write!(f, "No data available");
        }
        writeln!(f, "Observations: {}", self.observations)?;
        if let Some(entered) = self.last_entered {
            writeln!(f, "Last Entry: {}", entered.format("%Y-%m-%d %H:%M:%S"))?;
        }
        if let Some(avg) = self.avg_close {
            writeln!(f, "Average Price: ${avg:.2}")?;
        }
        if let Some(min) = self.min_close {
            writeln!(f, "Min Price: ${min:.2}")?;
        }
        if let Some(max) = self.max_close {
            writeln!(f, "Max Price: ${max:.2}")?;
        }
        if let Some(last) = self.last_close {
            writeln!(f, "Last Price: ${last:.2}")?;
        }
        write!(f, "Total Volume: {:.0}", self.total_volume)
    }
}
