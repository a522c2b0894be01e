//! Tracked stock entity.

use super::daily_data::DailyData;
use super::error::StockmanError;

/// A tracked instrument: symbol (primary key of the tracked set, stored
/// uppercase), free-text name, current share count, and its owned list of
/// daily observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub data: Vec<DailyData>,
}

impl Stock {
    /// Build a stock with a normalized (trimmed, uppercased) symbol.
    /// The symbol must be non-empty; shares must be finite and non-negative.
    pub fn new(symbol: &str, name: &str, shares: f64) -> Result<Self, StockmanError> {
        let symbol = normalize_symbol(symbol)?;
        if !shares.is_finite() || shares < 0.0 {
            return Err(StockmanError::Validation {
                reason: format!("shares must be a non-negative number, got {shares}"),
            });
        }
        Ok(Self {
            symbol,
            name: name.trim().to_string(),
            shares,
            data: Vec::new(),
        })
    }

    /// Increase the share count. Quantity must be finite and positive.
    pub fn buy(&mut self, quantity: f64) -> Result<(), StockmanError> {
        check_quantity(quantity)?;
        self.shares += quantity;
        Ok(())
    }

    /// Decrease the share count. Selling more than held is rejected and
    /// leaves the count unchanged.
    pub fn sell(&mut self, quantity: f64) -> Result<(), StockmanError> {
        check_quantity(quantity)?;
        if quantity > self.shares {
            return Err(StockmanError::InvalidOperation {
                reason: format!(
                    "cannot sell {quantity} shares of {}: only {} held",
                    self.symbol, self.shares
                ),
            });
        }
        self.shares -= quantity;
        Ok(())
    }

    /// Merge one observation. An entry for an already-present date replaces
    /// the old row (newest wins); otherwise the entry is appended. Callers
    /// restore chronological order via [`crate::domain::ordering`].
    pub fn add_data(&mut self, entry: DailyData) {
        match self.data.iter_mut().find(|d| d.date == entry.date) {
            Some(existing) => *existing = entry,
            None => self.data.push(entry),
        }
    }

    /// Latest observation, assuming the list is chronologically sorted.
    pub fn latest(&self) -> Option<&DailyData> {
        self.data.last()
    }
}

fn normalize_symbol(symbol: &str) -> Result<String, StockmanError> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(StockmanError::Validation {
            reason: "symbol must not be empty".into(),
        });
    }
    Ok(trimmed.to_uppercase())
}

fn check_quantity(quantity: f64) -> Result<(), StockmanError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(StockmanError::Validation {
            reason: format!("quantity must be a positive number, got {quantity}"),
        });
    }
    Ok(())
}
