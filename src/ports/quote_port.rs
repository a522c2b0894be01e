//! Web retrieval port trait.

use chrono::NaiveDate;

use crate::domain::daily_data::DailyData;
use crate::domain::error::StockmanError;

/// Source of daily observations fetched from the outside world.
///
/// The adapter owns date-range validation, timeouts, and network or parse
/// failures; anything it returns is already well-formed, so the core can
/// merge it directly.
pub trait QuotePort {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyData>, StockmanError>;
}
