//! Offline web-retrieval stub.
//!
//! Honors the [`QuotePort`] contract (range validation happens here, not in
//! the core) but has no live quote source to talk to, so every fetch reports
//! a retrieval failure. The merge path is exercised in tests through a mock
//! port.

use chrono::NaiveDate;

use crate::domain::daily_data::DailyData;
use crate::domain::error::StockmanError;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;

const DEFAULT_TIMEOUT_SECS: i64 = 30;

pub struct WebQuoteStub {
    timeout_secs: i64,
}

impl WebQuoteStub {
    pub fn new() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            timeout_secs: config.get_int("retrieval", "timeout_secs", DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for WebQuoteStub {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotePort for WebQuoteStub {
    fn fetch_daily(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyData>, StockmanError> {
        if from > to {
            return Err(StockmanError::Validation {
                reason: format!("start date {from} is after end date {to}"),
            });
        }

        Err(StockmanError::Retrieval {
            reason: format!(
                "no quote source configured for {symbol} (timeout {}s)",
                self.timeout_secs
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_date_range() {
        let stub = WebQuoteStub::new();
        let err = stub
            .fetch_daily("AAPL", date(2024, 2, 1), date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, StockmanError::Validation { .. }));
    }

    #[test]
    fn valid_range_reports_retrieval_failure() {
        let stub = WebQuoteStub::new();
        let err = stub
            .fetch_daily("AAPL", date(2024, 1, 1), date(2024, 2, 1))
            .unwrap_err();
        assert!(matches!(err, StockmanError::Retrieval { .. }));
        assert!(err.to_string().contains("AAPL"));
    }
}
