//! Daily price/volume observation.

use chrono::{NaiveDate, NaiveDateTime};

use super::error::StockmanError;

/// One closing price and traded volume for one trading date.
///
/// `entered` records when the row entered the system; bulk-imported and
/// retrieved rows carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyData {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: f64,
    pub entered: Option<NaiveDateTime>,
}

impl DailyData {
    /// Build a validated observation. Close and volume must be finite and
    /// non-negative; volume is real-valued to tolerate adjusted feeds.
    pub fn new(date: NaiveDate, close: f64, volume: f64) -> Result<Self, StockmanError> {
        if !close.is_finite() || close < 0.0 {
            return Err(StockmanError::Validation {
                reason: format!("close must be a non-negative number, got {close}"),
            });
        }
        if !volume.is_finite() || volume < 0.0 {
            return Err(StockmanError::Validation {
                reason: format!("volume must be a non-negative number, got {volume}"),
            });
        }
        Ok(Self {
            date,
            close,
            volume,
            entered: None,
        })
    }

    /// Stamp the time this row was recorded.
    pub fn with_entry_time(mut self, entered: NaiveDateTime) -> Self {
        self.entered = Some(entered);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_accepts_valid_observation() {
        let dd = DailyData::new(date(2024, 1, 2), 185.50, 1_000_000.0).unwrap();
        assert_eq!(dd.date, date(2024, 1, 2));
        assert!((dd.close - 185.50).abs() < f64::EPSILON);
        assert!((dd.volume - 1_000_000.0).abs() < f64::EPSILON);
        assert!(dd.entered.is_none());
    }

    #[test]
    fn new_accepts_zero_price_and_volume() {
        assert!(DailyData::new(date(2024, 1, 2), 0.0, 0.0).is_ok());
    }

    #[test]
    fn new_rejects_negative_close() {
        let err = DailyData::new(date(2024, 1, 2), -1.0, 100.0).unwrap_err();
        assert!(matches!(err, StockmanError::Validation { .. }));
    }

    #[test]
    fn new_rejects_negative_volume() {
        let err = DailyData::new(date(2024, 1, 2), 1.0, -100.0).unwrap_err();
        assert!(matches!(err, StockmanError::Validation { .. }));
    }

    #[test]
    fn new_rejects_non_finite_values() {
        assert!(DailyData::new(date(2024, 1, 2), f64::NAN, 100.0).is_err());
        assert!(DailyData::new(date(2024, 1, 2), f64::INFINITY, 100.0).is_err());
        assert!(DailyData::new(date(2024, 1, 2), 1.0, f64::NAN).is_err());
    }

    #[test]
    fn with_entry_time_sets_timestamp() {
        let stamp = date(2024, 1, 2).and_hms_opt(9, 30, 0).unwrap();
        let dd = DailyData::new(date(2024, 1, 2), 10.0, 5.0)
            .unwrap()
            .with_entry_time(stamp);
        assert_eq!(dd.entered, Some(stamp));
    }
}
