//! Deterministic ordering of the tracked set and its observations.
//!
//! Insertion order is never trusted: callers re-sort after any mutation that
//! can disturb order (add, import, retrieval, load).

use super::stock::Stock;

/// Stable sort of the tracked set by symbol, case-insensitive, ascending.
pub fn sort_stocks(stocks: &mut [Stock]) {
    stocks.sort_by(|a, b| {
        a.symbol
            .to_uppercase()
            .cmp(&b.symbol.to_uppercase())
    });
}

/// Stable sort of one stock's observations by trading date, oldest first.
pub fn sort_daily_data(stock: &mut Stock) {
    stock.data.sort_by_key(|d| d.date);
}

/// Restore chronological order for every tracked stock.
pub fn sort_all_daily_data(stocks: &mut [Stock]) {
    for stock in stocks {
        sort_daily_data(stock);
    }
}
