//! Persistence port trait.

use crate::domain::error::StockmanError;
use crate::domain::stock::Stock;

/// Durable storage of the tracked set. Load and save are wholesale: `load`
/// returns every persisted stock with its observations, `save` replaces the
/// store's entire contents atomically. Single-writer use is assumed.
pub trait StorePort {
    /// Create the store schema if absent. Idempotent; never destroys data.
    fn initialize(&self) -> Result<(), StockmanError>;

    /// Read all persisted stocks in persisted order. Callers re-sort.
    fn load(&self) -> Result<Vec<Stock>, StockmanError>;

    /// Replace the store's contents with the given set. A partial failure
    /// must leave the prior contents intact.
    fn save(&self, stocks: &[Stock]) -> Result<(), StockmanError>;
}
