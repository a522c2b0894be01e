//! Concrete adapter implementations for ports.

pub mod csv_import;
pub mod file_config_adapter;
pub mod quote_stub;
pub mod sqlite_store;
