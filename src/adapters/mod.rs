//! Concrete adapter implementations for ports.

pub mod binance_quote;
pub mod csv_export;
pub mod file_config_adapter;
pub mod sqlite_store;
