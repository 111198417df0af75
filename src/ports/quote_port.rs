//! Market quote port trait.

use crate::domain::error::TradelogError;
use crate::domain::overview::AssetBalance;

/// Read-only view onto an exchange. Only the balance overview uses this;
/// trade resolution never does.
pub trait QuotePort {
    /// Current market price for a symbol such as `BTCUSDT`.
    fn get_price(&self, symbol: &str) -> Result<f64, TradelogError>;

    /// Non-zero account holdings.
    fn get_balances(&self) -> Result<Vec<AssetBalance>, TradelogError>;
}
