//! Trade record types.

/// A trade as entered by the user. Identity and size are always present;
/// the financial fields may be partial. At most one of `target_roi` /
/// `target_pnl` is honored — ROI wins when both are set.
#[derive(Debug, Clone, Default)]
pub struct TradeInput {
    pub timestamp: String,
    pub pair: String,
    pub leverage: u32,
    pub qty: f64,
    pub entry_price: Option<f64>,
    pub entry_value: Option<f64>,
    pub exit_price: Option<f64>,
    pub exit_value: Option<f64>,
    pub commission_pct: f64,
    pub target_roi: Option<f64>,
    pub target_pnl: Option<f64>,
}

/// A trade with every derived field populated. Only produced by
/// [`resolve`](super::resolver::resolve).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrade {
    pub timestamp: String,
    pub pair: String,
    pub leverage: u32,
    pub qty: f64,
    pub entry_price: f64,
    pub entry_value: f64,
    pub exit_price: f64,
    pub exit_value: f64,
    pub commission_pct: f64,
    pub commission: f64,
    pub pnl: f64,
    pub roi: f64,
}

/// A resolved trade as it sits in the store, with its assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTrade {
    pub id: i64,
    pub trade: ResolvedTrade,
}
