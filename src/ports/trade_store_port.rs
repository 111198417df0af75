//! Trade persistence port trait.

use crate::domain::error::TradelogError;
use crate::domain::trade::{ResolvedTrade, StoredTrade};

/// Append-only store of resolved trades. Rows are never updated or
/// deleted once written.
pub trait TradeStorePort {
    /// Append one fully-resolved trade, returning its assigned id.
    /// Atomic per call.
    fn insert(&self, trade: &ResolvedTrade) -> Result<i64, TradelogError>;

    /// Every stored trade, ascending id order.
    fn load_all(&self) -> Result<Vec<StoredTrade>, TradelogError>;
}
