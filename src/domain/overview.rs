//! Balance overview: value exchange holdings via a quote source.
//!
//! A failed price lookup marks that one holding unknown; it never aborts
//! the rest of the overview.

use crate::ports::quote_port::QuotePort;

/// One exchange holding as reported by the quote source.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetBalance {
    pub asset: String,
    pub free: f64,
    pub locked: f64,
}

impl AssetBalance {
    pub fn total(&self) -> f64 {
        self.free + self.locked
    }
}

/// A holding with its (possibly unknown) valuation in the quote asset.
#[derive(Debug, Clone)]
pub struct ValuedBalance {
    pub asset: String,
    pub free: f64,
    pub locked: f64,
    pub price: Option<f64>,
    pub value: Option<f64>,
}

/// Value each holding in `quote_asset` terms. The quote asset itself is
/// worth 1.0 by definition; everything else is looked up as
/// `{asset}{quote_asset}`.
pub fn value_balances(
    quotes: &dyn QuotePort,
    balances: &[AssetBalance],
    quote_asset: &str,
) -> Vec<ValuedBalance> {
    balances
        .iter()
        .map(|balance| {
            let price = if balance.asset == quote_asset {
                Some(1.0)
            } else {
                quotes
                    .get_price(&format!("{}{}", balance.asset, quote_asset))
                    .ok()
            };
            let value = price.map(|p| balance.total() * p);
            ValuedBalance {
                asset: balance.asset.clone(),
                free: balance.free,
                locked: balance.locked,
                price,
                value,
            }
        })
        .collect()
}

/// Sum over the holdings whose value is known.
pub fn total_known(balances: &[ValuedBalance]) -> f64 {
    balances.iter().filter_map(|b| b.value).sum()
}
