#![allow(dead_code)]

use std::collections::HashMap;
use tradelog::domain::error::TradelogError;
pub use tradelog::domain::overview::AssetBalance;
use tradelog::domain::trade::TradeInput;
use tradelog::ports::quote_port::QuotePort;

pub struct MockQuotePort {
    pub prices: HashMap<String, f64>,
    pub balances: Vec<AssetBalance>,
    pub balances_error: Option<String>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            balances: Vec::new(),
            balances_error: None,
        }
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_balance(mut self, asset: &str, free: f64, locked: f64) -> Self {
        self.balances.push(AssetBalance {
            asset: asset.to_string(),
            free,
            locked,
        });
        self
    }

    pub fn with_balances_error(mut self, reason: &str) -> Self {
        self.balances_error = Some(reason.to_string());
        self
    }
}

impl QuotePort for MockQuotePort {
    fn get_price(&self, symbol: &str) -> Result<f64, TradelogError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| TradelogError::QuoteUnavailable {
                reason: format!("no ticker for {symbol}"),
            })
    }

    fn get_balances(&self) -> Result<Vec<AssetBalance>, TradelogError> {
        if let Some(reason) = &self.balances_error {
            return Err(TradelogError::QuoteUnavailable {
                reason: reason.clone(),
            });
        }
        Ok(self.balances.clone())
    }
}

pub fn make_input(pair: &str, qty: f64) -> TradeInput {
    TradeInput {
        timestamp: "2024-01-15 10:30:00".to_string(),
        pair: pair.to_string(),
        leverage: 1,
        qty,
        entry_price: None,
        entry_value: None,
        exit_price: None,
        exit_value: None,
        commission_pct: 0.1,
        target_roi: None,
        target_pnl: None,
    }
}
