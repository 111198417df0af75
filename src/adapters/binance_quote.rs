//! Binance REST quote adapter.
//!
//! Prices come from the public ticker endpoint; balances from the signed
//! account endpoint (HMAC-SHA256 over the query string, key material from
//! the environment). Every failure maps to `QuoteUnavailable` so callers
//! can degrade per-asset instead of aborting.

use crate::domain::error::TradelogError;
use crate::domain::overview::AssetBalance;
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

pub struct BinanceQuoteAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct TickerResponse {
    price: String,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    balances: Vec<BalanceEntry>,
}

#[derive(Debug, Deserialize)]
struct BalanceEntry {
    asset: String,
    free: String,
    locked: String,
}

impl BinanceQuoteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradelogError> {
        let base_url = config
            .get_string("quote", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();
        let api_secret = std::env::var(API_SECRET_VAR).unwrap_or_default();
        Self::new(base_url, api_key, api_secret)
    }

    pub fn new(
        base_url: String,
        api_key: String,
        api_secret: String,
    ) -> Result<Self, TradelogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TradelogError::QuoteUnavailable {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
            api_secret,
        })
    }

    fn sign(&self, query: &str) -> Result<String, TradelogError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.api_secret.as_bytes()).map_err(|e| {
            TradelogError::QuoteUnavailable {
                reason: format!("bad signing key: {e}"),
            }
        })?;
        mac.update(query.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn parse_amount(asset: &str, field: &str, raw: &str) -> Result<f64, TradelogError> {
        raw.parse::<f64>()
            .map_err(|e| TradelogError::QuoteUnavailable {
                reason: format!("bad {field} amount for {asset}: {e}"),
            })
    }
}

impl QuotePort for BinanceQuoteAdapter {
    fn get_price(&self, symbol: &str) -> Result<f64, TradelogError> {
        let url = format!("{}/api/v3/ticker/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .map_err(|e| TradelogError::QuoteUnavailable {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TradelogError::QuoteUnavailable {
                reason: format!("ticker {} returned {}", symbol, response.status()),
            });
        }

        let ticker: TickerResponse =
            response
                .json()
                .map_err(|e| TradelogError::QuoteUnavailable {
                    reason: e.to_string(),
                })?;

        ticker
            .price
            .parse::<f64>()
            .map_err(|e| TradelogError::QuoteUnavailable {
                reason: format!("bad price for {symbol}: {e}"),
            })
    }

    fn get_balances(&self) -> Result<Vec<AssetBalance>, TradelogError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TradelogError::QuoteUnavailable {
                reason: e.to_string(),
            })?
            .as_millis();

        let query = format!("timestamp={timestamp}");
        let signature = self.sign(&query)?;
        let url = format!(
            "{}/api/v3/account?{}&signature={}",
            self.base_url, query, signature
        );

        let response = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .map_err(|e| TradelogError::QuoteUnavailable {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TradelogError::QuoteUnavailable {
                reason: format!("account endpoint returned {}", response.status()),
            });
        }

        let account: AccountResponse =
            response
                .json()
                .map_err(|e| TradelogError::QuoteUnavailable {
                    reason: e.to_string(),
                })?;

        let mut balances = Vec::new();
        for entry in account.balances {
            let free = Self::parse_amount(&entry.asset, "free", &entry.free)?;
            let locked = Self::parse_amount(&entry.asset, "locked", &entry.locked)?;
            if free + locked > 0.0 {
                balances.push(AssetBalance {
                    asset: entry.asset,
                    free,
                    locked,
                });
            }
        }

        Ok(balances)
    }
}
