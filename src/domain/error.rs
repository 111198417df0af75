//! Domain error types.

/// Top-level error type for tradelog.
#[derive(Debug, thiserror::Error)]
pub enum TradelogError {
    #[error("quantity must be positive, got {qty}")]
    InvalidQuantity { qty: f64 },

    #[error("entry side unresolvable: supply entry_price or entry_value")]
    UnresolvableEntry,

    #[error("exit side unresolvable: supply exit_price, exit_value, or a target")]
    UnresolvableExit,

    #[error("commission of {commission_pct}% consumes all exit proceeds (must be below 100)")]
    DegenerateCommission { commission_pct: f64 },

    #[error("quote unavailable: {reason}")]
    QuoteUnavailable { reason: String },

    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TradelogError> for std::process::ExitCode {
    fn from(err: &TradelogError) -> Self {
        let code: u8 = match err {
            TradelogError::Io(_) | TradelogError::Export { .. } => 1,
            TradelogError::ConfigParse { .. }
            | TradelogError::ConfigMissing { .. }
            | TradelogError::ConfigInvalid { .. } => 2,
            TradelogError::Database { .. } | TradelogError::DatabaseQuery { .. } => 3,
            TradelogError::InvalidQuantity { .. }
            | TradelogError::UnresolvableEntry
            | TradelogError::UnresolvableExit
            | TradelogError::DegenerateCommission { .. } => 4,
            TradelogError::QuoteUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
