//! CSV journal export adapter.

use crate::domain::error::TradelogError;
use crate::domain::trade::StoredTrade;
use std::path::Path;

const HEADER: [&str; 13] = [
    "id",
    "timestamp",
    "pair",
    "leverage",
    "qty",
    "entry_price",
    "entry_value",
    "exit_price",
    "exit_value",
    "commission_pct",
    "commission",
    "pnl",
    "roi",
];

/// Write the whole journal to a CSV file, one row per stored trade, in
/// the order given (callers pass `load_all` output, so ascending id).
pub fn write_journal<P: AsRef<Path>>(
    path: P,
    trades: &[StoredTrade],
) -> Result<(), TradelogError> {
    let mut writer =
        csv::Writer::from_path(path.as_ref()).map_err(|e| TradelogError::Export {
            reason: format!("failed to open {}: {}", path.as_ref().display(), e),
        })?;

    writer
        .write_record(HEADER)
        .map_err(|e| TradelogError::Export {
            reason: e.to_string(),
        })?;

    for stored in trades {
        let t = &stored.trade;
        writer
            .write_record(&[
                stored.id.to_string(),
                t.timestamp.clone(),
                t.pair.clone(),
                t.leverage.to_string(),
                t.qty.to_string(),
                t.entry_price.to_string(),
                t.entry_value.to_string(),
                t.exit_price.to_string(),
                t.exit_value.to_string(),
                t.commission_pct.to_string(),
                t.commission.to_string(),
                t.pnl.to_string(),
                t.roi.to_string(),
            ])
            .map_err(|e| TradelogError::Export {
                reason: e.to_string(),
            })?;
    }

    writer.flush().map_err(|e| TradelogError::Export {
        reason: e.to_string(),
    })
}
