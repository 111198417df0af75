//! Bidirectional trade resolution.
//!
//! Turns a partially-specified [`TradeInput`] into a [`ResolvedTrade`].
//! Price and value are interchangeable on each side (`value = price * qty`),
//! and the exit side can instead be solved backwards from a target ROI or a
//! target PNL. Pure: no I/O, no clock — the caller supplies the timestamp.

use super::error::TradelogError;
use super::trade::{ResolvedTrade, TradeInput};

/// Resolve one trade in a single pass.
///
/// Mode is selected by the targets on the input: a target ROI takes
/// precedence over a target PNL; with neither, the exit side must be at
/// least partially given. Derived fields are computed in a fixed order —
/// commission before pnl, pnl before roi.
pub fn resolve(input: &TradeInput) -> Result<ResolvedTrade, TradelogError> {
    if input.qty <= 0.0 {
        return Err(TradelogError::InvalidQuantity { qty: input.qty });
    }

    let (entry_price, entry_value) =
        normalize_side(input.entry_price, input.entry_value, input.qty)
            .ok_or(TradelogError::UnresolvableEntry)?;

    // Normalization runs unconditionally; a target simply overrides the
    // exit side afterwards.
    let exit = normalize_side(input.exit_price, input.exit_value, input.qty);

    let (exit_price, exit_value, commission, pnl, roi) =
        if let Some(target_roi) = input.target_roi {
            solve_for_roi(entry_value, input.qty, input.commission_pct, target_roi)?
        } else if let Some(target_pnl) = input.target_pnl {
            solve_for_pnl(entry_value, input.qty, input.commission_pct, target_pnl)?
        } else {
            let (exit_price, exit_value) = exit.ok_or(TradelogError::UnresolvableExit)?;
            let commission = (entry_value + exit_value) * input.commission_pct / 100.0;
            let pnl = exit_value - entry_value - commission;
            let roi = roi_pct(pnl, entry_value);
            (exit_price, exit_value, commission, pnl, roi)
        };

    Ok(ResolvedTrade {
        timestamp: input.timestamp.clone(),
        pair: input.pair.clone(),
        leverage: input.leverage,
        qty: input.qty,
        entry_price,
        entry_value,
        exit_price,
        exit_value,
        commission_pct: input.commission_pct,
        commission,
        pnl,
        roi,
    })
}

/// Fill in whichever of price/value is missing via `value = price * qty`.
/// Both given are trusted as-is; neither given is `None`.
fn normalize_side(price: Option<f64>, value: Option<f64>, qty: f64) -> Option<(f64, f64)> {
    match (price, value) {
        (Some(p), Some(v)) => Some((p, v)),
        (Some(p), None) => Some((p, p * qty)),
        (None, Some(v)) => Some((v / qty, v)),
        (None, None) => None,
    }
}

fn roi_pct(pnl: f64, entry_value: f64) -> f64 {
    if entry_value != 0.0 {
        pnl / entry_value * 100.0
    } else {
        0.0
    }
}

/// Solve the exit side so the trade nets `target_roi` percent after
/// commission. Derived from `ROI = [EV*(1-r) - IV*(1+r)] / IV * 100` with
/// `r = commission_pct / 100`. The roi field is the target as given, not a
/// recomputation from pnl.
fn solve_for_roi(
    entry_value: f64,
    qty: f64,
    commission_pct: f64,
    target_roi: f64,
) -> Result<(f64, f64, f64, f64, f64), TradelogError> {
    if commission_pct >= 100.0 {
        return Err(TradelogError::DegenerateCommission { commission_pct });
    }
    if entry_value == 0.0 {
        return Err(TradelogError::UnresolvableEntry);
    }

    let r = commission_pct / 100.0;
    let roi_frac = target_roi / 100.0;
    let exit_value = entry_value * (1.0 + r + roi_frac) / (1.0 - r);
    let exit_price = exit_value / qty;
    let commission = (entry_value + exit_value) * r;
    let pnl = exit_value - entry_value - commission;

    Ok((exit_price, exit_value, commission, pnl, target_roi))
}

/// Solve the exit side so the trade nets `target_pnl` absolute. From
/// `PNL = EV*(1-r) - IV*(1+r)` follows `EV = (PNL + IV*(1+r)) / (1-r)`.
fn solve_for_pnl(
    entry_value: f64,
    qty: f64,
    commission_pct: f64,
    target_pnl: f64,
) -> Result<(f64, f64, f64, f64, f64), TradelogError> {
    if commission_pct >= 100.0 {
        return Err(TradelogError::DegenerateCommission { commission_pct });
    }

    let r = commission_pct / 100.0;
    let exit_value = (target_pnl + entry_value * (1.0 + r)) / (1.0 - r);
    let exit_price = exit_value / qty;
    let commission = (entry_value + exit_value) * r;
    let roi = roi_pct(target_pnl, entry_value);

    Ok((exit_price, exit_value, commission, target_pnl, roi))
}
