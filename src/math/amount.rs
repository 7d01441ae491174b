//! Token amount helpers shared by the controller and the poller.

use {
    crate::math::common::BPS_SCALE,
    odra::casper_types::U256,
    core::fmt,
    alloc::{
        format,
        string::{String, ToString},
    },
};

/// Render an integer amount with `decimals` fractional digits.
///
/// `format_units(5_000_000_000u64, 9)` gives `"5.000000000"`.
pub fn format_units<T: fmt::Display>(value: T, decimals: usize) -> String {
    let mut digits = value.to_string();
    if decimals == 0 {
        return digits;
    }
    if digits.len() <= decimals {
        let padding = "0".repeat(decimals - digits.len());
        digits = format!("0.{}{}", padding, digits);
    } else {
        digits.insert(digits.len() - decimals, '.');
    }
    digits
}

/// Lowest acceptable swap output for `quote` under `slippage_bps` tolerance.
///
/// Returns `None` when the tolerance exceeds 100% or the product overflows.
pub fn min_amount_out(quote: U256, slippage_bps: u64) -> Option<U256> {
    let kept_bps = BPS_SCALE.checked_sub(slippage_bps)?;
    quote
        .checked_mul(U256::from(kept_bps))?
        .checked_div(U256::from(BPS_SCALE))
}
