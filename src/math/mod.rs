//! Fixed-point helpers for rates and token amounts.

pub mod amount;
pub mod common;
pub mod rate;

pub use amount::{format_units, min_amount_out};
pub use rate::Rate;
