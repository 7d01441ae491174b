//! Shared scalers for rate and amount math.
//!
//! Lending pools report rates as rays (27 fractional decimal digits); the
//! controller compares them against thresholds expressed in basis points.

/// Fractional digits of a ray
pub const RAY_DECIMALS: usize = 27;
/// Identity in ray precision
pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
/// One basis point in ray precision (10^27 / 10^4)
pub const RAY_PER_BASIS_POINT: u128 = 100_000_000_000_000_000_000_000;
/// Basis points in 100%
pub const BPS_SCALE: u64 = 10_000;
/// Basis points in 1%
pub const BPS_PER_PERCENT: u64 = 100;
/// Fractional digits of CSPR
pub const MOTES_DECIMALS: usize = 9;
/// 1 CSPR = 1e9 motes
pub const MOTES_PER_CSPR: u64 = 1_000_000_000;
