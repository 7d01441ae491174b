//! Deployable stand-ins for the protocols the controller talks to.
//!
//! Used by the test suite and by the deploy script on networks without a
//! lending pool or router of their own.

/// Lending pool with admin-set rates
pub mod lending_pool;
/// Fixed-price router
pub mod swap_router;
/// CEP-18 token
pub mod token;

pub use lending_pool::MockLendingPool;
pub use swap_router::MockSwapRouter;
pub use token::MockStableToken;

use odra::prelude::*;

/// Revert codes shared by the mocks
#[odra::odra_error]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockError {
    /// Admin-only call from another account
    Unauthorized = 100,
    /// Token balance too low
    InsufficientBalance = 101,
    /// Token allowance too low
    InsufficientAllowance = 102,
    /// Zero supply amount
    ZeroAmount = 103,

    // Lending pool
    /// Asset has no reserve
    ReserveNotFound = 110,
    /// Supplies are paused
    PoolPaused = 111,

    // Router
    /// Attached value differs from `amount_in`
    ValueMismatch = 120,
    /// Route other than wrapped CSPR -> stablecoin
    UnsupportedPair = 121,
    /// Fee outside `FEE_TIERS`
    UnsupportedFeeTier = 122,
    /// Block time past the deadline
    DeadlineExpired = 123,
    /// Output below `amount_out_minimum`
    SlippageExceeded = 124,
    /// Input does not fit 128 bits
    AmountTooLarge = 125,
}
