#![allow(clippy::arithmetic_side_effects)]
#![deny(missing_docs)]
#![cfg_attr(target_arch = "wasm32", no_std)]

//! APR-triggered CSPR -> stablecoin farming controller for Casper.

pub mod error;
pub mod external;
pub mod farm_bot;
pub mod math;
pub mod mocks;
#[cfg(not(target_arch = "wasm32"))]
pub mod poller;
#[cfg(test)]
mod test_support;

pub use farm_bot::FarmBot;

extern crate alloc;
