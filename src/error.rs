//! Controller revert codes.

use odra::prelude::*;
use core::fmt;

/// Reasons the funds controller reverts a call
#[odra::odra_error]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FarmError {
    /// Caller is not the owner
    NotOwner = 1,
    /// Supply APR is below the threshold
    ThresholdNotMet = 2,
    /// Attached value does not cover the swap
    InsufficientFunds = 3,
    /// Zero swap amount or threshold
    InvalidConfig = 4,
    /// Zero address as new owner
    NullAddress = 5,
    /// Amount outside the motes range
    InvalidAmount = 6,
    /// Withdrawal above the held balance
    InsufficientBalance = 7,
    /// Storage read before `init`
    NotInitialized = 8,
}

impl FarmError {
    /// Human readable reason
    pub fn message(&self) -> &str {
        match self {
            FarmError::NotOwner => "Caller is not the owner",
            FarmError::ThresholdNotMet => "APR threshold not met",
            FarmError::InsufficientFunds => "Attached value is below the swap amount",
            FarmError::InvalidConfig => "Swap amount and threshold must be non-zero",
            FarmError::NullAddress => "New owner is the null address",
            FarmError::InvalidAmount => "Amount does not fit the native asset range",
            FarmError::InsufficientBalance => "Withdrawal exceeds the held balance",
            FarmError::NotInitialized => "Contract is not initialized",
        }
    }
}

impl core::fmt::Display for FarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
