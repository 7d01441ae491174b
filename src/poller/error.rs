//! Poller error type.

use odra::prelude::OdraError;
use thiserror::Error;

/// Off-chain failures. None of them stop the daemon; the next poll retries.
#[derive(Debug, Error)]
pub enum PollerError {
    /// An environment variable is malformed or out of range
    #[error("invalid {var}: {reason}")]
    Config {
        /// Variable name
        var: &'static str,
        /// What is wrong with the value
        reason: String,
    },

    /// A contract call or query was rejected
    #[error("{operation} failed: {error:?}")]
    Call {
        /// Entry point that failed
        operation: &'static str,
        /// Revert or client error reported by Odra
        error: OdraError,
    },

    /// The node client panicked while talking to the network
    #[error("{operation} aborted: {message}")]
    Node {
        /// Interaction that was running
        operation: &'static str,
        /// Panic message
        message: String,
    },

    /// Amount arithmetic overflowed
    #[error("math error: {0}")]
    Math(&'static str),

    /// The log file cannot be opened
    #[error("cannot open log file: {0}")]
    Logging(#[source] std::io::Error),
}

impl PollerError {
    /// Adapter for `map_err` on host calls
    pub fn call(operation: &'static str) -> impl FnOnce(OdraError) -> Self {
        move |error| PollerError::Call { operation, error }
    }
}
