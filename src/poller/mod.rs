//! Off-chain daemon that watches the supply rate and triggers the controller.
//!
//! Every iteration reads the controller's threshold check, makes sure the
//! signing account can afford the swap plus gas without dipping below its
//! reserve, derives a slippage floor from a live quote and then calls
//! `execute_if_profitable`. Failures are logged and retried on the next poll.

pub mod config;
pub mod error;
pub mod logging;

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use log::{error, info, warn};
use odra::casper_types::{U256, U512};
use odra::host::{HostEnv, HostRef};
use odra::prelude::Addressable;
use serde::Serialize;

use crate::farm_bot::{FarmBotHostRef, FarmStatus};
use crate::math::common::MOTES_DECIMALS;
use crate::math::{format_units, min_amount_out, Rate};

pub use config::{DeployConfig, PollerConfig, ProtocolTargets};
pub use error::PollerError;
pub use logging::init_logging;

/// Basis points are rendered as percentages with two decimals
const PERCENT_DECIMALS: usize = 2;

/// Why an iteration ended without a swap
#[derive(Debug)]
pub enum SkipReason {
    /// Supply APR is below the controller's threshold
    ThresholdNotMet,
    /// Swap amount, reserve and gas payment exceed the account balance (motes)
    InsufficientBalance {
        /// Account balance
        available: U512,
        /// Swap amount + reserve + gas payment
        required: U512,
    },
}

/// Result of one poll
#[derive(Debug)]
pub enum IterationOutcome {
    /// `execute_if_profitable` went through
    Executed {
        /// Motes attached to the swap
        native_spent: U512,
        /// Slippage floor passed to the controller
        min_out: U256,
    },
    /// Nothing to do this round
    Skipped(SkipReason),
    /// A read or the submission failed; retried on the next poll
    Failed(PollerError),
}

/// Snapshot printed by the `status` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Supply APR in basis points
    pub current_apr_bps: String,
    /// Supply APR in percent, two decimals
    pub current_apr_percentage: String,
    /// Whether the threshold is met
    pub should_execute: bool,
    /// CSPR held by the controller
    pub contract_native_balance: String,
    /// Stablecoin held by the controller
    pub contract_stable_balance: String,
    /// CSPR held by the signing account
    pub account_native_balance: String,
}

impl StatusReport {
    fn new(status: &FarmStatus, account_balance: U512, stable_decimals: usize) -> Self {
        Self {
            current_apr_bps: status.current_rate_bps.to_string(),
            current_apr_percentage: format_units(status.current_rate_bps, PERCENT_DECIMALS),
            should_execute: status.should_execute,
            contract_native_balance: format_units(status.native_balance, MOTES_DECIMALS),
            contract_stable_balance: format_units(status.stable_balance, stable_decimals),
            account_native_balance: format_units(account_balance, MOTES_DECIMALS),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Drives a deployed controller from the signing account of `env`
pub struct Poller {
    env: HostEnv,
    farm: FarmBotHostRef,
    config: PollerConfig,
}

impl Poller {
    /// Poller for `farm`, signing with the caller of `env`
    pub fn new(env: HostEnv, farm: FarmBotHostRef, config: PollerConfig) -> Self {
        Self { env, farm, config }
    }

    /// Read-only snapshot of the controller and the signing account
    pub fn status(&self) -> Result<StatusReport, PollerError> {
        let (status, account_balance) = self.snapshot()?;
        Ok(StatusReport::new(&status, account_balance, self.config.stable_decimals))
    }

    /// One poll: check, then swap and deposit when worthwhile.
    pub fn run_once(&mut self) -> IterationOutcome {
        let outcome = match guard("poll", || self.check_and_execute()) {
            Ok(outcome) => outcome,
            Err(err) => IterationOutcome::Failed(err),
        };

        match &outcome {
            IterationOutcome::Executed { native_spent, min_out } => info!(
                "swap executed: {} CSPR in, at least {} stable out",
                format_units(*native_spent, MOTES_DECIMALS),
                format_units(*min_out, self.config.stable_decimals)
            ),
            IterationOutcome::Skipped(SkipReason::ThresholdNotMet) => {
                info!("APR below threshold, waiting")
            }
            IterationOutcome::Skipped(SkipReason::InsufficientBalance { available, required }) => {
                warn!(
                    "insufficient balance: have {} CSPR, need {} CSPR",
                    format_units(*available, MOTES_DECIMALS),
                    format_units(*required, MOTES_DECIMALS)
                )
            }
            IterationOutcome::Failed(err) => error!("poll failed: {}", err),
        }
        outcome
    }

    /// Poll until `max_iterations` is reached, forever when `None`.
    ///
    /// Returns the number of completed iterations.
    pub fn run(&mut self, max_iterations: Option<u64>) -> u64 {
        info!(
            "starting FarmBot poller for {:?}, interval {}s",
            self.farm.address(),
            self.config.poll_interval.as_secs()
        );

        let mut completed = 0u64;
        while max_iterations.map_or(true, |max| completed < max) {
            if completed > 0 {
                info!("sleeping {}s", self.config.poll_interval.as_secs());
                thread::sleep(self.config.poll_interval);
            }
            self.run_once();
            completed += 1;
        }
        completed
    }

    fn check_and_execute(&mut self) -> Result<IterationOutcome, PollerError> {
        let (status, account_balance) = self.snapshot()?;
        let report = StatusReport::new(&status, account_balance, self.config.stable_decimals);
        info!(
            "current APR: {} ({} bps), threshold met: {}",
            Rate::from_basis_points(status.current_rate_bps),
            report.current_apr_bps,
            report.should_execute
        );
        info!(
            "account holds {} CSPR, controller holds {} CSPR and {} stable",
            report.account_native_balance,
            report.contract_native_balance,
            report.contract_stable_balance
        );
        if !report.should_execute {
            return Ok(IterationOutcome::Skipped(SkipReason::ThresholdNotMet));
        }

        // the rate may move between the status read and the deploy
        let should_execute =
            self.farm.try_should_execute().map_err(PollerError::call("should_execute"))?;
        if !should_execute {
            return Ok(IterationOutcome::Skipped(SkipReason::ThresholdNotMet));
        }

        let amount = self
            .farm
            .try_get_default_swap_amount()
            .map_err(PollerError::call("get_default_swap_amount"))?;
        let required = amount
            .checked_add(self.config.min_reserve_balance)
            .and_then(|sum| sum.checked_add(U512::from(self.config.max_gas_payment)))
            .ok_or(PollerError::Math("required balance overflow"))?;
        let available = self.account_balance()?;
        if available < required {
            return Ok(IterationOutcome::Skipped(SkipReason::InsufficientBalance {
                available,
                required,
            }));
        }

        let quote = self
            .farm
            .try_quote_swap(amount)
            .map_err(PollerError::call("quote_swap"))?;
        let min_out = min_amount_out(quote, self.config.slippage_tolerance_bps)
            .ok_or(PollerError::Math("slippage floor out of range"))?;

        info!(
            "executing swap of {} CSPR",
            format_units(amount, MOTES_DECIMALS)
        );
        self.env.set_gas(self.config.max_gas_payment);
        self.farm
            .with_tokens(amount)
            .try_execute_if_profitable(amount, min_out)
            .map_err(PollerError::call("execute_if_profitable"))?;

        Ok(IterationOutcome::Executed {
            native_spent: amount,
            min_out,
        })
    }

    fn snapshot(&self) -> Result<(FarmStatus, U512), PollerError> {
        let status = self.farm.try_get_status().map_err(PollerError::call("get_status"))?;
        Ok((status, self.account_balance()?))
    }

    fn account_balance(&self) -> Result<U512, PollerError> {
        guard("balance_of", || Ok(self.env.balance_of(&self.env.caller())))
    }
}

/// Run a node interaction, turning a panic inside the client into an error.
///
/// Host reads such as `balance_of` have no error channel and panic when the
/// node request fails.
fn guard<T, F>(operation: &'static str, f: F) -> Result<T, PollerError>
where
    F: FnOnce() -> Result<T, PollerError>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(PollerError::Node { operation, message })
    })
}
