//! Environment-driven settings for the daemon and the deploy script.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use odra::casper_types::U512;
use odra::prelude::Address;

use super::error::PollerError;
use crate::math::common::{BPS_SCALE, MOTES_PER_CSPR};

/// Seconds between polls
pub const POLL_INTERVAL: &str = "POLL_INTERVAL";
/// Motes paid for each execute deploy
pub const MAX_GAS_PAYMENT: &str = "MAX_GAS_PAYMENT";
/// Motes the signing account keeps untouched
pub const MIN_RESERVE_BALANCE: &str = "MIN_RESERVE_BALANCE";
/// Accepted shortfall against the quote, basis points
pub const SLIPPAGE_TOLERANCE_BPS: &str = "SLIPPAGE_TOLERANCE_BPS";
/// Display decimals of the stablecoin
pub const STABLE_DECIMALS: &str = "STABLE_DECIMALS";
/// Append-only log file path
pub const LOG_FILE: &str = "FARMBOT_LOG_FILE";

/// Deploy target addresses; all four or none
pub const LENDING_POOL: &str = "FARMBOT_LENDING_POOL";
#[allow(missing_docs)]
pub const SWAP_ROUTER: &str = "FARMBOT_SWAP_ROUTER";
#[allow(missing_docs)]
pub const STABLE_TOKEN: &str = "FARMBOT_STABLE_TOKEN";
#[allow(missing_docs)]
pub const WRAPPED_NATIVE: &str = "FARMBOT_WRAPPED_NATIVE";
/// Default swap amount of a new controller, motes
pub const SWAP_AMOUNT: &str = "FARMBOT_SWAP_AMOUNT";
/// APR threshold of a new controller, basis points
pub const APR_THRESHOLD_BPS: &str = "FARMBOT_APR_THRESHOLD_BPS";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_MAX_GAS_PAYMENT: u64 = 50 * MOTES_PER_CSPR;
const DEFAULT_MIN_RESERVE_BALANCE: u64 = 10 * MOTES_PER_CSPR;
const DEFAULT_SLIPPAGE_TOLERANCE_BPS: u64 = 500;
const DEFAULT_STABLE_DECIMALS: usize = 6;
const DEFAULT_LOG_FILE: &str = "farmbot.log";
const DEFAULT_SWAP_AMOUNT: u64 = 5 * MOTES_PER_CSPR;
const DEFAULT_APR_THRESHOLD_BPS: u64 = 500;

/// Settings of the polling daemon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Sleep between iterations
    pub poll_interval: Duration,
    /// Payment (motes) attached to each execute deploy; never exceeded
    pub max_gas_payment: u64,
    /// Motes the signing account always keeps for future gas
    pub min_reserve_balance: U512,
    /// Accepted shortfall against the quote, basis points
    pub slippage_tolerance_bps: u64,
    /// Decimals used to display stablecoin amounts
    pub stable_decimals: usize,
    /// Log file, appended to
    pub log_file: PathBuf,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_gas_payment: DEFAULT_MAX_GAS_PAYMENT,
            min_reserve_balance: U512::from(DEFAULT_MIN_RESERVE_BALANCE),
            slippage_tolerance_bps: DEFAULT_SLIPPAGE_TOLERANCE_BPS,
            stable_decimals: DEFAULT_STABLE_DECIMALS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl PollerConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self, PollerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PollerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let poll_interval_secs = parse_var(&lookup, POLL_INTERVAL, DEFAULT_POLL_INTERVAL_SECS)?;
        let min_reserve: u128 =
            parse_var(&lookup, MIN_RESERVE_BALANCE, u128::from(DEFAULT_MIN_RESERVE_BALANCE))?;
        let slippage_tolerance_bps =
            parse_var(&lookup, SLIPPAGE_TOLERANCE_BPS, DEFAULT_SLIPPAGE_TOLERANCE_BPS)?;
        if slippage_tolerance_bps > BPS_SCALE {
            return Err(PollerError::Config {
                var: SLIPPAGE_TOLERANCE_BPS,
                reason: format!("{} exceeds {} basis points", slippage_tolerance_bps, BPS_SCALE),
            });
        }

        Ok(Self {
            poll_interval: Duration::from_secs(poll_interval_secs),
            max_gas_payment: parse_var(&lookup, MAX_GAS_PAYMENT, DEFAULT_MAX_GAS_PAYMENT)?,
            min_reserve_balance: U512::from(min_reserve),
            slippage_tolerance_bps,
            stable_decimals: parse_var(&lookup, STABLE_DECIMALS, DEFAULT_STABLE_DECIMALS)?,
            log_file: lookup(LOG_FILE).map(PathBuf::from).unwrap_or(defaults.log_file),
        })
    }
}

/// Protocol addresses for a deployment against live contracts
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ProtocolTargets {
    pub lending_pool: Address,
    pub swap_router: Address,
    pub stable_token: Address,
    pub wrapped_native: Address,
}

/// Parameters of the deploy script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// `None` deploys the mock protocol stack instead
    pub targets: Option<ProtocolTargets>,
    /// Default swap amount, motes
    pub swap_amount: U512,
    /// APR threshold, basis points
    pub apr_threshold_bps: u64,
}

impl DeployConfig {
    /// Read from the process environment
    pub fn from_env() -> Result<Self, PollerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. The protocol addresses must be set
    /// together; with none of them the mock stack is deployed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PollerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let swap_amount: u128 = parse_var(&lookup, SWAP_AMOUNT, u128::from(DEFAULT_SWAP_AMOUNT))?;
        let apr_threshold_bps = parse_var(&lookup, APR_THRESHOLD_BPS, DEFAULT_APR_THRESHOLD_BPS)?;
        if swap_amount == 0 {
            return Err(zero_value(SWAP_AMOUNT));
        }
        if apr_threshold_bps == 0 {
            return Err(zero_value(APR_THRESHOLD_BPS));
        }

        let vars = [LENDING_POOL, SWAP_ROUTER, STABLE_TOKEN, WRAPPED_NATIVE];
        let mut parsed = Vec::with_capacity(vars.len());
        for var in vars {
            if let Some(raw) = lookup(var) {
                parsed.push(parse_address(var, &raw)?);
            }
        }
        let targets = match parsed[..] {
            [] => None,
            [lending_pool, swap_router, stable_token, wrapped_native] => Some(ProtocolTargets {
                lending_pool,
                swap_router,
                stable_token,
                wrapped_native,
            }),
            _ => {
                let missing = vars
                    .into_iter()
                    .filter(|var| lookup(var).is_none())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(PollerError::Config {
                    var: LENDING_POOL,
                    reason: format!("protocol addresses are partially set, missing {}", missing),
                });
            }
        };

        Ok(Self {
            targets,
            swap_amount: U512::from(swap_amount),
            apr_threshold_bps,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, PollerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| PollerError::Config {
            var,
            reason: format!("{:?}: {}", raw, e),
        }),
    }
}

fn parse_address(var: &'static str, raw: &str) -> Result<Address, PollerError> {
    Address::from_str(raw.trim()).map_err(|e| PollerError::Config {
        var,
        reason: format!("{:?} is not a Casper address: {:?}", raw, e),
    })
}

fn zero_value(var: &'static str) -> PollerError {
    PollerError::Config {
        var,
        reason: "must be greater than zero".to_string(),
    }
}
