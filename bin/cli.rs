//! FarmBot command line: deployment, the polling daemon and a status report.

use std::process;

use farmbot::farm_bot::{FarmBot, FarmBotInitArgs};
use farmbot::math::common::MOTES_PER_CSPR;
use farmbot::math::Rate;
use farmbot::mocks::swap_router::MockSwapRouterInitArgs;
use farmbot::mocks::token::MockStableTokenInitArgs;
use farmbot::mocks::{MockLendingPool, MockStableToken, MockSwapRouter};
use farmbot::poller::{init_logging, DeployConfig, Poller, PollerConfig, ProtocolTargets};
use log::{error, info};
use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv, NoArgs};
use odra::prelude::Addressable;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt, OdraCli,
};

const FARM_DEPLOY_GAS: u64 = 300 * MOTES_PER_CSPR;
const MOCK_DEPLOY_GAS: u64 = 200 * MOTES_PER_CSPR;
const SETUP_CALL_GAS: u64 = 10 * MOTES_PER_CSPR;

/// Mock protocol parameters: 5.23% supply APR, 0.02 USDC per CSPR
const MOCK_RATE_BPS: u64 = 523;
const MOCK_PRICE: u64 = 20_000;
const MOCK_ROUTER_LIQUIDITY: u64 = 1_000_000_000_000;

/// Deploys the controller, standing up mock protocols when no addresses are configured.
/// A partial address set is rejected before the CLI starts.
pub struct FarmBotDeployScript {
    config: DeployConfig,
}

impl DeployScript for FarmBotDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        let targets = match &self.config.targets {
            Some(targets) => targets.clone(),
            None => {
                info!("no protocol addresses configured, deploying mocks");
                deploy_mocks(env)
            }
        };

        let farm = FarmBot::load_or_deploy(
            env,
            FarmBotInitArgs {
                lending_pool: targets.lending_pool,
                swap_router: targets.swap_router,
                stable_token: targets.stable_token,
                wrapped_native: targets.wrapped_native,
                default_swap_amount: self.config.swap_amount,
                apr_threshold_bps: self.config.apr_threshold_bps,
            },
            container,
            FARM_DEPLOY_GAS
        )?;

        info!("FarmBot deployed at {:?}", farm.address());
        Ok(())
    }
}

fn deploy_mocks(env: &HostEnv) -> ProtocolTargets {
    env.set_gas(MOCK_DEPLOY_GAS);
    let mut stable = MockStableToken::deploy(
        env,
        MockStableTokenInitArgs {
            name: "USD Coin".to_string(),
            symbol: "USDC".to_string(),
            decimals: 6,
            initial_supply: U256::from(MOCK_ROUTER_LIQUIDITY),
        }
    );
    env.set_gas(MOCK_DEPLOY_GAS);
    let wrapped = MockStableToken::deploy(
        env,
        MockStableTokenInitArgs {
            name: "Wrapped CSPR".to_string(),
            symbol: "WCSPR".to_string(),
            decimals: 9,
            initial_supply: U256::zero(),
        }
    );
    env.set_gas(MOCK_DEPLOY_GAS);
    let mut pool = MockLendingPool::deploy(env, NoArgs);
    env.set_gas(MOCK_DEPLOY_GAS);
    let router = MockSwapRouter::deploy(
        env,
        MockSwapRouterInitArgs {
            wrapped_native: wrapped.address(),
            stable_token: stable.address(),
            price: U256::from(MOCK_PRICE),
        }
    );

    env.set_gas(SETUP_CALL_GAS);
    pool.set_reserve(stable.address(), Rate::from_basis_points(MOCK_RATE_BPS).to_ray());
    env.set_gas(SETUP_CALL_GAS);
    stable.transfer(&router.address(), &U256::from(MOCK_ROUTER_LIQUIDITY));

    info!("mock stablecoin: {:?}", stable.address());
    info!("mock wrapped CSPR: {:?}", wrapped.address());
    info!("mock lending pool: {:?}", pool.address());
    info!("mock swap router: {:?}", router.address());

    ProtocolTargets {
        lending_pool: pool.address(),
        swap_router: router.address(),
        stable_token: stable.address(),
        wrapped_native: wrapped.address(),
    }
}

fn poller(
    env: &HostEnv,
    container: &DeployedContractsContainer,
    config: &PollerConfig
) -> Result<Poller, Error> {
    let farm = container.contract_ref::<FarmBot>(env)?;
    Ok(Poller::new(env.clone(), farm, config.clone()))
}

/// Runs the daemon until interrupted
pub struct PollScenario {
    config: PollerConfig,
}

impl Scenario for PollScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        poller(env, container, &self.config)?.run(None);
        Ok(())
    }
}

impl ScenarioMetadata for PollScenario {
    const NAME: &'static str = "poll";
    const DESCRIPTION: &'static str = "Polls the supply APR and swaps when the threshold is met";
}

/// Single iteration, for cron-style scheduling
pub struct PollOnceScenario {
    config: PollerConfig,
}

impl Scenario for PollOnceScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        poller(env, container, &self.config)?.run(Some(1));
        Ok(())
    }
}

impl ScenarioMetadata for PollOnceScenario {
    const NAME: &'static str = "poll-once";
    const DESCRIPTION: &'static str = "Runs a single poll iteration and exits";
}

/// Prints the controller status as JSON
pub struct StatusScenario {
    config: PollerConfig,
}

impl Scenario for StatusScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        _args: Args
    ) -> Result<(), Error> {
        let report = poller(env, container, &self.config)?.status();
        match report.map(|report| report.to_json()) {
            Ok(Ok(json)) => println!("{}", json),
            Ok(Err(err)) => error!("cannot encode status: {}", err),
            Err(err) => error!("cannot read status: {}", err),
        }
        Ok(())
    }
}

impl ScenarioMetadata for StatusScenario {
    const NAME: &'static str = "status";
    const DESCRIPTION: &'static str = "Prints the current APR, decision and balances";
}

pub fn main() {
    let poller_config = match PollerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    if let Err(err) = init_logging(&poller_config.log_file) {
        eprintln!("{}", err);
        process::exit(1);
    }
    let deploy_config = match DeployConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    OdraCli::new()
        .about(
            "APR-triggered CSPR to stablecoin farming bot.\n\
             Polling: `scenario poll` runs continuously (the normal daemon mode), \
             `scenario poll-once` runs a single iteration, \
             `scenario status` prints a JSON report."
        )
        .deploy(FarmBotDeployScript { config: deploy_config })
        .contract::<FarmBot>()
        .scenario(PollScenario { config: poller_config.clone() })
        .scenario(PollOnceScenario { config: poller_config.clone() })
        .scenario(StatusScenario { config: poller_config })
        .build()
        .run();
}
