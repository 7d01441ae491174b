//! Shared deployment fixture for contract and poller tests.

use odra::casper_types::{U256, U512};
use odra::host::{Deployer, HostEnv, NoArgs};
use odra::prelude::*;

use crate::farm_bot::{FarmBot, FarmBotHostRef, FarmBotInitArgs};
use crate::math::{common::MOTES_PER_CSPR, Rate};
use crate::mocks::lending_pool::MockLendingPoolHostRef;
use crate::mocks::swap_router::{MockSwapRouterHostRef, MockSwapRouterInitArgs};
use crate::mocks::token::{MockStableTokenHostRef, MockStableTokenInitArgs};
use crate::mocks::{MockLendingPool, MockStableToken, MockSwapRouter};

/// Default swap amount of the deployed controller, in CSPR
pub(crate) const SWAP_CSPR: u64 = 5;
pub(crate) const THRESHOLD_BPS: u64 = 500;
/// Router price: 2 stablecoins (6 decimals) per CSPR
pub(crate) const STABLE_PER_CSPR: u64 = 2_000_000;
/// Stablecoin liquidity handed to the router
pub(crate) const ROUTER_LIQUIDITY: u64 = 1_000_000_000_000;

pub(crate) struct Fixture {
    pub env: HostEnv,
    pub owner: Address,
    pub stranger: Address,
    pub stable: MockStableTokenHostRef,
    pub wrapped: MockStableTokenHostRef,
    pub pool: MockLendingPoolHostRef,
    pub router: MockSwapRouterHostRef,
    pub farm: FarmBotHostRef,
}

pub(crate) fn cspr(amount: u64) -> U512 {
    U512::from(amount) * U512::from(MOTES_PER_CSPR)
}

/// Router output for `amount` whole CSPR
pub(crate) fn stable_for(amount: u64) -> U256 {
    U256::from(amount) * U256::from(STABLE_PER_CSPR)
}

/// Deploy tokens, pool, router and controller with the stablecoin reserve
/// paying `rate_bps`. The owner (account 0) is left as the caller.
pub(crate) fn setup(rate_bps: u64) -> Fixture {
    let env = odra_test::env();
    let owner = env.get_account(0);
    let stranger = env.get_account(1);
    env.set_caller(owner);

    let mut stable = MockStableToken::deploy(
        &env,
        MockStableTokenInitArgs {
            name: "USD Coin".to_string(),
            symbol: "USDC".to_string(),
            decimals: 6,
            initial_supply: U256::from(ROUTER_LIQUIDITY) * U256::from(2u64),
        }
    );
    let wrapped = MockStableToken::deploy(
        &env,
        MockStableTokenInitArgs {
            name: "Wrapped CSPR".to_string(),
            symbol: "WCSPR".to_string(),
            decimals: 9,
            initial_supply: U256::zero(),
        }
    );

    let mut pool = MockLendingPool::deploy(&env, NoArgs);
    pool.set_reserve(stable.address(), Rate::from_basis_points(rate_bps).to_ray());

    let router = MockSwapRouter::deploy(
        &env,
        MockSwapRouterInitArgs {
            wrapped_native: wrapped.address(),
            stable_token: stable.address(),
            price: U256::from(STABLE_PER_CSPR),
        }
    );
    stable.transfer(&router.address(), &U256::from(ROUTER_LIQUIDITY));

    let farm = FarmBot::deploy(
        &env,
        FarmBotInitArgs {
            lending_pool: pool.address(),
            swap_router: router.address(),
            stable_token: stable.address(),
            wrapped_native: wrapped.address(),
            default_swap_amount: cspr(SWAP_CSPR),
            apr_threshold_bps: THRESHOLD_BPS,
        }
    );

    Fixture {
        env,
        owner,
        stranger,
        stable,
        wrapped,
        pool,
        router,
        farm,
    }
}

impl Fixture {
    pub fn set_rate_bps(&mut self, rate_bps: u64) {
        let caller = self.env.caller();
        self.env.set_caller(self.owner);
        self.pool
            .set_reserve(self.stable.address(), Rate::from_basis_points(rate_bps).to_ray());
        self.env.set_caller(caller);
    }

    /// Stablecoin the pool holds on behalf of the controller
    pub fn supplied(&self) -> U256 {
        self.pool
            .supplied_balance(self.stable.address(), self.farm.address())
    }
}
