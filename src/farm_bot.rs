//! Funds controller.
//!
//! Holds CSPR on behalf of its owner. When the stablecoin's supply APR on the
//! lending pool reaches the configured threshold, the owner can swap a fixed
//! amount of CSPR into the stablecoin and supply the proceeds to the pool in a
//! single deploy. Casper reverts the whole deploy on any failure, so the swap
//! and the deposit either both happen or neither does.

use odra::prelude::*;
use odra::casper_types::{account::AccountHash, U256, U512};
use odra::ContractRef;

use crate::error::FarmError;
use crate::external::{
    Cep18TokenContractRef, ExactInputSingleParams, LendingPoolContractRef,
    SwapRouterContractRef,
};
use crate::math::Rate;

/// Router fee tier used for every swap (0.3%)
pub const SWAP_FEE_TIER: u32 = 3000;
/// Swap deadline relative to the current block time (5 minutes)
pub const SWAP_DEADLINE_MS: u64 = 300_000;

// ==========================================
// Events
// ==========================================

/// Events emitted by [`FarmBot`](super::FarmBot)
pub mod events {
    use odra::prelude::*;
    use odra::casper_types::{U256, U512};

    /// CSPR was swapped and the proceeds supplied to the pool
    #[odra::event]
    pub struct SwapExecuted {
        /// Owner that triggered the swap
        pub caller: Address,
        /// Motes swapped
        pub native_spent: U512,
        /// Stablecoin supplied on behalf of the controller
        pub stable_deposited: U256,
        /// Supply APR at execution, basis points
        pub rate_bps: U256,
        /// Threshold check was skipped
        pub forced: bool,
    }

    /// Swap amount and threshold changed
    #[odra::event]
    pub struct ConfigUpdated {
        /// Previous default swap amount, motes
        pub old_swap_amount: U512,
        /// New default swap amount, motes
        pub new_swap_amount: U512,
        /// Previous threshold, basis points
        pub old_threshold_bps: u64,
        /// New threshold, basis points
        pub new_threshold_bps: u64,
    }

    /// Owner changed
    #[odra::event]
    pub struct OwnershipTransferred {
        /// Owner before the transfer
        pub previous_owner: Address,
        /// Owner after the transfer
        pub new_owner: Address,
    }

    /// CSPR withdrawn to the owner
    #[odra::event]
    pub struct NativeWithdrawn {
        /// Receiving owner
        pub recipient: Address,
        /// Motes sent
        pub amount: U512,
    }

    /// CEP-18 tokens withdrawn to the owner
    #[odra::event]
    pub struct TokenWithdrawn {
        /// Token contract
        pub token: Address,
        /// Receiving owner
        pub recipient: Address,
        /// Token units sent
        pub amount: U256,
    }
}

use events::*;

// ==========================================
// Types
// ==========================================

/// Aggregate read used by the poller
#[odra::odra_type]
pub struct FarmStatus {
    /// Supply APR, basis points
    pub current_rate_bps: U256,
    /// Whether the threshold is met
    pub should_execute: bool,
    /// Motes held by the controller
    pub native_balance: U512,
    /// Stablecoin held by the controller
    pub stable_balance: U256,
}

/// Collaborators fixed at construction
#[odra::odra_type]
pub struct ProtocolAddresses {
    /// Pool the stablecoin is supplied to
    pub lending_pool: Address,
    /// Router swapping CSPR for the stablecoin
    pub swap_router: Address,
    /// Stablecoin CEP-18 contract
    pub stable_token: Address,
    /// Wrapped CSPR used as the swap input token
    pub wrapped_native: Address,
}

/// Address used as "no address" for ownership checks
pub fn null_address() -> Address {
    Address::Account(AccountHash::new([0u8; 32]))
}

/// True for an account or contract address with an all-zero hash
pub fn is_null_address(address: &Address) -> bool {
    let hash = match address {
        Address::Account(hash) => hash.value(),
        Address::Contract(hash) => hash.value(),
    };
    hash == [0u8; 32]
}

// ==========================================
// Contract
// ==========================================

#[odra::module(
    events = [
        SwapExecuted,
        ConfigUpdated,
        OwnershipTransferred,
        NativeWithdrawn,
        TokenWithdrawn
    ],
    errors = FarmError
)]
/// Owner-operated controller holding CSPR and farming the stablecoin reserve
pub struct FarmBot {
    owner: Var<Address>,

    // Mutable configuration
    default_swap_amount: Var<U512>, // motes
    apr_threshold_bps: Var<u64>,

    // Collaborators
    lending_pool: Var<Address>,
    swap_router: Var<Address>,
    stable_token: Var<Address>,
    wrapped_native: Var<Address>,
}

#[odra::module]
impl FarmBot {
    /// Store the collaborators and the initial configuration; the deployer
    /// becomes the owner. Zero swap amount or threshold is rejected.
    pub fn init(
        &mut self,
        lending_pool: Address,
        swap_router: Address,
        stable_token: Address,
        wrapped_native: Address,
        default_swap_amount: U512,
        apr_threshold_bps: u64
    ) {
        if default_swap_amount.is_zero() || apr_threshold_bps == 0 {
            self.env().revert(FarmError::InvalidConfig);
        }

        self.owner.set(self.env().caller());
        self.default_swap_amount.set(default_swap_amount);
        self.apr_threshold_bps.set(apr_threshold_bps);
        self.lending_pool.set(lending_pool);
        self.swap_router.set(swap_router);
        self.stable_token.set(stable_token);
        self.wrapped_native.set(wrapped_native);
    }

    // ==========================================
    // Rate checks
    // ==========================================

    /// Live supply rate of the stablecoin reserve, ray
    pub fn get_current_rate(&self) -> U256 {
        self.current_rate().to_ray()
    }

    /// Ray to basis points, truncating
    pub fn rate_to_basis_points(&self, rate: U256) -> U256 {
        Rate::from_ray(rate).to_basis_points()
    }

    /// Supply APR is at or above the threshold
    pub fn should_execute(&self) -> bool {
        let threshold = self.apr_threshold_bps.get_or_revert_with(FarmError::NotInitialized);
        self.current_rate().meets_threshold(threshold)
    }

    // ==========================================
    // Execution
    // ==========================================

    /// Swap and deposit if the APR threshold is met.
    ///
    /// `amount` of zero means the default swap amount. The attached value must
    /// cover the swap; anything above it is returned to the caller.
    #[odra(payable)]
    pub fn execute_if_profitable(&mut self, amount: U512, min_out: U256) {
        self.assert_owner();
        if !self.should_execute() {
            self.env().revert(FarmError::ThresholdNotMet);
        }
        self.execute(amount, min_out, false);
    }

    /// Same as `execute_if_profitable` without the threshold check.
    #[odra(payable)]
    pub fn force_execute(&mut self, amount: U512, min_out: U256) {
        self.assert_owner();
        self.execute(amount, min_out, true);
    }

    /// Expected stablecoin output for swapping `amount` motes (zero = default)
    pub fn quote_swap(&self, amount: U512) -> U256 {
        let swap_amount = self.swap_amount_or_default(amount);
        let router = self.swap_router.get_or_revert_with(FarmError::NotInitialized);
        SwapRouterContractRef::new(self.env(), router).quote_exact_input_single(
            self.wrapped_native.get_or_revert_with(FarmError::NotInitialized),
            self.stable_token.get_or_revert_with(FarmError::NotInitialized),
            SWAP_FEE_TIER,
            swap_amount
        )
    }

    // ==========================================
    // Administration
    // ==========================================

    /// Replace the default swap amount and the threshold; both must be non-zero
    pub fn update_config(&mut self, amount: U512, threshold_bps: u64) {
        self.assert_owner();
        if amount.is_zero() || threshold_bps == 0 {
            self.env().revert(FarmError::InvalidConfig);
        }

        let old_swap_amount = self.default_swap_amount.get_or_default();
        let old_threshold_bps = self.apr_threshold_bps.get_or_default();
        self.default_swap_amount.set(amount);
        self.apr_threshold_bps.set(threshold_bps);

        self.env().emit_event(ConfigUpdated {
            old_swap_amount,
            new_swap_amount: amount,
            old_threshold_bps,
            new_threshold_bps: threshold_bps,
        });
    }

    /// Hand the controller to `new_owner`
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.assert_owner();
        if is_null_address(&new_owner) {
            self.env().revert(FarmError::NullAddress);
        }

        let previous_owner = self.env().caller();
        self.owner.set(new_owner);

        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    /// Send held funds to the owner.
    ///
    /// `token` of `None` withdraws CSPR, otherwise the given CEP-18 token.
    /// An `amount` of zero withdraws the whole balance.
    pub fn emergency_withdraw(&mut self, token: Option<Address>, amount: U256) {
        self.assert_owner();
        let recipient = self.env().caller();

        match token {
            None => {
                let balance = self.env().self_balance();
                let requested = if amount.is_zero() {
                    balance
                } else {
                    self.to_motes(amount)
                };
                if requested > balance {
                    self.env().revert(FarmError::InsufficientBalance);
                }
                if requested.is_zero() {
                    return;
                }

                self.env().transfer_tokens(&recipient, &requested);
                self.env().emit_event(NativeWithdrawn {
                    recipient,
                    amount: requested,
                });
            }
            Some(token) => {
                let mut token_ref = Cep18TokenContractRef::new(self.env(), token);
                let balance = token_ref.balance_of(&self.env().self_address());
                let requested = if amount.is_zero() { balance } else { amount };
                if requested > balance {
                    self.env().revert(FarmError::InsufficientBalance);
                }
                if requested.is_zero() {
                    return;
                }

                token_ref.transfer(&recipient, &requested);
                self.env().emit_event(TokenWithdrawn {
                    token,
                    recipient,
                    amount: requested,
                });
            }
        }
    }

    /// Accepts plain CSPR transfers.
    #[odra(payable)]
    pub fn receive(&mut self) {}

    // ==========================================
    // Views
    // ==========================================

    /// Rate, decision and balances in one read
    pub fn get_status(&self) -> FarmStatus {
        let rate = self.current_rate();
        let threshold = self.apr_threshold_bps.get_or_revert_with(FarmError::NotInitialized);
        FarmStatus {
            current_rate_bps: rate.to_basis_points(),
            should_execute: rate.meets_threshold(threshold),
            native_balance: self.env().self_balance(),
            stable_balance: self.stable_balance(),
        }
    }

    /// Current owner
    pub fn get_owner(&self) -> Address {
        self.owner.get_or_revert_with(FarmError::NotInitialized)
    }

    /// Default swap amount, motes
    pub fn get_default_swap_amount(&self) -> U512 {
        self.default_swap_amount.get_or_revert_with(FarmError::NotInitialized)
    }

    /// APR threshold, basis points
    pub fn get_apr_threshold_bps(&self) -> u64 {
        self.apr_threshold_bps.get_or_revert_with(FarmError::NotInitialized)
    }

    /// Addresses fixed at construction
    pub fn get_protocol_addresses(&self) -> ProtocolAddresses {
        ProtocolAddresses {
            lending_pool: self.lending_pool.get_or_revert_with(FarmError::NotInitialized),
            swap_router: self.swap_router.get_or_revert_with(FarmError::NotInitialized),
            stable_token: self.stable_token.get_or_revert_with(FarmError::NotInitialized),
            wrapped_native: self.wrapped_native.get_or_revert_with(FarmError::NotInitialized),
        }
    }
}

impl FarmBot {
    fn assert_owner(&self) {
        let owner = self.owner.get_or_revert_with(FarmError::NotInitialized);
        if self.env().caller() != owner {
            self.env().revert(FarmError::NotOwner);
        }
    }

    fn current_rate(&self) -> Rate {
        let pool = self.lending_pool.get_or_revert_with(FarmError::NotInitialized);
        let stable = self.stable_token.get_or_revert_with(FarmError::NotInitialized);
        let reserve = LendingPoolContractRef::new(self.env(), pool).get_reserve_data(stable);
        Rate::from_ray(reserve.current_liquidity_rate)
    }

    fn stable_balance(&self) -> U256 {
        let stable = self.stable_token.get_or_revert_with(FarmError::NotInitialized);
        Cep18TokenContractRef::new(self.env(), stable).balance_of(&self.env().self_address())
    }

    fn swap_amount_or_default(&self, amount: U512) -> U512 {
        if amount.is_zero() {
            self.default_swap_amount.get_or_revert_with(FarmError::NotInitialized)
        } else {
            amount
        }
    }

    fn to_motes(&self, amount: U256) -> U512 {
        if amount > U256::from(u128::MAX) {
            self.env().revert(FarmError::InvalidAmount);
        }
        U512::from(amount.as_u128())
    }

    fn execute(&mut self, amount: U512, min_out: U256, forced: bool) {
        let swap_amount = self.swap_amount_or_default(amount);
        let attached = self.env().attached_value();
        if attached < swap_amount {
            self.env().revert(FarmError::InsufficientFunds);
        }

        let rate_bps = self.current_rate().to_basis_points();
        let stable_deposited = self.swap_and_deposit(swap_amount, min_out);

        let caller = self.env().caller();
        let excess = attached - swap_amount;
        if !excess.is_zero() {
            self.env().transfer_tokens(&caller, &excess);
        }

        self.env().emit_event(SwapExecuted {
            caller,
            native_spent: swap_amount,
            stable_deposited,
            rate_bps,
            forced,
        });
    }

    /// Swap `amount` motes for the stablecoin and supply all of it to the pool.
    fn swap_and_deposit(&mut self, amount: U512, min_out: U256) -> U256 {
        let env = self.env();
        let this = env.self_address();
        let pool = self.lending_pool.get_or_revert_with(FarmError::NotInitialized);
        let router = self.swap_router.get_or_revert_with(FarmError::NotInitialized);
        let stable = self.stable_token.get_or_revert_with(FarmError::NotInitialized);

        let params = ExactInputSingleParams {
            token_in: self.wrapped_native.get_or_revert_with(FarmError::NotInitialized),
            token_out: stable,
            fee: SWAP_FEE_TIER,
            recipient: this,
            deadline: env.get_block_time() + SWAP_DEADLINE_MS,
            amount_in: amount,
            amount_out_minimum: min_out,
        };
        let received = SwapRouterContractRef::new(env.clone(), router)
            .with_tokens(amount)
            .exact_input_single(params);

        Cep18TokenContractRef::new(env.clone(), stable).approve(&pool, &received);
        LendingPoolContractRef::new(env, pool).supply(stable, received, this);

        received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::common::{MOTES_PER_CSPR, RAY_PER_BASIS_POINT};
    use crate::test_support::*;
    use odra::casper_types::bytesrepr::{FromBytes, ToBytes};
    use odra::host::{Deployer, HostRef};

    #[test]
    fn converts_ray_to_basis_points() {
        let fx = setup(500);
        let five_percent = U256::from(5u64) * U256::exp10(25);
        assert_eq!(fx.farm.rate_to_basis_points(five_percent), U256::from(500u64));
        assert_eq!(
            fx.farm.rate_to_basis_points(five_percent + U256::from(RAY_PER_BASIS_POINT - 1)),
            U256::from(500u64)
        );
        assert_eq!(fx.farm.get_current_rate(), five_percent);
    }

    #[test]
    fn should_execute_compares_against_threshold() {
        let mut fx = setup(500);
        for threshold in [1u64, 250, 499, 500, 501, 10_000] {
            fx.farm.update_config(cspr(SWAP_CSPR), threshold);
            assert_eq!(fx.farm.should_execute(), 500 >= threshold, "threshold {}", threshold);
        }

        fx.farm.update_config(cspr(SWAP_CSPR), 500);
        fx.set_rate_bps(499);
        assert!(!fx.farm.should_execute());
        fx.set_rate_bps(501);
        assert!(fx.farm.should_execute());
    }

    #[test]
    fn init_rejects_zero_config() {
        let fx = setup(500);
        let addresses = fx.farm.get_protocol_addresses();
        let result = FarmBot::try_deploy(
            &fx.env,
            FarmBotInitArgs {
                lending_pool: addresses.lending_pool,
                swap_router: addresses.swap_router,
                stable_token: addresses.stable_token,
                wrapped_native: addresses.wrapped_native,
                default_swap_amount: U512::zero(),
                apr_threshold_bps: 500,
            }
        );
        assert!(result.is_err());
    }

    #[test]
    fn mutating_calls_require_owner() {
        let mut fx = setup(600);
        fx.env.set_caller(fx.stranger);
        let not_owner = Err(FarmError::NotOwner.into());

        assert_eq!(fx.farm.try_update_config(cspr(10), 300), not_owner);
        assert_eq!(fx.farm.try_transfer_ownership(fx.stranger), not_owner);
        assert_eq!(fx.farm.try_emergency_withdraw(None, U256::zero()), not_owner);
        assert_eq!(
            fx.farm.with_tokens(cspr(5)).try_execute_if_profitable(U512::zero(), U256::zero()),
            not_owner
        );
        assert_eq!(
            fx.farm.with_tokens(cspr(5)).try_force_execute(U512::zero(), U256::zero()),
            not_owner
        );
        assert_eq!(fx.farm.get_owner(), fx.owner);
    }

    #[test]
    fn execute_fails_below_threshold() {
        let mut fx = setup(499);
        let result = fx
            .farm
            .with_tokens(cspr(5))
            .try_execute_if_profitable(cspr(5), U256::zero());
        assert_eq!(result, Err(FarmError::ThresholdNotMet.into()));
        assert_eq!(fx.supplied(), U256::zero());
    }

    #[test]
    fn execute_swaps_and_supplies() {
        let mut fx = setup(500);
        let router_before = fx.env.balance_of(&fx.router.address());

        fx.farm
            .with_tokens(cspr(5))
            .execute_if_profitable(cspr(5), U256::zero());

        let expected = stable_for(SWAP_CSPR);
        assert_eq!(fx.supplied(), expected);
        assert_eq!(fx.env.balance_of(&fx.router.address()), router_before + cspr(5));
        assert_eq!(fx.env.balance_of(&fx.farm.address()), U512::zero());
        assert_eq!(fx.stable.balance_of(&fx.farm.address()), U256::zero());
        assert_eq!(fx.router.last_fee(), SWAP_FEE_TIER);
        assert!(fx.env.emitted(&fx.farm, "SwapExecuted"));
    }

    #[test]
    fn zero_amount_uses_default() {
        let mut fx = setup(700);
        fx.farm
            .with_tokens(cspr(SWAP_CSPR))
            .execute_if_profitable(U512::zero(), U256::zero());
        assert_eq!(fx.supplied(), stable_for(SWAP_CSPR));
    }

    #[test]
    fn excess_value_is_refunded() {
        let mut fx = setup(500);
        let owner_before = fx.env.balance_of(&fx.owner);

        fx.farm
            .with_tokens(cspr(7))
            .execute_if_profitable(cspr(5), U256::zero());

        assert_eq!(owner_before - fx.env.balance_of(&fx.owner), cspr(5));
        assert_eq!(fx.env.balance_of(&fx.farm.address()), U512::zero());
    }

    #[test]
    fn insufficient_value_is_rejected() {
        let mut fx = setup(500);
        let result = fx
            .farm
            .with_tokens(cspr(4))
            .try_execute_if_profitable(cspr(5), U256::zero());
        assert_eq!(result, Err(FarmError::InsufficientFunds.into()));
    }

    #[test]
    fn force_execute_skips_threshold() {
        let mut fx = setup(100);
        assert!(!fx.farm.should_execute());

        fx.farm.with_tokens(cspr(5)).force_execute(cspr(5), U256::zero());
        assert_eq!(fx.supplied(), stable_for(5));
    }

    #[test]
    fn min_out_above_router_output_aborts() {
        let mut fx = setup(500);
        let too_much = stable_for(5) + U256::one();
        let result = fx
            .farm
            .with_tokens(cspr(5))
            .try_execute_if_profitable(cspr(5), too_much);
        assert!(result.is_err());
        assert_eq!(fx.supplied(), U256::zero());
    }

    #[test]
    fn failed_deposit_rolls_back_swap() {
        let mut fx = setup(500);
        fx.pool.set_paused(true);
        let router_native = fx.env.balance_of(&fx.router.address());
        let router_stable = fx.stable.balance_of(&fx.router.address());

        let result = fx
            .farm
            .with_tokens(cspr(5))
            .try_execute_if_profitable(cspr(5), U256::zero());

        assert!(result.is_err());
        assert_eq!(fx.env.balance_of(&fx.router.address()), router_native);
        assert_eq!(fx.stable.balance_of(&fx.router.address()), router_stable);
        assert_eq!(fx.stable.balance_of(&fx.farm.address()), U256::zero());
    }

    #[test]
    fn quote_matches_router_price() {
        let fx = setup(500);
        assert_eq!(fx.farm.quote_swap(U512::zero()), stable_for(SWAP_CSPR));
        assert_eq!(fx.farm.quote_swap(cspr(2)), stable_for(2));
    }

    #[test]
    fn update_config_changes_reads() {
        let mut fx = setup(500);
        assert_eq!(fx.farm.get_default_swap_amount(), cspr(5));
        assert_eq!(fx.farm.get_apr_threshold_bps(), 500);

        fx.farm.update_config(cspr(10), 300);

        assert_eq!(fx.farm.get_default_swap_amount(), cspr(10));
        assert_eq!(fx.farm.get_apr_threshold_bps(), 300);
        assert!(fx.env.emitted(&fx.farm, "ConfigUpdated"));
    }

    #[test]
    fn update_config_rejects_zero_values() {
        let mut fx = setup(500);
        let invalid = Err(FarmError::InvalidConfig.into());
        assert_eq!(fx.farm.try_update_config(U512::zero(), 300), invalid);
        assert_eq!(fx.farm.try_update_config(cspr(10), 0), invalid);
        assert_eq!(fx.farm.get_apr_threshold_bps(), 500);
    }

    #[test]
    fn ownership_moves_only_by_owner() {
        let mut fx = setup(500);

        fx.env.set_caller(fx.stranger);
        assert_eq!(
            fx.farm.try_transfer_ownership(fx.stranger),
            Err(FarmError::NotOwner.into())
        );

        fx.env.set_caller(fx.owner);
        fx.farm.transfer_ownership(fx.stranger);
        assert_eq!(fx.farm.get_owner(), fx.stranger);
        assert!(fx.env.emitted(&fx.farm, "OwnershipTransferred"));

        // the previous owner lost its rights
        assert_eq!(
            fx.farm.try_update_config(cspr(1), 1),
            Err(FarmError::NotOwner.into())
        );
    }

    /// Same variant as `address` with every hash byte cleared
    fn zeroed(address: Address) -> Address {
        let mut bytes = address.to_bytes().unwrap();
        let len = bytes.len();
        bytes[len - 32..].fill(0);
        Address::from_bytes(&bytes).unwrap().0
    }

    #[test]
    fn ownership_rejects_null_address() {
        let mut fx = setup(500);
        assert_eq!(
            fx.farm.try_transfer_ownership(null_address()),
            Err(FarmError::NullAddress.into())
        );

        let zero_contract = zeroed(fx.pool.address());
        assert!(matches!(zero_contract, Address::Contract(_)));
        assert_eq!(
            fx.farm.try_transfer_ownership(zero_contract),
            Err(FarmError::NullAddress.into())
        );
        assert_eq!(fx.farm.get_owner(), fx.owner);
    }

    #[test]
    fn null_check_covers_both_address_kinds() {
        let fx = setup(500);
        assert!(is_null_address(&null_address()));
        assert!(is_null_address(&zeroed(fx.farm.address())));
        assert!(!is_null_address(&fx.owner));
        assert!(!is_null_address(&fx.farm.address()));
    }

    #[test]
    fn emergency_withdraw_zero_takes_full_native_balance() {
        let mut fx = setup(500);
        fx.farm.with_tokens(cspr(3)).receive();
        assert_eq!(fx.env.balance_of(&fx.farm.address()), cspr(3));
        let owner_before = fx.env.balance_of(&fx.owner);

        fx.farm.emergency_withdraw(None, U256::zero());

        assert_eq!(fx.env.balance_of(&fx.farm.address()), U512::zero());
        assert_eq!(fx.env.balance_of(&fx.owner) - owner_before, cspr(3));
    }

    #[test]
    fn emergency_withdraw_partial_native() {
        let mut fx = setup(500);
        fx.farm.with_tokens(cspr(3)).receive();

        fx.farm.emergency_withdraw(None, U256::from(MOTES_PER_CSPR));
        assert_eq!(fx.env.balance_of(&fx.farm.address()), cspr(2));
        assert!(fx.env.emitted(&fx.farm, "NativeWithdrawn"));

        assert_eq!(
            fx.farm.try_emergency_withdraw(None, U256::from(3 * MOTES_PER_CSPR)),
            Err(FarmError::InsufficientBalance.into())
        );
    }

    #[test]
    fn emergency_withdraw_zero_takes_full_token_balance() {
        let mut fx = setup(500);
        let stable = fx.stable.address();
        fx.stable.transfer(&fx.farm.address(), &U256::from(1_234u64));
        let owner_before = fx.stable.balance_of(&fx.owner);

        fx.farm.emergency_withdraw(Some(stable), U256::zero());

        assert_eq!(fx.stable.balance_of(&fx.farm.address()), U256::zero());
        assert_eq!(fx.stable.balance_of(&fx.owner), owner_before + U256::from(1_234u64));
        assert!(fx.env.emitted(&fx.farm, "TokenWithdrawn"));
    }

    #[test]
    fn emergency_withdraw_partial_token() {
        let mut fx = setup(500);
        let stable = fx.stable.address();
        fx.stable.transfer(&fx.farm.address(), &U256::from(1_000u64));
        let owner_before = fx.stable.balance_of(&fx.owner);

        fx.farm.emergency_withdraw(Some(stable), U256::from(400u64));

        assert_eq!(fx.stable.balance_of(&fx.farm.address()), U256::from(600u64));
        assert_eq!(fx.stable.balance_of(&fx.owner), owner_before + U256::from(400u64));
        assert!(fx.env.emitted(&fx.farm, "TokenWithdrawn"));

        assert_eq!(
            fx.farm.try_emergency_withdraw(Some(stable), U256::from(601u64)),
            Err(FarmError::InsufficientBalance.into())
        );
        assert_eq!(fx.stable.balance_of(&fx.farm.address()), U256::from(600u64));
    }

    #[test]
    fn status_aggregates_rate_and_balances() {
        let mut fx = setup(650);
        fx.farm.with_tokens(cspr(2)).receive();
        fx.stable.transfer(&fx.farm.address(), &U256::from(77u64));

        let status = fx.farm.get_status();
        assert_eq!(
            status,
            FarmStatus {
                current_rate_bps: U256::from(650u64),
                should_execute: true,
                native_balance: cspr(2),
                stable_balance: U256::from(77u64),
            }
        );
    }
}
