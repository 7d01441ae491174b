use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;

use super::MockError;
use crate::external::{Cep18TokenContractRef, ReserveData};
use crate::math::common::RAY;

/// Lending pool with admin-set supply rates.
///
/// `supply` pulls the tokens from the caller and credits `on_behalf_of`.
#[odra::module(errors = MockError)]
pub struct MockLendingPool {
    admin: Var<Address>,
    paused: Var<bool>,
    reserves: Mapping<Address, ReserveData>,
    supplied: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl MockLendingPool {
    /// The deployer becomes the admin
    pub fn init(&mut self) {
        self.admin.set(self.env().caller());
        self.paused.set(false);
    }

    /// Create or update the reserve of `asset` with a supply rate in ray
    pub fn set_reserve(&mut self, asset: Address, liquidity_rate: U256) {
        self.assert_admin();
        let now = self.env().get_block_time();
        let reserve = match self.reserves.get(&asset) {
            Some(mut reserve) => {
                reserve.current_liquidity_rate = liquidity_rate;
                reserve.last_update_timestamp = now;
                reserve
            }
            None => ReserveData {
                liquidity_index: U256::from(RAY),
                current_liquidity_rate: liquidity_rate,
                current_variable_borrow_rate: U256::zero(),
                last_update_timestamp: now,
            },
        };
        self.reserves.set(&asset, reserve);
    }

    /// Reject supplies while paused
    pub fn set_paused(&mut self, paused: bool) {
        self.assert_admin();
        self.paused.set(paused);
    }

    /// Reserve of `asset`; reverts when none is set
    pub fn get_reserve_data(&self, asset: Address) -> ReserveData {
        match self.reserves.get(&asset) {
            Some(reserve) => reserve,
            None => self.env().revert(MockError::ReserveNotFound),
        }
    }

    /// Pull `amount` from the caller and credit `on_behalf_of`
    pub fn supply(&mut self, asset: Address, amount: U256, on_behalf_of: Address) {
        if self.paused.get_or_default() {
            self.env().revert(MockError::PoolPaused);
        }
        if self.reserves.get(&asset).is_none() {
            self.env().revert(MockError::ReserveNotFound);
        }
        if amount.is_zero() {
            self.env().revert(MockError::ZeroAmount);
        }

        let caller = self.env().caller();
        let this = self.env().self_address();
        Cep18TokenContractRef::new(self.env(), asset).transfer_from(&caller, &this, &amount);

        let key = (asset, on_behalf_of);
        let balance = self.supplied.get_or_default(&key);
        self.supplied.set(&key, balance + amount);
    }

    /// Amount of `asset` supplied for `account`
    pub fn supplied_balance(&self, asset: Address, account: Address) -> U256 {
        self.supplied.get_or_default(&(asset, account))
    }
}

impl MockLendingPool {
    fn assert_admin(&self) {
        if Some(self.env().caller()) != self.admin.get() {
            self.env().revert(MockError::Unauthorized);
        }
    }
}
