use odra::prelude::*;
use odra::casper_types::U256;

use super::MockError;

/// Minimal CEP-18 token with an owner-only mint
#[odra::module(errors = MockError)]
pub struct MockStableToken {
    name: Var<String>,
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
    minter: Var<Address>,
}

#[odra::module]
impl MockStableToken {
    /// Initialize the token, crediting `initial_supply` to the deployer
    pub fn init(&mut self, name: String, symbol: String, decimals: u8, initial_supply: U256) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.minter.set(caller);
        self.total_supply.set(U256::zero());
        if !initial_supply.is_zero() {
            self.credit(&caller, initial_supply);
        }
    }

    /// Token name
    pub fn name(&self) -> String { self.name.get_or_default() }
    /// Ticker
    pub fn symbol(&self) -> String { self.symbol.get_or_default() }
    /// Fractional digits
    pub fn decimals(&self) -> u8 { self.decimals.get_or_default() }
    /// Units in circulation
    pub fn total_supply(&self) -> U256 { self.total_supply.get_or_default() }

    /// Balance of `address`
    pub fn balance_of(&self, address: &Address) -> U256 {
        self.balances.get_or_default(address)
    }

    /// Amount `spender` may move from `owner`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances.get_or_default(&(*owner, *spender))
    }

    /// Let `spender` move up to `amount` of the caller's tokens
    pub fn approve(&mut self, spender: &Address, amount: &U256) {
        let owner = self.env().caller();
        self.allowances.set(&(owner, *spender), *amount);
    }

    /// Move `amount` from the caller to `recipient`
    pub fn transfer(&mut self, recipient: &Address, amount: &U256) {
        let sender = self.env().caller();
        self.move_balance(&sender, recipient, *amount);
    }

    /// Move `amount` from `owner` to `recipient`, spending the caller's allowance
    pub fn transfer_from(&mut self, owner: &Address, recipient: &Address, amount: &U256) {
        let spender = self.env().caller();
        let allowed = self.allowance(owner, &spender);
        if allowed < *amount {
            self.env().revert(MockError::InsufficientAllowance);
        }
        self.allowances.set(&(*owner, spender), allowed - *amount);
        self.move_balance(owner, recipient, *amount);
    }

    /// Credit new tokens; minter only
    pub fn mint(&mut self, owner: &Address, amount: &U256) {
        if Some(self.env().caller()) != self.minter.get() {
            self.env().revert(MockError::Unauthorized);
        }
        self.credit(owner, *amount);
    }
}

impl MockStableToken {
    fn credit(&mut self, owner: &Address, amount: U256) {
        let balance = self.balances.get_or_default(owner);
        self.balances.set(owner, balance + amount);
        let supply = self.total_supply.get_or_default();
        self.total_supply.set(supply + amount);
    }

    fn move_balance(&mut self, from: &Address, to: &Address, amount: U256) {
        let from_balance = self.balances.get_or_default(from);
        if from_balance < amount {
            self.env().revert(MockError::InsufficientBalance);
        }
        self.balances.set(from, from_balance - amount);
        let to_balance = self.balances.get_or_default(to);
        self.balances.set(to, to_balance + amount);
    }
}
