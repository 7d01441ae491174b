//! Interfaces of the protocols the controller calls into.
//!
//! Argument names are part of the Casper call ABI, so implementations
//! (including the mocks) must keep them unchanged.

use odra::prelude::*;
use odra::casper_types::{U256, U512};

/// Reserve snapshot returned by the lending pool
#[odra::odra_type]
pub struct ReserveData {
    /// Supply index, ray
    pub liquidity_index: U256,
    /// Current supply APR, ray
    pub current_liquidity_rate: U256,
    /// Current variable borrow APR, ray
    pub current_variable_borrow_rate: U256,
    /// Block time of the last index update (ms)
    pub last_update_timestamp: u64,
}

/// Single-hop exact-input swap request
#[odra::odra_type]
pub struct ExactInputSingleParams {
    /// Token sold (wrapped CSPR)
    pub token_in: Address,
    /// Token bought
    pub token_out: Address,
    /// Pool fee tier in hundredths of a basis point (3000 = 0.3%)
    pub fee: u32,
    /// Receiver of the output tokens
    pub recipient: Address,
    /// Block time (ms) after which the swap must revert
    pub deadline: u64,
    /// Native amount in motes, attached to the call
    pub amount_in: U512,
    /// Revert below this output
    pub amount_out_minimum: U256,
}

/// Aave v3 style lending pool
#[odra::external_contract]
pub trait LendingPool {
    /// Reserve snapshot of `asset`
    fn get_reserve_data(&self, asset: Address) -> ReserveData;
    /// Pull `amount` of `asset` from the caller and credit `on_behalf_of`
    fn supply(&mut self, asset: Address, amount: U256, on_behalf_of: Address);
}

/// Uniswap v3 style router taking native CSPR as input
#[odra::external_contract]
pub trait SwapRouter {
    /// Swap the attached CSPR, returning the output amount
    fn exact_input_single(&mut self, params: ExactInputSingleParams) -> U256;
    /// Output a swap of `amount_in` would produce
    fn quote_exact_input_single(
        &self,
        token_in: Address,
        token_out: Address,
        fee: u32,
        amount_in: U512
    ) -> U256;
}

/// The subset of CEP-18 the controller needs
#[odra::external_contract]
#[allow(missing_docs)]
pub trait Cep18Token {
    /// Token balance of `address`
    fn balance_of(&self, address: &Address) -> U256;
    /// Allow `spender` to move `amount` of the caller's tokens
    fn approve(&mut self, spender: &Address, amount: &U256);
    /// Move `amount` from the caller to `recipient`
    fn transfer(&mut self, recipient: &Address, amount: &U256);
    /// Move `amount` from `owner` to `recipient` using an allowance
    fn transfer_from(&mut self, owner: &Address, recipient: &Address, amount: &U256);
}
