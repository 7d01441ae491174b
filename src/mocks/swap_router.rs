use odra::prelude::*;
use odra::casper_types::{U256, U512};
use odra::ContractRef;

use super::MockError;
use crate::external::{Cep18TokenContractRef, ExactInputSingleParams};
use crate::math::common::MOTES_PER_CSPR;

/// Fee tiers a Uniswap v3 style router accepts
pub const FEE_TIERS: [u32; 4] = [100, 500, 3000, 10_000];

/// Fixed-price CSPR -> stablecoin router.
///
/// `price` is the number of stablecoin base units paid per whole CSPR. The
/// router pays out of its own stablecoin balance and keeps the CSPR.
#[odra::module(errors = MockError)]
pub struct MockSwapRouter {
    wrapped_native: Var<Address>,
    stable_token: Var<Address>,
    price: Var<U256>,
    last_fee: Var<u32>,
}

#[odra::module]
impl MockSwapRouter {
    /// Route `wrapped_native` -> `stable_token` at `price` units per CSPR
    pub fn init(&mut self, wrapped_native: Address, stable_token: Address, price: U256) {
        self.wrapped_native.set(wrapped_native);
        self.stable_token.set(stable_token);
        self.price.set(price);
    }

    /// Swap the attached CSPR and pay the stablecoin to `params.recipient`
    #[odra(payable)]
    pub fn exact_input_single(&mut self, params: ExactInputSingleParams) -> U256 {
        if self.env().attached_value() != params.amount_in {
            self.env().revert(MockError::ValueMismatch);
        }
        self.assert_route(params.token_in, params.token_out, params.fee);
        if self.env().get_block_time() > params.deadline {
            self.env().revert(MockError::DeadlineExpired);
        }

        let amount_out = self.amount_out(params.amount_in);
        if amount_out < params.amount_out_minimum {
            self.env().revert(MockError::SlippageExceeded);
        }

        Cep18TokenContractRef::new(self.env(), params.token_out)
            .transfer(&params.recipient, &amount_out);
        self.last_fee.set(params.fee);
        amount_out
    }

    /// Output of a swap of `amount_in` motes
    pub fn quote_exact_input_single(
        &self,
        token_in: Address,
        token_out: Address,
        fee: u32,
        amount_in: U512
    ) -> U256 {
        self.assert_route(token_in, token_out, fee);
        self.amount_out(amount_in)
    }

    /// Fee tier of the most recent swap
    pub fn last_fee(&self) -> u32 {
        self.last_fee.get_or_default()
    }
}

impl MockSwapRouter {
    fn assert_route(&self, token_in: Address, token_out: Address, fee: u32) {
        if Some(token_in) != self.wrapped_native.get() || Some(token_out) != self.stable_token.get() {
            self.env().revert(MockError::UnsupportedPair);
        }
        if !FEE_TIERS.contains(&fee) {
            self.env().revert(MockError::UnsupportedFeeTier);
        }
    }

    fn amount_out(&self, amount_in: U512) -> U256 {
        if amount_in > U512::from(u128::MAX) {
            self.env().revert(MockError::AmountTooLarge);
        }
        U256::from(amount_in.as_u128()) * self.price.get_or_default() / U256::from(MOTES_PER_CSPR)
    }
}
