//! Prints the merged schema of every contract listed in Odra.toml.
#![allow(unused_imports)]

use std::process;

use odra::prelude::*;
use farmbot::{
    // Controller
    FarmBot,

    // Mocks
    mocks::{MockLendingPool, MockStableToken, MockSwapRouter},
};

fn main() {
    let schema = FarmBot::module_schema()
        .merge(MockStableToken::module_schema())
        .merge(MockLendingPool::module_schema())
        .merge(MockSwapRouter::module_schema());

    match schema.as_json() {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("cannot encode schema: {:?}", err);
            process::exit(1);
        }
    }
}
