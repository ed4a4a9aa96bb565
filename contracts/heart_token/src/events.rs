//! Event helpers for the HeartToken contract.

use soroban_sdk::{symbol_short, Address, Env};

/// Publish a mint under `("heart", "mint", to)` with the minted amount.
pub fn publish_mint(env: &Env, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("heart"), symbol_short!("mint"), to), amount);
}

/// Publish a burn under `("heart", "burn", from)` with the burned amount.
pub fn publish_burn(env: &Env, from: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("heart"), symbol_short!("burn"), from), amount);
}
