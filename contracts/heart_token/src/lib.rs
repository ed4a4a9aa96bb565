#![no_std]

//! HeartToken: the reward unit minted to loan participants.
//!
//! Only the hooks the lending core needs are exposed: minting by the wired
//! minter (the loan manager) and voluntary burning by a holder. Transfers
//! and allowances are not part of this contract.

mod events;
mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, String};

pub use types::{DataKey, TokenError, TokenMetadata};

use events::{publish_burn, publish_mint};
use types::{
    BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
};

fn read_address(env: &Env, key: &DataKey) -> Result<Address, TokenError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(TokenError::NotInitialized)
}

fn read_metadata(env: &Env) -> Result<TokenMetadata, TokenError> {
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .ok_or(TokenError::NotInitialized)
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

#[contract]
pub struct HeartToken;

#[contractimpl]
impl HeartToken {
    /// Initialize metadata, the admin, and the only address allowed to mint.
    pub fn init(
        env: Env,
        admin: Address,
        minter: Address,
        decimals: u32,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(TokenError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Minter, &minter);
        env.storage().instance().set(
            &DataKey::Metadata,
            &TokenMetadata {
                decimals,
                name,
                symbol,
            },
        );
        env.storage().instance().set(&DataKey::TotalSupply, &0_i128);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    /// Re-point the mint capability (admin only).
    pub fn set_minter(env: Env, new_minter: Address) -> Result<(), TokenError> {
        let admin = read_address(&env, &DataKey::Admin)?;
        admin.require_auth();
        env.storage().instance().set(&DataKey::Minter, &new_minter);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    /// Mint `amount` to `to`. Minter only.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let minter = read_address(&env, &DataKey::Minter)?;
        minter.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let new_balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let new_supply = read_total_supply(&env)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        write_balance(&env, &to, new_balance);
        env.storage().instance().set(&DataKey::TotalSupply, &new_supply);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        publish_mint(&env, to, amount);
        Ok(())
    }

    /// Burn `amount` of the holder's own balance.
    ///
    /// `from` must authorize, either directly or as the root of an
    /// invocation routed through the loan manager.
    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let balance = read_balance(&env, &from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        write_balance(&env, &from, balance - amount);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &(read_total_supply(&env) - amount));
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        publish_burn(&env, from, amount);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn decimals(env: Env) -> Result<u32, TokenError> {
        Ok(read_metadata(&env)?.decimals)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        Ok(read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        Ok(read_metadata(&env)?.symbol)
    }
}
