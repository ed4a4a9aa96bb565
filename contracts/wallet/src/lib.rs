#![no_std]

//! Wallet: escrow of native-asset value credited to loan participants.
//!
//! Funds only enter through `deposit`, which pulls the tokens from the
//! payer before crediting the payee, so every recorded balance is backed by
//! tokens held by this contract. Both `deposit` and `withdraw` are reserved
//! for the wired manager contract, which acts on behalf of the payee.

mod events;
mod types;

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env};

pub use events::EscrowEvent;
pub use types::{DataKey, WalletError};

use events::publish_escrow_event;
use types::{
    BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
};

fn read_config(env: &Env, key: &DataKey) -> Result<Address, WalletError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(WalletError::NotInitialized)
}

fn require_manager(env: &Env) -> Result<(), WalletError> {
    let manager = read_config(env, &DataKey::Manager)?;
    manager.require_auth();
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    Ok(())
}

fn read_balance(env: &Env, payee: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(payee.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, payee: &Address, balance: i128) {
    let key = DataKey::Balance(payee.clone());
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

#[contract]
pub struct Wallet;

#[contractimpl]
impl Wallet {
    /// Wire the wallet to its admin, its manager and the native asset token.
    pub fn init(
        env: Env,
        admin: Address,
        manager: Address,
        token: Address,
    ) -> Result<(), WalletError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(WalletError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Manager, &manager);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    /// Re-point the deposit/withdraw gateway (admin only).
    pub fn set_manager(env: Env, new_manager: Address) -> Result<(), WalletError> {
        let admin = read_config(&env, &DataKey::Admin)?;
        admin.require_auth();
        env.storage().instance().set(&DataKey::Manager, &new_manager);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    /// Pull `amount` of the native asset from `from` and credit it to `payee`.
    ///
    /// # Errors
    /// * `InvalidAmount` - `amount` is not positive
    /// * `Overflow` - the credited balance would overflow
    pub fn deposit(
        env: Env,
        from: Address,
        payee: Address,
        amount: i128,
    ) -> Result<(), WalletError> {
        require_manager(&env)?;

        if amount <= 0 {
            return Err(WalletError::InvalidAmount);
        }

        let new_balance = read_balance(&env, &payee)
            .checked_add(amount)
            .ok_or(WalletError::Overflow)?;

        let token_address = read_config(&env, &DataKey::Token)?;
        token::Client::new(&env, &token_address).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        write_balance(&env, &payee, new_balance);

        publish_escrow_event(
            &env,
            symbol_short!("deposit"),
            EscrowEvent {
                payee,
                amount,
                new_balance,
            },
        );
        Ok(())
    }

    /// Pay `amount` of the credited balance out to `payee`.
    ///
    /// The balance is decremented before the token transfer; a failed transfer
    /// aborts the invocation and the decrement with it.
    ///
    /// # Errors
    /// * `InvalidAmount` - `amount` is not positive
    /// * `InsufficientBalance` - `amount` exceeds the credited balance
    pub fn withdraw(env: Env, payee: Address, amount: i128) -> Result<(), WalletError> {
        require_manager(&env)?;

        if amount <= 0 {
            return Err(WalletError::InvalidAmount);
        }

        let balance = read_balance(&env, &payee);
        if amount > balance {
            return Err(WalletError::InsufficientBalance);
        }
        let token_address = read_config(&env, &DataKey::Token)?;
        let new_balance = balance - amount;
        write_balance(&env, &payee, new_balance);

        token::Client::new(&env, &token_address).transfer(
            &env.current_contract_address(),
            &payee,
            &amount,
        );

        publish_escrow_event(
            &env,
            symbol_short!("withdraw"),
            EscrowEvent {
                payee,
                amount,
                new_balance,
            },
        );
        Ok(())
    }

    /// Credited balance of `payee` (view function).
    pub fn balance(env: Env, payee: Address) -> i128 {
        read_balance(&env, &payee)
    }
}
