#![no_std]

//! LoanDb: the append-only ledger of debts.
//!
//! Every mutating entry point is reserved for the wired loan manager
//! contract. The manager sequences the lifecycle; this contract only
//! enforces the per-record invariants (positive amounts, unique ids,
//! lender assigned once).

mod events;
mod types;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, Vec};

pub use events::DebtEvent;
pub use types::{DataKey, Debt, DebtState, LedgerError};

use events::publish_debt_event;
use types::{
    DEBT_BUMP_AMOUNT, DEBT_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
};

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read_admin(env: &Env) -> Result<Address, LedgerError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(LedgerError::NotInitialized)
}

/// Only the currently wired manager may mutate the ledger.
fn require_manager(env: &Env) -> Result<(), LedgerError> {
    let manager: Address = env
        .storage()
        .instance()
        .get(&DataKey::Manager)
        .ok_or(LedgerError::NotInitialized)?;
    manager.require_auth();
    bump_instance(env);
    Ok(())
}

fn read_debt(env: &Env, debt_id: &BytesN<32>) -> Option<Debt> {
    env.storage()
        .persistent()
        .get(&DataKey::Debt(debt_id.clone()))
}

fn write_debt(env: &Env, debt_id: &BytesN<32>, debt: &Debt) {
    let key = DataKey::Debt(debt_id.clone());
    env.storage().persistent().set(&key, debt);
    env.storage()
        .persistent()
        .extend_ttl(&key, DEBT_LIFETIME_THRESHOLD, DEBT_BUMP_AMOUNT);
}

fn read_history(env: &Env, key: &DataKey) -> Vec<BytesN<32>> {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| Vec::new(env))
}

fn append_history(env: &Env, key: DataKey, debt_id: &BytesN<32>) {
    let mut ids = read_history(env, &key);
    ids.push_back(debt_id.clone());
    env.storage().persistent().set(&key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, DEBT_LIFETIME_THRESHOLD, DEBT_BUMP_AMOUNT);
}

/// History is private to the account and the ledger admin.
fn require_history_reader(
    env: &Env,
    caller: &Address,
    account: &Address,
) -> Result<(), LedgerError> {
    caller.require_auth();
    let admin = read_admin(env)?;
    if caller != account && *caller != admin {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

fn debt_event(debt_id: &BytesN<32>, debt: &Debt) -> DebtEvent {
    DebtEvent {
        debt_id: debt_id.clone(),
        borrower: debt.borrower.clone(),
        lender: debt.lender.clone(),
        principal: debt.principal,
        interest: debt.interest,
        state: debt.state,
    }
}

#[contract]
pub struct LoanDb;

#[contractimpl]
impl LoanDb {
    /// Wire the ledger to its admin and to the manager allowed to mutate it.
    pub fn init(env: Env, admin: Address, manager: Address) -> Result<(), LedgerError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(LedgerError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Manager, &manager);
        bump_instance(&env);
        Ok(())
    }

    /// Re-point the mutation capability to a new manager (admin only).
    pub fn set_manager(env: Env, new_manager: Address) -> Result<(), LedgerError> {
        let admin = read_admin(&env)?;
        admin.require_auth();
        env.storage().instance().set(&DataKey::Manager, &new_manager);
        bump_instance(&env);
        Ok(())
    }

    /// Store a new `Requested` debt and append it to the borrower's history.
    ///
    /// # Errors
    /// * `InvalidAmount` - `principal` or `interest` is not positive
    /// * `DebtAlreadyExists` - a record is already stored under `debt_id`
    pub fn create_debt(
        env: Env,
        debt_id: BytesN<32>,
        borrower: Address,
        principal: i128,
        interest: i128,
    ) -> Result<(), LedgerError> {
        require_manager(&env)?;

        if principal <= 0 || interest <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if read_debt(&env, &debt_id).is_some() {
            return Err(LedgerError::DebtAlreadyExists);
        }

        let debt = Debt {
            borrower: borrower.clone(),
            lender: None,
            principal,
            interest,
            state: DebtState::Requested,
        };
        write_debt(&env, &debt_id, &debt);
        append_history(&env, DataKey::Borrowed(borrower), &debt_id);

        publish_debt_event(&env, symbol_short!("created"), debt_event(&debt_id, &debt));
        Ok(())
    }

    /// Record the lender of a debt and move it to `Funded`.
    ///
    /// # Errors
    /// * `DebtNotFound` - no record under `debt_id`
    /// * `LenderAlreadyAssigned` - the debt already has a lender
    pub fn assign_lender(
        env: Env,
        debt_id: BytesN<32>,
        lender: Address,
    ) -> Result<(), LedgerError> {
        require_manager(&env)?;

        let mut debt = read_debt(&env, &debt_id).ok_or(LedgerError::DebtNotFound)?;
        if debt.lender.is_some() {
            return Err(LedgerError::LenderAlreadyAssigned);
        }

        debt.lender = Some(lender.clone());
        debt.state = DebtState::Funded;
        write_debt(&env, &debt_id, &debt);
        append_history(&env, DataKey::Lent(lender), &debt_id);

        publish_debt_event(&env, symbol_short!("funded"), debt_event(&debt_id, &debt));
        Ok(())
    }

    /// Move a debt to `Paid`. The prior state is checked by the manager.
    pub fn mark_paid(env: Env, debt_id: BytesN<32>) -> Result<(), LedgerError> {
        require_manager(&env)?;

        let mut debt = read_debt(&env, &debt_id).ok_or(LedgerError::DebtNotFound)?;
        debt.state = DebtState::Paid;
        write_debt(&env, &debt_id, &debt);

        publish_debt_event(&env, symbol_short!("paid"), debt_event(&debt_id, &debt));
        Ok(())
    }

    /// Set or clear the one-active-loan flag of an account.
    pub fn set_active(env: Env, account: Address, active: bool) -> Result<(), LedgerError> {
        require_manager(&env)?;
        let key = DataKey::Active(account);
        env.storage().persistent().set(&key, &active);
        env.storage()
            .persistent()
            .extend_ttl(&key, DEBT_LIFETIME_THRESHOLD, DEBT_BUMP_AMOUNT);
        Ok(())
    }

    pub fn get_debt(env: Env, debt_id: BytesN<32>) -> Option<Debt> {
        read_debt(&env, &debt_id)
    }

    pub fn lender_of(env: Env, debt_id: BytesN<32>) -> Option<Address> {
        read_debt(&env, &debt_id).and_then(|debt| debt.lender)
    }

    pub fn borrower_of(env: Env, debt_id: BytesN<32>) -> Option<Address> {
        read_debt(&env, &debt_id).map(|debt| debt.borrower)
    }

    /// Principal of a debt, zero when the id is unknown.
    pub fn principal_of(env: Env, debt_id: BytesN<32>) -> i128 {
        read_debt(&env, &debt_id).map_or(0, |debt| debt.principal)
    }

    /// Interest of a debt, zero when the id is unknown.
    pub fn interest_of(env: Env, debt_id: BytesN<32>) -> i128 {
        read_debt(&env, &debt_id).map_or(0, |debt| debt.interest)
    }

    pub fn state_of(env: Env, debt_id: BytesN<32>) -> Option<DebtState> {
        read_debt(&env, &debt_id).map(|debt| debt.state)
    }

    pub fn is_active(env: Env, account: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Active(account))
            .unwrap_or(false)
    }

    /// Debts `account` borrowed, oldest first. `caller` must be `account` or the admin.
    pub fn borrow_history(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<Vec<BytesN<32>>, LedgerError> {
        require_history_reader(&env, &caller, &account)?;
        Ok(read_history(&env, &DataKey::Borrowed(account)))
    }

    /// Debts `account` funded, oldest first. `caller` must be `account` or the admin.
    pub fn lend_history(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<Vec<BytesN<32>>, LedgerError> {
        require_history_reader(&env, &caller, &account)?;
        Ok(read_history(&env, &DataKey::Lent(account)))
    }
}

#[cfg(test)]
mod test;
