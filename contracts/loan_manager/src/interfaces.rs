//! Clients for the contracts the loan manager drives.

use soroban_sdk::{contractclient, Address, BytesN, Env};

use crate::types::Debt;

#[contractclient(name = "LoanDbClient")]
pub trait LoanDbInterface {
    fn create_debt(
        env: Env,
        debt_id: BytesN<32>,
        borrower: Address,
        principal: i128,
        interest: i128,
    );
    fn assign_lender(env: Env, debt_id: BytesN<32>, lender: Address);
    fn mark_paid(env: Env, debt_id: BytesN<32>);
    fn set_active(env: Env, account: Address, active: bool);
    fn get_debt(env: Env, debt_id: BytesN<32>) -> Option<Debt>;
    fn is_active(env: Env, account: Address) -> bool;
}

#[contractclient(name = "WalletClient")]
pub trait WalletInterface {
    fn deposit(env: Env, from: Address, payee: Address, amount: i128);
    fn withdraw(env: Env, payee: Address, amount: i128);
    fn balance(env: Env, payee: Address) -> i128;
}

#[contractclient(name = "RewardClient")]
pub trait RewardInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
}
