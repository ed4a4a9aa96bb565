//! Event types and topic constants for the LoanDb contract.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::types::DebtState;

/// Event emitted whenever a debt record changes state (created, funded, paid).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtEvent {
    pub debt_id: BytesN<32>,
    pub borrower: Address,
    pub lender: Option<Address>,
    pub principal: i128,
    pub interest: i128,
    pub state: DebtState,
}

/// Publish a debt lifecycle event under `("loandb", action)`.
pub fn publish_debt_event(env: &Env, action: Symbol, event: DebtEvent) {
    env.events().publish((symbol_short!("loandb"), action), event);
}
