//! Event types for the Wallet contract.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Event emitted on every credit and every payout.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowEvent {
    pub payee: Address,
    pub amount: i128,
    pub new_balance: i128,
}

/// Publish an escrow movement under `("wallet", action)`.
pub fn publish_escrow_event(env: &Env, action: Symbol, event: EscrowEvent) {
    env.events().publish((symbol_short!("wallet"), action), event);
}
