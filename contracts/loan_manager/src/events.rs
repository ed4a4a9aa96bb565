//! Event types and topic constants for the LoanManager contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

/// Event emitted when a borrower requests a loan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRequestedEvent {
    pub debt_id: BytesN<32>,
    pub borrower: Address,
    pub amount: i128,
}

/// Event emitted when a lender funds a requested loan.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanFundedEvent {
    pub debt_id: BytesN<32>,
    pub lender: Address,
}

/// Event emitted when a funded loan is paid back.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanPaidEvent {
    pub debt_id: BytesN<32>,
}

pub fn publish_requested(env: &Env, event: LoanRequestedEvent) {
    env.events()
        .publish((symbol_short!("loan"), symbol_short!("request")), event);
}

pub fn publish_funded(env: &Env, event: LoanFundedEvent) {
    env.events()
        .publish((symbol_short!("loan"), symbol_short!("funded")), event);
}

pub fn publish_paid(env: &Env, event: LoanPaidEvent) {
    env.events()
        .publish((symbol_short!("loan"), symbol_short!("paid")), event);
}

/// Publish a reward amount change.
pub fn publish_reward_updated(env: &Env, amount: i128) {
    env.events()
        .publish((symbol_short!("loan"), symbol_short!("reward")), amount);
}
