//! Core data types for the LoanManager contract.

use soroban_sdk::{contracterror, contracttype, Address};

/// Flat interest charged on every debt, as a percentage of the principal.
pub const INTEREST_RATE_PERCENT: u32 = 2;
/// Smallest principal a borrower may request.
pub const MIN_LOAN_AMOUNT: i128 = 100_000;
/// Reward units minted per funding and per repayment until the admin changes it.
pub const DEFAULT_REWARD_AMOUNT: i128 = 10;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LoanError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AmountTooSmall = 3,
    InvalidAmount = 4,
    DebtAlreadyExists = 5,
    DebtNotFound = 6,
    InvalidState = 7,
    InsufficientValue = 8,
    BorrowerAlreadyActive = 9,
    NoLender = 10,
    InsufficientBalance = 11,
    Overflow = 12,
}

/// Debt state as stored by the LoanDb contract.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DebtState {
    Requested = 0,
    Funded = 1,
    Paid = 2,
}

/// Debt record as returned by the LoanDb contract; field names must match.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Debt {
    pub borrower: Address,
    pub lender: Option<Address>,
    pub principal: i128,
    pub interest: i128,
    pub state: DebtState,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    LoanDb,
    Wallet,
    Reward,
    RewardAmount,
}
