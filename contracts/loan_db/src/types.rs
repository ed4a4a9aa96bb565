//! Core data types for the LoanDb contract.

use soroban_sdk::{contracterror, contracttype, Address, BytesN};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Debt records are never deleted, so they are kept alive far longer than config.
pub(crate) const DEBT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub(crate) const DEBT_LIFETIME_THRESHOLD: u32 = DEBT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Lifecycle of a debt. Transitions only move forward:
/// `Requested -> Funded -> Paid`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DebtState {
    Requested = 0,
    Funded = 1,
    Paid = 2,
}

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    DebtAlreadyExists = 5,
    DebtNotFound = 6,
    LenderAlreadyAssigned = 7,
}

/// Stored debt record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Debt {
    pub borrower: Address,
    /// `None` until the debt is funded; assigned exactly once.
    pub lender: Option<Address>,
    pub principal: i128,
    pub interest: i128,
    pub state: DebtState,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Manager,
    Debt(BytesN<32>),
    Active(Address),
    Borrowed(Address),
    Lent(Address),
}
