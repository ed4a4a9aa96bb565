#![no_std]

//! LoanManager: drives the debt lifecycle across the ledger, the escrow
//! wallet and the reward token.
//!
//! # Lifecycle
//! `request_loan` records a `Requested` debt, `lend_loan` escrows the
//! lender's value for the borrower and moves the debt to `Funded`,
//! `pay_loan` escrows principal plus interest for the lender and moves it
//! to `Paid`. Credited parties pull their value out with `withdraw`.
//!
//! # Atomicity
//! Every precondition is checked before the first cross-contract effect.
//! Any failure after that (for example a token transfer the payer cannot
//! cover) aborts the whole invocation, and the host rolls back the ledger,
//! escrow and reward writes made by the sub-calls.

mod events;
mod interfaces;
mod types;

use soroban_sdk::{contract, contractimpl, xdr::ToXdr, Address, BytesN, Env};

pub use events::{LoanFundedEvent, LoanPaidEvent, LoanRequestedEvent};
pub use types::{
    DataKey, Debt, DebtState, LoanError, DEFAULT_REWARD_AMOUNT, INTEREST_RATE_PERCENT,
    MIN_LOAN_AMOUNT,
};

use events::{publish_funded, publish_paid, publish_requested, publish_reward_updated};
use interfaces::{LoanDbClient, RewardClient, WalletClient};
use types::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};

fn read_address(env: &Env, key: &DataKey) -> Result<Address, LoanError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(LoanError::NotInitialized)
}

fn require_admin_auth(env: &Env) -> Result<Address, LoanError> {
    let admin = read_address(env, &DataKey::Admin)?;
    admin.require_auth();
    Ok(admin)
}

fn loan_db(env: &Env) -> Result<LoanDbClient<'_>, LoanError> {
    let address = read_address(env, &DataKey::LoanDb)?;
    Ok(LoanDbClient::new(env, &address))
}

fn wallet(env: &Env) -> Result<WalletClient<'_>, LoanError> {
    let address = read_address(env, &DataKey::Wallet)?;
    Ok(WalletClient::new(env, &address))
}

fn reward(env: &Env) -> Result<RewardClient<'_>, LoanError> {
    let address = read_address(env, &DataKey::Reward)?;
    Ok(RewardClient::new(env, &address))
}

fn read_reward_amount(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::RewardAmount)
        .unwrap_or(DEFAULT_REWARD_AMOUNT)
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Flat interest, rounded down.
fn interest_for(amount: i128) -> Result<i128, LoanError> {
    amount
        .checked_mul(INTEREST_RATE_PERCENT as i128)
        .map(|scaled| scaled / 100)
        .ok_or(LoanError::Overflow)
}

/// `sha256(xdr(borrower) || timestamp || amount)`. Two requests by the same
/// borrower for the same amount in the same ledger collide.
fn derive_debt_id(env: &Env, borrower: &Address, amount: i128) -> BytesN<32> {
    let mut preimage = borrower.clone().to_xdr(env);
    preimage.extend_from_array(&env.ledger().timestamp().to_be_bytes());
    preimage.extend_from_array(&amount.to_be_bytes());
    env.crypto().sha256(&preimage).to_bytes()
}

#[contract]
pub struct LoanManager;

#[contractimpl]
impl LoanManager {
    /// Wire the manager to the ledger, escrow wallet and reward token.
    ///
    /// Each of those contracts must in turn be initialized with this
    /// contract's address as its manager (or minter).
    pub fn init(
        env: Env,
        admin: Address,
        loan_db: Address,
        wallet: Address,
        reward: Address,
    ) -> Result<(), LoanError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(LoanError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::LoanDb, &loan_db);
        env.storage().instance().set(&DataKey::Wallet, &wallet);
        env.storage().instance().set(&DataKey::Reward, &reward);
        env.storage()
            .instance()
            .set(&DataKey::RewardAmount, &DEFAULT_REWARD_AMOUNT);
        bump_instance(&env);
        Ok(())
    }

    /// Request a loan of `amount`. Returns the id of the new debt.
    ///
    /// # Errors
    /// * `AmountTooSmall` - `amount` is below `MIN_LOAN_AMOUNT`
    /// * `DebtAlreadyExists` - the derived id is already taken
    /// * `BorrowerAlreadyActive` - the borrower has a funded, unpaid debt
    pub fn request_loan(
        env: Env,
        borrower: Address,
        amount: i128,
    ) -> Result<BytesN<32>, LoanError> {
        borrower.require_auth();

        if amount < MIN_LOAN_AMOUNT {
            return Err(LoanError::AmountTooSmall);
        }

        let ledger = loan_db(&env)?;
        let debt_id = derive_debt_id(&env, &borrower, amount);
        if ledger.get_debt(&debt_id).is_some() {
            return Err(LoanError::DebtAlreadyExists);
        }
        // Only set at funding time, so several unfunded requests may coexist.
        if ledger.is_active(&borrower) {
            return Err(LoanError::BorrowerAlreadyActive);
        }

        let interest = interest_for(amount)?;
        ledger.create_debt(&debt_id, &borrower, &amount, &interest);
        bump_instance(&env);

        publish_requested(
            &env,
            LoanRequestedEvent {
                debt_id: debt_id.clone(),
                borrower,
                amount,
            },
        );
        Ok(debt_id)
    }

    /// Fund a requested debt with `amount` of the native asset.
    ///
    /// The full `amount` is credited to the borrower, including anything
    /// above the principal.
    ///
    /// # Errors
    /// * `DebtNotFound` - unknown `debt_id`
    /// * `InvalidState` - the debt is not `Requested`
    /// * `InsufficientValue` - `amount` is below the principal
    /// * `BorrowerAlreadyActive` - the borrower picked up another loan
    pub fn lend_loan(
        env: Env,
        debt_id: BytesN<32>,
        lender: Address,
        amount: i128,
    ) -> Result<(), LoanError> {
        lender.require_auth();

        let ledger = loan_db(&env)?;
        let debt = ledger.get_debt(&debt_id).ok_or(LoanError::DebtNotFound)?;
        if debt.state != DebtState::Requested {
            return Err(LoanError::InvalidState);
        }
        if amount < debt.principal {
            return Err(LoanError::InsufficientValue);
        }
        if ledger.is_active(&debt.borrower) {
            return Err(LoanError::BorrowerAlreadyActive);
        }
        let escrow = wallet(&env)?;
        let rewards = reward(&env)?;
        let reward_amount = read_reward_amount(&env);

        escrow.deposit(&lender, &debt.borrower, &amount);
        ledger.assign_lender(&debt_id, &lender);
        ledger.set_active(&debt.borrower, &true);
        rewards.mint(&lender, &reward_amount);
        bump_instance(&env);

        publish_funded(&env, LoanFundedEvent { debt_id, lender });
        Ok(())
    }

    /// Repay a funded debt with `amount` of the native asset, credited to
    /// the lender.
    ///
    /// Anyone may repay. The activity flag cleared is the payer's, so a
    /// third-party repayment leaves the borrower flagged.
    ///
    /// # Errors
    /// * `DebtNotFound` - unknown `debt_id`
    /// * `InvalidState` - the debt is not `Funded`
    /// * `InsufficientValue` - `amount` is below principal plus interest
    /// * `NoLender` - the debt has no lender recorded
    pub fn pay_loan(
        env: Env,
        debt_id: BytesN<32>,
        payer: Address,
        amount: i128,
    ) -> Result<(), LoanError> {
        payer.require_auth();

        let ledger = loan_db(&env)?;
        let debt = ledger.get_debt(&debt_id).ok_or(LoanError::DebtNotFound)?;
        if debt.state != DebtState::Funded {
            return Err(LoanError::InvalidState);
        }
        let owed = debt
            .principal
            .checked_add(debt.interest)
            .ok_or(LoanError::Overflow)?;
        if owed <= 0 {
            return Err(LoanError::DebtNotFound);
        }
        if amount < owed {
            return Err(LoanError::InsufficientValue);
        }
        let lender = debt.lender.ok_or(LoanError::NoLender)?;
        let escrow = wallet(&env)?;
        let rewards = reward(&env)?;
        let reward_amount = read_reward_amount(&env);

        escrow.deposit(&payer, &lender, &amount);
        ledger.mark_paid(&debt_id);
        rewards.mint(&payer, &reward_amount);
        ledger.set_active(&payer, &false);
        bump_instance(&env);

        publish_paid(&env, LoanPaidEvent { debt_id });
        Ok(())
    }

    /// Pay out `amount` of the caller's escrowed balance.
    pub fn withdraw(env: Env, payee: Address, amount: i128) -> Result<(), LoanError> {
        payee.require_auth();

        if amount <= 0 {
            return Err(LoanError::InvalidAmount);
        }
        let escrow = wallet(&env)?;
        if escrow.balance(&payee) < amount {
            return Err(LoanError::InsufficientBalance);
        }
        escrow.withdraw(&payee, &amount);
        Ok(())
    }

    /// Burn `amount` of the holder's reward balance.
    pub fn burn_reward(env: Env, holder: Address, amount: i128) -> Result<(), LoanError> {
        holder.require_auth();

        if amount <= 0 {
            return Err(LoanError::InvalidAmount);
        }
        let rewards = reward(&env)?;
        if rewards.balance(&holder) < amount {
            return Err(LoanError::InsufficientBalance);
        }
        rewards.burn(&holder, &amount);
        Ok(())
    }

    /// Change the reward minted per funding and per repayment (admin only).
    pub fn set_reward_amount(env: Env, amount: i128) -> Result<(), LoanError> {
        require_admin_auth(&env)?;
        if amount <= 0 {
            return Err(LoanError::InvalidAmount);
        }
        env.storage().instance().set(&DataKey::RewardAmount, &amount);
        bump_instance(&env);
        publish_reward_updated(&env, amount);
        Ok(())
    }

    pub fn reward_amount(env: Env) -> i128 {
        read_reward_amount(&env)
    }

    pub fn interest_rate(_env: Env) -> u32 {
        INTEREST_RATE_PERCENT
    }

    pub fn min_loan_amount(_env: Env) -> i128 {
        MIN_LOAN_AMOUNT
    }

    /// Principal plus interest of a debt (view function).
    pub fn total_owed(env: Env, debt_id: BytesN<32>) -> Result<i128, LoanError> {
        let debt = loan_db(&env)?
            .get_debt(&debt_id)
            .ok_or(LoanError::DebtNotFound)?;
        debt.principal
            .checked_add(debt.interest)
            .ok_or(LoanError::Overflow)
    }
}
