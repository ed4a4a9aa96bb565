use super::*;
use soroban_sdk::testutils::{Address as _, Events as _};
use soroban_sdk::{Symbol, TryFromVal, TryIntoVal};

fn setup(env: &Env) -> (LoanDbClient<'_>, Address, Address) {
    let admin = Address::generate(env);
    let manager = Address::generate(env);
    let contract_id = env.register(LoanDb, ());
    let client = LoanDbClient::new(env, &contract_id);
    client.init(&admin, &manager);
    (client, admin, manager)
}

fn debt_id(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[seed; 32])
}

#[test]
fn test_create_debt_stores_requested_record() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let id = debt_id(&env, 1);

    client.create_debt(&id, &borrower, &1_000_000, &20_000);

    let debt = client.get_debt(&id).unwrap();
    assert_eq!(debt.borrower, borrower);
    assert_eq!(debt.lender, None);
    assert_eq!(debt.principal, 1_000_000);
    assert_eq!(debt.interest, 20_000);
    assert_eq!(debt.state, DebtState::Requested);
    assert_eq!(client.borrower_of(&id), Some(borrower));
    assert_eq!(client.lender_of(&id), None);
    assert_eq!(client.principal_of(&id), 1_000_000);
    assert_eq!(client.interest_of(&id), 20_000);
    assert_eq!(client.state_of(&id), Some(DebtState::Requested));
}

#[test]
fn test_create_debt_requires_manager_auth() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, manager) = setup(&env);
    let borrower = Address::generate(&env);

    client.create_debt(&debt_id(&env, 1), &borrower, &1_000, &20);

    assert!(
        env.auths().iter().any(|(addr, _)| *addr == manager),
        "create_debt must require manager authorization"
    );
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn test_create_debt_rejects_unwired_caller() {
    let env = Env::default();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);

    client.create_debt(&debt_id(&env, 1), &borrower, &1_000, &20);
}

#[test]
fn test_create_debt_rejects_zero_amounts() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);

    assert_eq!(
        client.try_create_debt(&debt_id(&env, 1), &borrower, &0, &20),
        Err(Ok(LedgerError::InvalidAmount))
    );
    assert_eq!(
        client.try_create_debt(&debt_id(&env, 1), &borrower, &1_000, &0),
        Err(Ok(LedgerError::InvalidAmount))
    );
    assert_eq!(
        client.try_create_debt(&debt_id(&env, 1), &borrower, &-1, &20),
        Err(Ok(LedgerError::InvalidAmount))
    );
    assert!(client.get_debt(&debt_id(&env, 1)).is_none());
}

#[test]
fn test_create_debt_id_is_never_reused() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let other = Address::generate(&env);
    let id = debt_id(&env, 7);

    client.create_debt(&id, &borrower, &1_000, &20);
    assert_eq!(
        client.try_create_debt(&id, &other, &5_000, &100),
        Err(Ok(LedgerError::DebtAlreadyExists))
    );

    // the original record is untouched
    let debt = client.get_debt(&id).unwrap();
    assert_eq!(debt.borrower, borrower);
    assert_eq!(debt.principal, 1_000);
}

#[test]
fn test_assign_lender_moves_to_funded() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let lender = Address::generate(&env);
    let id = debt_id(&env, 1);

    client.create_debt(&id, &borrower, &1_000, &20);
    client.assign_lender(&id, &lender);

    assert_eq!(client.lender_of(&id), Some(lender));
    assert_eq!(client.state_of(&id), Some(DebtState::Funded));
}

#[test]
fn test_assign_lender_only_once() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let lender = Address::generate(&env);
    let second = Address::generate(&env);
    let id = debt_id(&env, 1);

    client.create_debt(&id, &borrower, &1_000, &20);
    client.assign_lender(&id, &lender);

    assert_eq!(
        client.try_assign_lender(&id, &second),
        Err(Ok(LedgerError::LenderAlreadyAssigned))
    );
    assert_eq!(client.lender_of(&id), Some(lender));
}

#[test]
fn test_assign_lender_unknown_debt() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let lender = Address::generate(&env);

    assert_eq!(
        client.try_assign_lender(&debt_id(&env, 9), &lender),
        Err(Ok(LedgerError::DebtNotFound))
    );
}

#[test]
fn test_mark_paid_sets_state() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let lender = Address::generate(&env);
    let id = debt_id(&env, 1);

    client.create_debt(&id, &borrower, &1_000, &20);
    client.assign_lender(&id, &lender);
    client.mark_paid(&id);

    let debt = client.get_debt(&id).unwrap();
    assert_eq!(debt.state, DebtState::Paid);
    // a paid debt stays queryable with its parties
    assert_eq!(debt.lender, Some(lender));
    assert_eq!(debt.borrower, borrower);
}

#[test]
fn test_mark_paid_unknown_debt() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);

    assert_eq!(
        client.try_mark_paid(&debt_id(&env, 3)),
        Err(Ok(LedgerError::DebtNotFound))
    );
}

#[test]
fn test_unknown_debt_reads_are_empty() {
    let env = Env::default();
    let (client, _admin, _manager) = setup(&env);
    let id = debt_id(&env, 42);

    assert!(client.get_debt(&id).is_none());
    assert_eq!(client.borrower_of(&id), None);
    assert_eq!(client.lender_of(&id), None);
    assert_eq!(client.principal_of(&id), 0);
    assert_eq!(client.interest_of(&id), 0);
    assert_eq!(client.state_of(&id), None);
}

#[test]
fn test_set_active_flag() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);

    assert!(!client.is_active(&borrower));
    client.set_active(&borrower, &true);
    assert!(client.is_active(&borrower));
    client.set_active(&borrower, &false);
    assert!(!client.is_active(&borrower));
}

#[test]
fn test_histories_are_append_only() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let lender = Address::generate(&env);
    let first = debt_id(&env, 1);
    let second = debt_id(&env, 2);

    client.create_debt(&first, &borrower, &1_000, &20);
    client.create_debt(&second, &borrower, &2_000, &40);
    client.assign_lender(&second, &lender);
    client.mark_paid(&second);

    let borrowed = client.borrow_history(&borrower, &borrower);
    assert_eq!(borrowed.len(), 2);
    assert_eq!(borrowed.get(0).unwrap(), first);
    assert_eq!(borrowed.get(1).unwrap(), second);

    let lent = client.lend_history(&lender, &lender);
    assert_eq!(lent.len(), 1);
    assert_eq!(lent.get(0).unwrap(), second);

    assert_eq!(client.lend_history(&borrower, &borrower).len(), 0);
}

#[test]
fn test_admin_can_read_any_history() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);

    client.create_debt(&debt_id(&env, 1), &borrower, &1_000, &20);

    assert_eq!(client.borrow_history(&admin, &borrower).len(), 1);
}

#[test]
fn test_stranger_cannot_read_history() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let stranger = Address::generate(&env);

    client.create_debt(&debt_id(&env, 1), &borrower, &1_000, &20);

    assert_eq!(
        client.try_borrow_history(&stranger, &borrower),
        Err(Ok(LedgerError::Unauthorized))
    );
    assert_eq!(
        client.try_lend_history(&stranger, &borrower),
        Err(Ok(LedgerError::Unauthorized))
    );
}

#[test]
fn test_init_only_once() {
    let env = Env::default();
    let (client, admin, manager) = setup(&env);

    assert_eq!(
        client.try_init(&admin, &manager),
        Err(Ok(LedgerError::AlreadyInitialized))
    );
}

#[test]
fn test_set_manager_rewires_capability() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, admin, _manager) = setup(&env);
    let replacement = Address::generate(&env);
    let borrower = Address::generate(&env);

    client.set_manager(&replacement);
    assert!(env.auths().iter().any(|(addr, _)| *addr == admin));

    client.create_debt(&debt_id(&env, 1), &borrower, &1_000, &20);
    assert!(
        env.auths().iter().any(|(addr, _)| *addr == replacement),
        "mutations must be authorized by the new manager"
    );
}

#[test]
fn test_event_create_and_fund() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin, _manager) = setup(&env);
    let borrower = Address::generate(&env);
    let lender = Address::generate(&env);
    let id = debt_id(&env, 1);

    client.create_debt(&id, &borrower, &1_000, &20);
    let events = env.events().all();
    let (_contract, topics, data) = events.last().unwrap();
    assert_eq!(
        Symbol::try_from_val(&env, &topics.get(0).unwrap()).unwrap(),
        symbol_short!("loandb")
    );
    assert_eq!(
        Symbol::try_from_val(&env, &topics.get(1).unwrap()).unwrap(),
        symbol_short!("created")
    );
    let event: DebtEvent = data.try_into_val(&env).unwrap();
    assert_eq!(event.debt_id, id);
    assert_eq!(event.state, DebtState::Requested);

    client.assign_lender(&id, &lender);
    let events = env.events().all();
    let (_contract, topics, data) = events.last().unwrap();
    assert_eq!(
        Symbol::try_from_val(&env, &topics.get(1).unwrap()).unwrap(),
        symbol_short!("funded")
    );
    let event: DebtEvent = data.try_into_val(&env).unwrap();
    assert_eq!(event.lender, Some(lender));
    assert_eq!(event.state, DebtState::Funded);
}
