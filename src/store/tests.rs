#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::analytics::BudgetStatus;
use crate::models::Kind;

fn new_txn(kind: Kind, amount: rust_decimal::Decimal, category: &str) -> NewTransaction {
    NewTransaction {
        date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        category: category.into(),
        kind,
        amount,
        note: String::new(),
    }
}

fn empty_store() -> Store {
    Store::open(Database::open_in_memory().unwrap()).unwrap()
}

fn store_with_raw(key: Key, raw: &str) -> Store {
    let db = Database::open_in_memory().unwrap();
    db.set(key, raw).unwrap();
    Store::open(db).unwrap()
}

// ── Loading ───────────────────────────────────────────────────

#[test]
fn test_fresh_store_is_empty() {
    let store = empty_store();
    assert!(store.all().is_empty());
    assert!(!store.budget().is_set());
    assert_eq!(store.display_name(), "");
    assert_eq!(store.theme(), Theme::Light);
}

#[test]
fn test_corrupt_transactions_fall_back_to_empty() {
    let store = store_with_raw(Key::Transactions, "{not json");
    assert!(store.all().is_empty());
}

#[test]
fn test_non_array_transactions_fall_back_to_empty() {
    let store = store_with_raw(Key::Transactions, r#"{"id": 1}"#);
    assert!(store.all().is_empty());
}

#[test]
fn test_invalid_records_are_dropped() {
    let raw = r#"[
        {"id":3,"date":"2024-06-03","category":"Food","type":"expense","amount":10,"note":""},
        {"id":2,"date":"2024-06-02","category":"Food","type":"refund","amount":10},
        {"id":1,"date":"not-a-date","category":"Food","type":"expense","amount":10},
        {"id":0,"date":"2024-06-01","category":"Food","type":"expense","amount":0}
    ]"#;
    let store = store_with_raw(Key::Transactions, raw);
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].id, 3);
}

#[test]
fn test_oversized_records_are_dropped() {
    let raw = r#"[
        {"id":3,"date":"2024-06-03","category":"Food","type":"expense","amount":5e28,"note":""},
        {"id":2,"date":"2024-06-02","category":"Food","type":"expense","amount":5e28,"note":""},
        {"id":1,"date":"2024-06-01","category":"Food","type":"expense","amount":12.5,"note":""}
    ]"#;
    let store = store_with_raw(Key::Transactions, raw);
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.summary().expense, dec!(12.5));
}

#[test]
fn test_corrupt_budget_falls_back_to_unset() {
    let store = store_with_raw(Key::Budget, "lots");
    assert!(!store.budget().is_set());
}

#[test]
fn test_corrupt_theme_falls_back_to_light() {
    let store = store_with_raw(Key::Theme, "\"neon\"");
    assert_eq!(store.theme(), Theme::Light);
}

// ── Mutations ─────────────────────────────────────────────────

#[test]
fn test_add_prepends() {
    let mut store = empty_store();
    store.add(new_txn(Kind::Expense, dec!(50), "Food")).unwrap();
    store.add(new_txn(Kind::Income, dec!(200), "Salary")).unwrap();

    let all = store.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category, "Salary");
    assert_eq!(all[1].category, "Food");
    assert!(all[0].id > all[1].id);
}

#[test]
fn test_add_persists() {
    let mut store = empty_store();
    store.add(new_txn(Kind::Expense, dec!(12.34), "Food")).unwrap();

    let reloaded = Store::open(store.db).unwrap();
    assert_eq!(reloaded.all().len(), 1);
    assert_eq!(reloaded.all()[0].amount, dec!(12.34));
    assert_eq!(reloaded.all()[0].kind, Kind::Expense);
}

#[test]
fn test_next_id_is_monotonic() {
    let mut store = empty_store();
    assert_eq!(store.next_id(1_000), 1_000);
    store.add(new_txn(Kind::Expense, dec!(1), "Food")).unwrap();
    let newest = store.all()[0].id;
    assert_eq!(store.next_id(newest), newest + 1);
    assert_eq!(store.next_id(newest - 50), newest + 1);
    assert_eq!(store.next_id(newest + 50), newest + 50);
}

#[test]
fn test_reset_clears_transactions_and_budget() {
    let mut store = empty_store();
    store.add(new_txn(Kind::Expense, dec!(5), "Food")).unwrap();
    store.set_budget(Budget::new(dec!(100))).unwrap();
    store.set_display_name("Ana").unwrap();
    store.set_theme(Theme::Dark).unwrap();

    store.reset().unwrap();
    assert!(store.all().is_empty());
    assert!(!store.budget().is_set());

    let reloaded = Store::open(store.db).unwrap();
    assert!(reloaded.all().is_empty());
    assert!(!reloaded.budget().is_set());
    assert_eq!(reloaded.display_name(), "Ana");
    assert_eq!(reloaded.theme(), Theme::Dark);
}

#[test]
fn test_budget_persists_and_clears() {
    let mut store = empty_store();
    store.set_budget(Budget::new(dec!(750.50))).unwrap();
    assert_eq!(store.db.get(Key::Budget).unwrap().as_deref(), Some("750.5"));

    store.set_budget(Budget::unset()).unwrap();
    assert_eq!(store.db.get(Key::Budget).unwrap(), None);
}

#[test]
fn test_preferences_persist() {
    let mut store = empty_store();
    store.set_display_name("  Lucía ").unwrap();
    store.set_theme(Theme::Dark).unwrap();

    let reloaded = Store::open(store.db).unwrap();
    assert_eq!(reloaded.display_name(), "Lucía");
    assert_eq!(reloaded.theme(), Theme::Dark);
}

// ── Derived views ─────────────────────────────────────────────

#[test]
fn test_summary_and_budget_status() {
    let mut store = empty_store();
    store.add(new_txn(Kind::Expense, dec!(150), "Food")).unwrap();
    store.set_budget(Budget::new(dec!(100))).unwrap();

    assert_eq!(store.summary().expense, dec!(150));
    match store.budget_status() {
        BudgetStatus::Tracking { percent, .. } => assert_eq!(percent, dec!(100)),
        BudgetStatus::NoBudget => panic!("expected a tracked budget"),
    }
}
