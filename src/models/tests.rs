#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::transaction::parse_amount;
use super::*;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_form(date: &str, category: &str, kind: &str, amount: &str) -> EntryForm {
    EntryForm {
        date: date.into(),
        category: category.into(),
        kind: kind.into(),
        amount: amount.into(),
        note: String::new(),
    }
}

// ── Kind ──────────────────────────────────────────────────────

#[test]
fn test_kind_parse() {
    assert_eq!(Kind::parse("income"), Some(Kind::Income));
    assert_eq!(Kind::parse("INCOME"), Some(Kind::Income));
    assert_eq!(Kind::parse(" expense "), Some(Kind::Expense));
    assert_eq!(Kind::parse("gasto"), Some(Kind::Expense));
    assert_eq!(Kind::parse("transfer"), None);
    assert_eq!(Kind::parse(""), None);
}

#[test]
fn test_kind_roundtrip() {
    for k in Kind::all() {
        assert_eq!(Kind::parse(k.as_str()), Some(*k));
    }
}

#[test]
fn test_kind_toggled() {
    assert_eq!(Kind::Income.toggled(), Kind::Expense);
    assert_eq!(Kind::Expense.toggled(), Kind::Income);
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_signed_amount() {
    let mut txn = Transaction {
        id: 1,
        date: day("2024-06-10"),
        category: "Food".into(),
        kind: Kind::Expense,
        amount: dec!(12.50),
        note: String::new(),
    };
    assert!(!txn.is_income());
    assert_eq!(txn.signed_amount(), dec!(-12.50));

    txn.kind = Kind::Income;
    assert!(txn.is_income());
    assert_eq!(txn.signed_amount(), dec!(12.50));
}

#[test]
fn test_transaction_json_shape() {
    let txn = Transaction {
        id: 1718000000000,
        date: day("2024-06-10"),
        category: "Food".into(),
        kind: Kind::Expense,
        amount: dec!(50),
        note: "lunch".into(),
    };
    let value = serde_json::to_value(&txn).unwrap();
    assert_eq!(value["id"], 1718000000000_i64);
    assert_eq!(value["date"], "2024-06-10");
    assert_eq!(value["type"], "expense");
    assert_eq!(value["amount"].as_f64(), Some(50.0));
    assert_eq!(value["note"], "lunch");
}

#[test]
fn test_transaction_reads_stored_format() {
    let raw = r#"{"id":1700000000000,"date":"2024-03-01","category":"Salary","type":"income","amount":1200.5}"#;
    let txn: Transaction = serde_json::from_str(raw).unwrap();
    assert_eq!(txn.kind, Kind::Income);
    assert_eq!(txn.amount, dec!(1200.5));
    assert!(txn.note.is_empty());
    assert!(txn.is_valid());
}

#[test]
fn test_transaction_rejects_unknown_kind() {
    let raw = r#"{"id":1,"date":"2024-03-01","category":"X","type":"refund","amount":1}"#;
    assert!(serde_json::from_str::<Transaction>(raw).is_err());
}

#[test]
fn test_transaction_invalid_when_not_positive() {
    let raw = r#"{"id":1,"date":"2024-03-01","category":"X","type":"expense","amount":-4}"#;
    let txn: Transaction = serde_json::from_str(raw).unwrap();
    assert!(!txn.is_valid());
}

// ── EntryForm ─────────────────────────────────────────────────

#[test]
fn test_form_defaults() {
    let form = EntryForm::new(day("2024-06-10"));
    assert_eq!(form.date, "2024-06-10");
    assert_eq!(form.kind, "expense");
    assert_eq!(form.category, DEFAULT_CATEGORIES[0]);
    assert!(form.amount.is_empty());
}

#[test]
fn test_form_parse_ok() {
    let mut form = make_form("2024-06-10", " Food ", "expense", "$1,250.75");
    form.note = "  rent share ".into();
    let new = form.parse().unwrap();
    assert_eq!(new.date, day("2024-06-10"));
    assert_eq!(new.category, "Food");
    assert_eq!(new.kind, Kind::Expense);
    assert_eq!(new.amount, dec!(1250.75));
    assert_eq!(new.note, "rent share");
}

#[test]
fn test_form_rejects_bad_date() {
    let form = make_form("", "Food", "expense", "10");
    assert_eq!(form.parse(), Err(InputError::InvalidDate));
    let form = make_form("2024-02-30", "Food", "expense", "10");
    assert_eq!(form.parse(), Err(InputError::InvalidDate));
}

#[test]
fn test_form_rejects_missing_category() {
    let form = make_form("2024-06-10", "   ", "expense", "10");
    assert_eq!(form.parse(), Err(InputError::MissingCategory));
}

#[test]
fn test_form_rejects_unknown_kind() {
    let form = make_form("2024-06-10", "Food", "loan", "10");
    assert_eq!(form.parse(), Err(InputError::InvalidKind));
}

#[test]
fn test_form_rejects_bad_amounts() {
    for bad in ["", "abc", "0", "-5", "0.00", "NaN"] {
        let form = make_form("2024-06-10", "Food", "expense", bad);
        assert_eq!(form.parse(), Err(InputError::InvalidAmount), "accepted {bad:?}");
    }
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("100.50"), Some(dec!(100.50)));
    assert_eq!(parse_amount(" 1,000 "), Some(dec!(1000)));
    assert_eq!(parse_amount("0.01"), Some(dec!(0.01)));
    assert_eq!(parse_amount("-1"), None);
    assert_eq!(parse_amount("inf"), None);
}

#[test]
fn test_parse_amount_ceiling() {
    assert_eq!(transaction::MAX_AMOUNT, dec!(1000000000000));
    assert_eq!(parse_amount("1,000,000,000,000"), Some(transaction::MAX_AMOUNT));
    assert_eq!(parse_amount("1000000000000.01"), None);
    assert_eq!(parse_amount("50000000000000000000000000000"), None);

    let form = make_form("2024-06-10", "Food", "expense", "5e28");
    assert_eq!(form.parse(), Err(InputError::InvalidAmount));
}

#[test]
fn test_transaction_invalid_above_ceiling() {
    let raw = r#"{"id":1,"date":"2024-03-01","category":"X","type":"expense","amount":1e20}"#;
    let txn: Transaction = serde_json::from_str(raw).unwrap();
    assert!(!txn.is_valid());
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_is_set() {
    assert!(!Budget::unset().is_set());
    assert!(!Budget::new(Decimal::ZERO).is_set());
    assert!(Budget::new(dec!(500)).is_set());
}

#[test]
fn test_budget_parse() {
    assert_eq!(Budget::parse("1,500"), Some(Budget::new(dec!(1500))));
    for zero in ["0", "0.00", "$0", " 0,0 "] {
        assert_eq!(Budget::parse(zero), Some(Budget::unset()), "{zero:?}");
    }
    assert_eq!(Budget::parse("-10"), None);
    assert_eq!(Budget::parse("lots"), None);
    assert_eq!(Budget::parse("1000000000001"), None);
}

#[test]
fn test_budget_json_is_bare_number() {
    let json = serde_json::to_string(&Budget::new(dec!(250))).unwrap();
    assert_eq!(json, "250.0");
    let back: Budget = serde_json::from_str("300").unwrap();
    assert_eq!(back.limit, dec!(300));
}

// ── Theme ─────────────────────────────────────────────────────

#[test]
fn test_theme_parse_and_toggle() {
    assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse("sepia"), None);
    assert_eq!(Theme::default(), Theme::Light);
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
}

#[test]
fn test_theme_json() {
    assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    let t: Theme = serde_json::from_str("\"light\"").unwrap();
    assert_eq!(t, Theme::Light);
}
