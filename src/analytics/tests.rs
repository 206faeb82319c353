#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Budget, Kind, Transaction};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_txn(id: i64, kind: Kind, amount: Decimal, category: &str) -> Transaction {
    Transaction {
        id,
        date: day("2024-06-10"),
        category: category.into(),
        kind,
        amount,
        note: String::new(),
    }
}

fn dated(id: i64, date: &str, kind: Kind, category: &str, note: &str) -> Transaction {
    Transaction {
        id,
        date: day(date),
        category: category.into(),
        kind,
        amount: dec!(10),
        note: note.into(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        make_txn(5, Kind::Expense, dec!(30.10), "Transport"),
        make_txn(4, Kind::Income, dec!(1200), "Salary"),
        make_txn(3, Kind::Expense, dec!(45.25), "Food"),
        make_txn(2, Kind::Expense, dec!(19.99), "Food"),
        make_txn(1, Kind::Income, dec!(80.5), "Freelance"),
    ]
}

// ── Summary ───────────────────────────────────────────────────

#[test]
fn test_summary_empty() {
    let none: Vec<Transaction> = Vec::new();
    let s = Summary::of(&none);
    assert_eq!(s.income, Decimal::ZERO);
    assert_eq!(s.expense, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.count, 0);
    assert!(s.by_category.is_empty());
    assert!(s.chart().is_empty());
}

#[test]
fn test_summary_scenario() {
    let txns = vec![
        make_txn(2, Kind::Expense, dec!(50), "food"),
        make_txn(1, Kind::Income, dec!(200), "Salary"),
    ];
    let s = Summary::of(&txns);
    assert_eq!(s.income, dec!(200));
    assert_eq!(s.expense, dec!(50));
    assert_eq!(s.balance, dec!(150));
    assert_eq!(s.count, 2);
    assert_eq!(s.by_category.len(), 1);
    assert_eq!(s.by_category.get("food"), Some(&dec!(50)));
}

#[test]
fn test_summary_balance_is_exact() {
    let s = Summary::of(&sample());
    assert_eq!(s.income, dec!(1280.5));
    assert_eq!(s.expense, dec!(95.34));
    assert_eq!(s.income - s.expense, s.balance);
    assert_eq!(s.balance, dec!(1185.16));
}

#[test]
fn test_summary_breakdown_is_expense_only() {
    let s = Summary::of(&sample());
    assert_eq!(s.by_category.get("Food"), Some(&dec!(65.24)));
    assert_eq!(s.by_category.get("Transport"), Some(&dec!(30.10)));
    assert!(!s.by_category.contains_key("Salary"));
    assert!(!s.by_category.contains_key("Freelance"));
}

#[test]
fn test_summary_income_only_has_no_categories() {
    let txns = vec![make_txn(1, Kind::Income, dec!(10), "Salary")];
    let s = Summary::of(&txns);
    assert!(s.by_category.is_empty());
    assert_eq!(s.balance, dec!(10));
}

#[test]
fn test_summary_is_idempotent() {
    let txns = sample();
    assert_eq!(Summary::of(&txns), Summary::of(&txns));
}

#[test]
fn test_summary_of_filtered_refs() {
    let txns = sample();
    let filter = Filter {
        kind: Some(Kind::Income),
        ..Filter::default()
    };
    let s = Summary::of(filter.apply(&txns));
    assert_eq!(s.count, 2);
    assert_eq!(s.expense, Decimal::ZERO);
}

#[test]
fn test_chart_order() {
    let chart = Summary::of(&sample()).chart();
    assert_eq!(chart.labels, vec!["Food".to_string(), "Transport".to_string()]);
    assert_eq!(chart.data, vec![dec!(65.24), dec!(30.10)]);
    let pairs: Vec<(&str, Decimal)> = chart.iter().collect();
    assert_eq!(pairs[0], ("Food", dec!(65.24)));
}

#[test]
fn test_chart_ties_sorted_by_label() {
    let txns = vec![
        make_txn(2, Kind::Expense, dec!(5), "Zoo"),
        make_txn(1, Kind::Expense, dec!(5), "Art"),
    ];
    let chart = Summary::of(&txns).chart();
    assert_eq!(chart.labels, vec!["Art".to_string(), "Zoo".to_string()]);
}

// ── BudgetStatus ──────────────────────────────────────────────

#[test]
fn test_budget_unset() {
    let status = BudgetStatus::evaluate(Budget::unset(), dec!(150));
    assert_eq!(status, BudgetStatus::NoBudget);
    assert_eq!(status.percent(), Decimal::ZERO);
    assert_eq!(status.status_text(), "No budget set");
    assert!(!status.is_exceeded());
}

#[test]
fn test_budget_clamped_at_hundred() {
    let status = BudgetStatus::evaluate(Budget::new(dec!(100)), dec!(150));
    assert_eq!(status.percent(), dec!(100));
    assert!(status.is_exceeded());
    assert!(status.is_near_limit());
    assert_eq!(status.status_text(), "Budget exceeded by 50.00");
}

#[test]
fn test_budget_partial_usage() {
    let status = BudgetStatus::evaluate(Budget::new(dec!(200)), dec!(90));
    assert_eq!(status.percent(), dec!(45));
    assert!(!status.is_exceeded());
    assert!(!status.is_near_limit());
    assert_eq!(status.status_text(), "Used 45% of 200.00 (110.00 left)");
}

#[test]
fn test_budget_near_limit() {
    let status = BudgetStatus::evaluate(Budget::new(dec!(100)), dec!(80));
    assert!(status.is_near_limit());
    assert!(!status.is_exceeded());
}

#[test]
fn test_budget_percent_always_in_range() {
    let budget = Budget::new(dec!(37.5));
    for spent in [dec!(0), dec!(0.01), dec!(37.5), dec!(1000), dec!(99999999)] {
        let p = BudgetStatus::evaluate(budget, spent).percent();
        assert!(p >= Decimal::ZERO && p <= dec!(100), "{spent} -> {p}");
    }
}

#[test]
fn test_budget_percent_caps_when_ratio_overflows() {
    let huge = Decimal::from_i128_with_scale(10i128.pow(27), 0);
    let status = BudgetStatus::evaluate(Budget::new(dec!(1)), huge);
    assert_eq!(status.percent(), dec!(100));
    assert!(status.is_exceeded());

    let status = BudgetStatus::evaluate(Budget::new(dec!(0.01)), Decimal::MAX);
    assert_eq!(status.percent(), dec!(100));
    assert!(status.is_exceeded());
}

#[test]
fn test_summary_saturates_instead_of_overflowing() {
    let big = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
    let txns = vec![
        make_txn(2, Kind::Expense, big, "Food"),
        make_txn(1, Kind::Expense, big, "Food"),
    ];
    let summary = Summary::of(&txns);
    assert_eq!(summary.expense, Decimal::MAX);
    assert_eq!(summary.by_category["Food"], Decimal::MAX);
    assert_eq!(summary.balance, Decimal::MIN);
    assert_eq!(summary.count, 2);

    let status = BudgetStatus::evaluate(Budget::new(dec!(100)), summary.expense);
    assert_eq!(status.percent(), dec!(100));
}

// ── Filter ────────────────────────────────────────────────────

#[test]
fn test_filter_empty_matches_all() {
    let txns = sample();
    let filter = Filter::default();
    assert!(filter.is_empty());
    assert_eq!(filter.apply(&txns).len(), txns.len());
    assert_eq!(filter.describe(), "all");
}

#[test]
fn test_filter_date_range_inclusive() {
    let txns = vec![
        dated(3, "2024-07-01", Kind::Expense, "Food", ""),
        dated(2, "2024-06-30", Kind::Expense, "Food", ""),
        dated(1, "2024-06-01", Kind::Expense, "Food", ""),
        dated(0, "2024-05-31", Kind::Expense, "Food", ""),
    ];
    let filter = Filter::whole_month(day("2024-06-15"));
    let ids: Vec<i64> = filter.apply(&txns).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_filter_month_to_date() {
    let filter = Filter::month_to_date(day("2024-02-20"));
    assert_eq!(filter.from, Some(day("2024-02-01")));
    assert_eq!(filter.to, Some(day("2024-02-20")));
}

#[test]
fn test_filter_whole_month_end() {
    let filter = Filter::whole_month(day("2024-02-01"));
    assert_eq!(filter.to, Some(day("2024-02-29")));
    let filter = Filter::whole_month(day("2024-12-05"));
    assert_eq!(filter.from, Some(day("2024-12-01")));
    assert_eq!(filter.to, Some(day("2024-12-31")));
}

#[test]
fn test_filter_category_case_insensitive() {
    let txns = sample();
    let filter = Filter {
        category: Some("food".into()),
        ..Filter::default()
    };
    assert_eq!(filter.apply(&txns).len(), 2);
}

#[test]
fn test_filter_kind() {
    let txns = sample();
    let filter = Filter {
        kind: Some(Kind::Expense),
        ..Filter::default()
    };
    assert!(filter.apply(&txns).iter().all(|t| t.kind == Kind::Expense));
    assert_eq!(filter.apply(&txns).len(), 3);
}

#[test]
fn test_filter_search_note_and_category() {
    let txns = vec![
        dated(3, "2024-06-01", Kind::Expense, "Food", "Pizza night"),
        dated(2, "2024-06-01", Kind::Expense, "Transport", "bus"),
        dated(1, "2024-06-01", Kind::Income, "Salary", ""),
    ];
    let filter = Filter {
        search: "PIZZA".into(),
        ..Filter::default()
    };
    assert_eq!(filter.apply(&txns).len(), 1);

    let filter = Filter {
        search: "sal".into(),
        ..Filter::default()
    };
    assert_eq!(filter.apply(&txns)[0].id, 1);
}

#[test]
fn test_filter_preserves_order() {
    let txns = sample();
    let filter = Filter {
        kind: Some(Kind::Expense),
        ..Filter::default()
    };
    let ids: Vec<i64> = filter.apply(&txns).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![5, 3, 2]);
}

#[test]
fn test_filter_describe() {
    let filter = Filter {
        kind: Some(Kind::Expense),
        search: "bus".into(),
        ..Filter::month_to_date(day("2024-06-10"))
    };
    assert_eq!(filter.describe(), "2024-06-01 to 2024-06-10, expense, 'bus'");
}

// ── Suggestions ───────────────────────────────────────────────

#[test]
fn test_suggest_empty() {
    let s = Summary::default();
    let out = suggest(&s, &BudgetStatus::NoBudget);
    assert_eq!(out, vec![Suggestion::Empty]);
}

#[test]
fn test_suggest_set_budget() {
    let txns = vec![
        make_txn(2, Kind::Expense, dec!(50), "food"),
        make_txn(1, Kind::Income, dec!(200), "Salary"),
    ];
    let s = Summary::of(&txns);
    assert_eq!(suggest(&s, &BudgetStatus::NoBudget), vec![Suggestion::SetBudget]);
}

#[test]
fn test_suggest_overspending_and_exceeded() {
    let txns = vec![
        make_txn(2, Kind::Expense, dec!(150), "Food"),
        make_txn(1, Kind::Income, dec!(100), "Salary"),
    ];
    let s = Summary::of(&txns);
    let status = BudgetStatus::evaluate(Budget::new(dec!(100)), s.expense);
    let out = suggest(&s, &status);
    assert_eq!(
        out,
        vec![
            Suggestion::Overspending { deficit: dec!(50) },
            Suggestion::BudgetExceeded { over: dec!(50) },
        ]
    );
    assert_eq!(
        out[1].to_string(),
        "Monthly budget exceeded by 50.00; pause discretionary spending"
    );
}

#[test]
fn test_suggest_near_limit() {
    let txns = vec![
        make_txn(2, Kind::Expense, dec!(85), "Food"),
        make_txn(1, Kind::Income, dec!(500), "Salary"),
    ];
    let s = Summary::of(&txns);
    let status = BudgetStatus::evaluate(Budget::new(dec!(100)), s.expense);
    let out = suggest(&s, &status);
    assert!(matches!(out[0], Suggestion::BudgetNearLimit { .. }));
}

#[test]
fn test_suggest_top_category() {
    let txns = vec![
        make_txn(3, Kind::Expense, dec!(60), "Food"),
        make_txn(2, Kind::Expense, dec!(40), "Transport"),
        make_txn(1, Kind::Income, dec!(1000), "Salary"),
    ];
    let s = Summary::of(&txns);
    let status = BudgetStatus::evaluate(Budget::new(dec!(500)), s.expense);
    let out = suggest(&s, &status);
    assert_eq!(out.len(), 1);
    match &out[0] {
        Suggestion::TopCategory { category, share } => {
            assert_eq!(category, "Food");
            assert_eq!(*share, dec!(60));
        }
        other => panic!("unexpected suggestion: {other:?}"),
    }
    assert_eq!(
        out[0].to_string(),
        "Food takes 60% of your expenses; look for savings there"
    );
}

#[test]
fn test_suggest_healthy_savings() {
    let txns = vec![
        make_txn(4, Kind::Expense, dec!(30), "Food"),
        make_txn(3, Kind::Expense, dec!(30), "Transport"),
        make_txn(2, Kind::Expense, dec!(30), "Health"),
        make_txn(1, Kind::Income, dec!(1000), "Salary"),
    ];
    let s = Summary::of(&txns);
    let status = BudgetStatus::evaluate(Budget::new(dec!(500)), s.expense);
    let out = suggest(&s, &status);
    assert_eq!(out, vec![Suggestion::HealthySavings { rate: dec!(91) }]);
}
