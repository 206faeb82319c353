use chrono::{Datelike, NaiveDate};

use crate::models::{Kind, Transaction};

/// View filter over the transaction list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Filter {
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) category: Option<String>,
    pub(crate) kind: Option<Kind>,
    pub(crate) search: String,
}

impl Filter {
    /// The calendar month containing `date`, from its first day to `date`.
    pub(crate) fn month_to_date(date: NaiveDate) -> Self {
        Self {
            from: date.with_day(1),
            to: Some(date),
            ..Self::default()
        }
    }

    /// The whole calendar month starting at `first`.
    pub(crate) fn whole_month(first: NaiveDate) -> Self {
        let next = first
            .with_day(1)
            .and_then(|d| d.checked_add_months(chrono::Months::new(1)));
        Self {
            from: first.with_day(1),
            to: next.and_then(|d| d.pred_opt()),
            ..Self::default()
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        if self.from.is_some_and(|from| txn.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| txn.date > to) {
            return false;
        }
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        if let Some(ref cat) = self.category {
            if txn.category.to_lowercase() != cat.to_lowercase() {
                return false;
            }
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            return txn.category.to_lowercase().contains(&needle)
                || txn.note.to_lowercase().contains(&needle);
        }
        true
    }

    /// Matching transactions in store order.
    pub(crate) fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }

    /// Short description for titles and the status line.
    pub(crate) fn describe(&self) -> String {
        let mut parts = Vec::new();
        match (self.from, self.to) {
            (Some(from), Some(to)) => parts.push(format!("{from} to {to}")),
            (Some(from), None) => parts.push(format!("from {from}")),
            (None, Some(to)) => parts.push(format!("until {to}")),
            (None, None) => {}
        }
        if let Some(kind) = self.kind {
            parts.push(kind.to_string());
        }
        if let Some(ref cat) = self.category {
            parts.push(format!("category {cat}"));
        }
        if !self.search.is_empty() {
            parts.push(format!("'{}'", self.search));
        }
        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join(", ")
        }
    }
}
