use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Kind, Transaction};

/// Totals derived from a list of transactions. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) count: usize,
    /// Expense total per category. Income never appears here.
    pub(crate) by_category: BTreeMap<String, Decimal>,
}

/// Input for the category chart, parallel vectors in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChartData {
    pub(crate) labels: Vec<String>,
    pub(crate) data: Vec<Decimal>,
}

impl Summary {
    pub(crate) fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut summary = Self::default();

        for txn in transactions {
            summary.count += 1;
            // Totals saturate at Decimal::MAX instead of overflowing.
            match txn.kind {
                Kind::Income => summary.income = summary.income.saturating_add(txn.amount),
                Kind::Expense => {
                    summary.expense = summary.expense.saturating_add(txn.amount);
                    if txn.amount > Decimal::ZERO {
                        let total = summary
                            .by_category
                            .entry(txn.category.clone())
                            .or_insert(Decimal::ZERO);
                        *total = total.saturating_add(txn.amount);
                    }
                }
            }
        }

        summary.balance = summary.income.saturating_sub(summary.expense);
        summary
    }

    /// Categories sorted by amount, largest first; ties break on the label.
    pub(crate) fn ranked_categories(&self) -> Vec<(&str, Decimal)> {
        let mut ranked: Vec<(&str, Decimal)> = self
            .by_category
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub(crate) fn chart(&self) -> ChartData {
        let (labels, data) = self
            .ranked_categories()
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .unzip();
        ChartData { labels, data }
    }
}

impl ChartData {
    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }
}
