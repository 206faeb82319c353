use rust_decimal::Decimal;

use super::{BudgetStatus, Summary};

const TOP_CATEGORY_SHARE: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
const HEALTHY_SAVINGS_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Suggestion {
    Empty,
    Overspending { deficit: Decimal },
    BudgetExceeded { over: Decimal },
    BudgetNearLimit { percent: Decimal },
    SetBudget,
    TopCategory { category: String, share: Decimal },
    HealthySavings { rate: Decimal },
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Record your first transaction to get started"),
            Self::Overspending { deficit } => write!(
                f,
                "You are spending {:.2} more than you earn; review non-essential expenses",
                deficit.round_dp(2)
            ),
            Self::BudgetExceeded { over } => write!(
                f,
                "Monthly budget exceeded by {:.2}; pause discretionary spending",
                over.round_dp(2)
            ),
            Self::BudgetNearLimit { percent } => write!(
                f,
                "{}% of the budget is used; plan the rest of the month carefully",
                percent.round_dp(0)
            ),
            Self::SetBudget => write!(f, "Set a monthly budget to track your spending"),
            Self::TopCategory { category, share } => write!(
                f,
                "{category} takes {}% of your expenses; look for savings there",
                share.round_dp(0)
            ),
            Self::HealthySavings { rate } => write!(
                f,
                "Nice work: you are saving {}% of your income",
                rate.round_dp(0)
            ),
        }
    }
}

/// Advice derived from the current totals and budget, most urgent first.
pub(crate) fn suggest(summary: &Summary, budget: &BudgetStatus) -> Vec<Suggestion> {
    if summary.count == 0 {
        return vec![Suggestion::Empty];
    }

    let mut out = Vec::new();
    let hundred = Decimal::ONE_HUNDRED;

    if summary.balance < Decimal::ZERO {
        out.push(Suggestion::Overspending {
            deficit: summary.balance.abs(),
        });
    }

    match budget {
        BudgetStatus::Tracking { remaining, .. } if budget.is_exceeded() => {
            out.push(Suggestion::BudgetExceeded {
                over: remaining.abs(),
            });
        }
        BudgetStatus::Tracking { percent, .. } if budget.is_near_limit() => {
            out.push(Suggestion::BudgetNearLimit { percent: *percent });
        }
        BudgetStatus::NoBudget if summary.expense > Decimal::ZERO => {
            out.push(Suggestion::SetBudget);
        }
        _ => {}
    }

    if summary.by_category.len() >= 2 && summary.expense > Decimal::ZERO {
        if let Some((category, amount)) = summary.ranked_categories().first() {
            let share = *amount / summary.expense * hundred;
            if share >= TOP_CATEGORY_SHARE {
                out.push(Suggestion::TopCategory {
                    category: category.to_string(),
                    share,
                });
            }
        }
    }

    if out.is_empty() && summary.income > Decimal::ZERO {
        let rate = summary.balance / summary.income * hundred;
        if rate >= HEALTHY_SAVINGS_RATE {
            out.push(Suggestion::HealthySavings { rate });
        }
    }

    out
}
