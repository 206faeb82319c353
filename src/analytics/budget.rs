use rust_decimal::Decimal;

use crate::models::Budget;

const NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetStatus {
    NoBudget,
    Tracking {
        limit: Decimal,
        spent: Decimal,
        /// Share of the limit used, clamped to `0..=100`.
        percent: Decimal,
        /// Negative once the limit is exceeded.
        remaining: Decimal,
    },
}

impl BudgetStatus {
    pub(crate) fn evaluate(budget: Budget, total_expense: Decimal) -> Self {
        if !budget.is_set() {
            return Self::NoBudget;
        }
        let limit = budget.limit;
        // Only a huge spend relative to the limit can overflow.
        let percent = total_expense
            .checked_div(limit)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .unwrap_or(HUNDRED)
            .clamp(Decimal::ZERO, HUNDRED);
        Self::Tracking {
            limit,
            spent: total_expense,
            percent,
            remaining: limit.saturating_sub(total_expense),
        }
    }

    pub(crate) fn percent(&self) -> Decimal {
        match self {
            Self::NoBudget => Decimal::ZERO,
            Self::Tracking { percent, .. } => *percent,
        }
    }

    pub(crate) fn is_exceeded(&self) -> bool {
        matches!(self, Self::Tracking { remaining, .. } if *remaining < Decimal::ZERO)
    }

    pub(crate) fn is_near_limit(&self) -> bool {
        matches!(self, Self::Tracking { percent, .. } if *percent >= NEAR_LIMIT_PERCENT)
    }

    pub(crate) fn status_text(&self) -> String {
        match self {
            Self::NoBudget => "No budget set".to_string(),
            Self::Tracking { remaining, .. } if *remaining < Decimal::ZERO => {
                format!("Budget exceeded by {:.2}", remaining.abs().round_dp(2))
            }
            Self::Tracking {
                limit,
                percent,
                remaining,
                ..
            } => format!(
                "Used {}% of {:.2} ({:.2} left)",
                percent.round_dp(0),
                limit.round_dp(2),
                remaining.round_dp(2)
            ),
        }
    }
}
