use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{is_amount_in_range, parse_decimal};

/// The monthly expense ceiling. Zero means no budget has been set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Budget {
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) limit: Decimal,
}

impl Budget {
    pub(crate) fn new(limit: Decimal) -> Self {
        Self { limit }
    }

    pub(crate) fn unset() -> Self {
        Self::default()
    }

    /// Parse a typed limit. Any zero value clears the budget.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let limit = parse_decimal(s)?;
        if limit.is_zero() {
            Some(Self::unset())
        } else if is_amount_in_range(limit) {
            Some(Self::new(limit))
        } else {
            None
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.limit > Decimal::ZERO
    }
}
