use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category labels offered by the entry form. Any non-empty label is accepted.
pub(crate) const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Education",
    "Entertainment",
    "Health",
    "Salary",
    "Other",
];

/// Largest amount accepted anywhere. Keeps totals far from `Decimal`
/// overflow and exact through the float JSON encoding.
pub(super) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Strict parse; unknown labels are rejected rather than defaulted.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "ingreso" => Some(Self::Income),
            "expense" | "out" | "gasto" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [Kind] {
        &[Self::Income, Self::Expense]
    }

    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: i64,
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    #[serde(rename = "type")]
    pub(crate) kind: Kind,
    #[serde(with = "rust_decimal::serde::float")]
    pub(crate) amount: Decimal,
    #[serde(default)]
    pub(crate) note: String,
}

impl Transaction {
    pub(crate) fn from_new(id: i64, new: NewTransaction) -> Self {
        Self {
            id,
            date: new.date,
            category: new.category,
            kind: new.kind,
            amount: new.amount,
            note: new.note,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    /// Amount with the sign implied by the kind.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }

    /// Whether a record read back from storage still satisfies the entry rules.
    pub(crate) fn is_valid(&self) -> bool {
        is_amount_in_range(self.amount) && !self.category.trim().is_empty()
    }
}

/// A validated transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewTransaction {
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    pub(crate) kind: Kind,
    pub(crate) amount: Decimal,
    pub(crate) note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum InputError {
    #[error("Enter a valid date (YYYY-MM-DD)")]
    InvalidDate,
    #[error("Choose a category")]
    MissingCategory,
    #[error("Type must be income or expense")]
    InvalidKind,
    #[error("Enter an amount greater than zero")]
    InvalidAmount,
}

/// Raw entry-form text, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EntryForm {
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) kind: String,
    pub(crate) amount: String,
    pub(crate) note: String,
}

impl EntryForm {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            category: DEFAULT_CATEGORIES[0].to_string(),
            kind: Kind::Expense.as_str().to_string(),
            amount: String::new(),
            note: String::new(),
        }
    }

    pub(crate) fn parse(&self) -> Result<NewTransaction, InputError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| InputError::InvalidDate)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(InputError::MissingCategory);
        }

        let kind = Kind::parse(&self.kind).ok_or(InputError::InvalidKind)?;
        let amount = parse_amount(&self.amount).ok_or(InputError::InvalidAmount)?;

        Ok(NewTransaction {
            date,
            category: category.to_string(),
            kind,
            amount,
            note: self.note.trim().to_string(),
        })
    }
}

/// Parse a user-typed amount, tolerating `$` and thousands separators.
/// Returns `None` unless the result is positive and at most [`MAX_AMOUNT`].
pub(super) fn parse_amount(s: &str) -> Option<Decimal> {
    parse_decimal(s).filter(|amount| is_amount_in_range(*amount))
}

/// Any decimal, with `$` and `,` stripped.
pub(super) fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

pub(super) fn is_amount_in_range(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}
