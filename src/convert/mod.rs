use rust_decimal::Decimal;
use std::str::FromStr;

/// USD received for one PEN.
pub(crate) const DEFAULT_RATE: Decimal = Decimal::from_parts(27, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Currency {
    Pen,
    Usd,
}

impl Currency {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Pen => "PEN",
            Self::Usd => "USD",
        }
    }

    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Self::Pen => "S/",
            Self::Usd => "$",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pen" | "s/" | "sol" | "soles" => Some(Self::Pen),
            "usd" | "$" | "dollar" | "dollars" => Some(Self::Usd),
            _ => None,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    PenToUsd,
    UsdToPen,
}

impl Direction {
    pub(crate) fn from_source(source: Currency) -> Self {
        match source {
            Currency::Pen => Self::PenToUsd,
            Currency::Usd => Self::UsdToPen,
        }
    }

    pub(crate) fn source(&self) -> Currency {
        match self {
            Self::PenToUsd => Currency::Pen,
            Self::UsdToPen => Currency::Usd,
        }
    }

    pub(crate) fn target(&self) -> Currency {
        match self {
            Self::PenToUsd => Currency::Usd,
            Self::UsdToPen => Currency::Pen,
        }
    }

    pub(crate) fn reversed(self) -> Self {
        match self {
            Self::PenToUsd => Self::UsdToPen,
            Self::UsdToPen => Self::PenToUsd,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.source(), self.target())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ConvertError {
    #[error("Enter a valid amount greater than zero")]
    InvalidAmount,
    #[error("Exchange rate must be greater than zero, got {0}")]
    InvalidRate(Decimal),
}

/// Fixed-rate PEN/USD conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Converter {
    rate: Decimal,
}

impl Default for Converter {
    fn default() -> Self {
        Self { rate: DEFAULT_RATE }
    }
}

impl Converter {
    pub(crate) fn new(rate: Decimal) -> Result<Self, ConvertError> {
        if rate <= Decimal::ZERO {
            return Err(ConvertError::InvalidRate(rate));
        }
        Ok(Self { rate })
    }

    pub(crate) fn rate(&self) -> Decimal {
        self.rate
    }

    pub(crate) fn convert(&self, amount: Decimal, direction: Direction) -> Result<Decimal, ConvertError> {
        if amount <= Decimal::ZERO {
            return Err(ConvertError::InvalidAmount);
        }
        let result = match direction {
            Direction::PenToUsd => amount.checked_mul(self.rate),
            Direction::UsdToPen => amount.checked_div(self.rate),
        };
        result.ok_or(ConvertError::InvalidAmount)
    }

    /// Parse typed text and convert it. Anything that is not a plain
    /// positive number is rejected.
    pub(crate) fn convert_str(&self, input: &str, direction: Direction) -> Result<Decimal, ConvertError> {
        let amount = Decimal::from_str(input.trim()).map_err(|_| ConvertError::InvalidAmount)?;
        self.convert(amount, direction)
    }
}

#[cfg(test)]
mod tests;
