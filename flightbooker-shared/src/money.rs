use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Whole-unit amount with its currency. Mock fares carry no cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: u32,
    pub currency: String,
}

impl Money {
    pub fn new(amount: u32, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.currency == DEFAULT_CURRENCY {
            write!(f, "${}.00", self.amount)
        } else {
            write!(f, "{} {}.00", self.currency, self.amount)
        }
    }
}
