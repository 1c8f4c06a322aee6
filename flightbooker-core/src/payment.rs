use flightbooker_shared::Masked;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::validation::{char_len, require_min_len, FieldErrors, Validate};

static EXPIRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("Invalid regex"));

/// Card fields as entered. Number and CVV are masked in `Debug` output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentForm {
    pub card_number: Masked<String>,
    pub card_holder_name: String,
    pub expiry_date: String,
    pub cvv: Masked<String>,
}

/// Accepted card details. Card number length is checked, the Luhn digit is not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: Masked<String>,
    pub card_holder_name: String,
    pub expiry_date: String,
    pub cvv: Masked<String>,
}

impl Validate for PaymentForm {
    type Output = PaymentDetails;

    fn validate(&self) -> Result<PaymentDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        if char_len(self.card_number.expose()) != 16 {
            errors.add("cardNumber", "Card number must be 16 digits");
        }
        require_min_len(
            &mut errors,
            "cardHolderName",
            &self.card_holder_name,
            1,
            "Cardholder name is required",
        );
        if !EXPIRY_PATTERN.is_match(&self.expiry_date) {
            errors.add("expiryDate", "Expiry date must be MM/YY");
        }

        let cvv_len = char_len(self.cvv.expose());
        if cvv_len < 3 {
            errors.add("cvv", "CVV must be 3 digits");
        } else if cvv_len > 4 {
            errors.add("cvv", "CVV can be up to 4 digits");
        }

        errors.finish(|| PaymentDetails {
            card_number: self.card_number.clone(),
            card_holder_name: self.card_holder_name.clone(),
            expiry_date: self.expiry_date.clone(),
            cvv: self.cvv.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> PaymentForm {
        PaymentForm {
            card_number: Masked::new("4111111111111111".to_string()),
            card_holder_name: "Jane Doe".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: Masked::new("123".to_string()),
        }
    }

    #[test]
    fn test_valid_card() {
        let details = card().validate().unwrap();
        assert_eq!(details.expiry_date, "09/27");
        assert!(!format!("{:?}", details).contains("4111"));
    }

    #[test]
    fn test_card_number_length() {
        for number in ["411111111111111", "41111111111111112"] {
            let errors = PaymentForm {
                card_number: Masked::new(number.to_string()),
                ..card()
            }
            .validate()
            .unwrap_err();
            assert_eq!(errors.first("cardNumber"), Some("Card number must be 16 digits"));
        }
    }

    #[test]
    fn test_expiry_pattern() {
        for bad in ["13/25", "00/25", "9/25", "09/2025", "09-25", ""] {
            let errors = PaymentForm {
                expiry_date: bad.to_string(),
                ..card()
            }
            .validate()
            .unwrap_err();
            assert_eq!(errors.first("expiryDate"), Some("Expiry date must be MM/YY"), "{}", bad);
        }
        for good in ["01/30", "12/24"] {
            assert!(PaymentForm {
                expiry_date: good.to_string(),
                ..card()
            }
            .validate()
            .is_ok());
        }
    }

    #[test]
    fn test_cvv_bounds() {
        let short = PaymentForm {
            cvv: Masked::new("12".to_string()),
            ..card()
        };
        assert_eq!(short.validate().unwrap_err().first("cvv"), Some("CVV must be 3 digits"));

        let long = PaymentForm {
            cvv: Masked::new("12345".to_string()),
            ..card()
        };
        assert_eq!(long.validate().unwrap_err().first("cvv"), Some("CVV can be up to 4 digits"));

        let amex = PaymentForm {
            cvv: Masked::new("1234".to_string()),
            ..card()
        };
        assert!(amex.validate().is_ok());
    }
}
