use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::passenger::{PassengerForm, PassengerRecord, PassengerType};
use crate::payment::{PaymentDetails, PaymentForm};
use crate::validation::{char_len, indexed, FieldErrors, Validate};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("Invalid regex")
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Ancillary {
    ExtraBaggage,
    TravelInsurance,
}

impl Ancillary {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "extra-baggage" | "extraBaggage" => Some(Ancillary::ExtraBaggage),
            "travel-insurance" | "travelInsurance" => Some(Ancillary::TravelInsurance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AncillarySelections {
    pub extra_baggage: bool,
    pub travel_insurance: bool,
}

impl AncillarySelections {
    pub fn is_selected(&self, ancillary: Ancillary) -> bool {
        match ancillary {
            Ancillary::ExtraBaggage => self.extra_baggage,
            Ancillary::TravelInsurance => self.travel_insurance,
        }
    }

    /// Flips the flag and returns its new value.
    pub fn toggle(&mut self, ancillary: Ancillary) -> bool {
        let flag = match ancillary {
            Ancillary::ExtraBaggage => &mut self.extra_baggage,
            Ancillary::TravelInsurance => &mut self.travel_insurance,
        };
        *flag = !*flag;
        *flag
    }
}

/// Everything the passenger and payment screen collects, in its editable form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub passengers: Vec<PassengerForm>,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment: PaymentForm,
    pub ancillaries: AncillarySelections,
    pub agree_to_terms: bool,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            passengers: vec![PassengerForm::blank(PassengerType::Adult)],
            contact_email: String::new(),
            contact_phone: String::new(),
            payment: PaymentForm::default(),
            ancillaries: AncillarySelections::default(),
            agree_to_terms: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub passengers: Vec<PassengerRecord>,
    pub contact_email: String,
    pub contact_phone: String,
    pub payment: PaymentDetails,
    pub ancillaries: AncillarySelections,
    pub agree_to_terms: bool,
}

pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

impl Validate for BookingForm {
    type Output = BookingPayload;

    fn validate(&self) -> Result<BookingPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.passengers.is_empty() {
            errors.add("passengers", "At least one passenger is required");
        }
        let mut passengers = Vec::with_capacity(self.passengers.len());
        for (index, passenger) in self.passengers.iter().enumerate() {
            match passenger.validate() {
                Ok(record) => passengers.push(record),
                Err(nested) => errors.merge_nested(&indexed("passengers", index), nested),
            }
        }

        if !is_valid_email(&self.contact_email) {
            errors.add("contactEmail", "Invalid email address");
        }
        if char_len(&self.contact_phone) < 10 {
            errors.add("contactPhone", "Phone number seems too short");
        }

        let payment = match self.payment.validate() {
            Ok(details) => Some(details),
            Err(nested) => {
                errors.merge_nested("payment", nested);
                None
            }
        };

        if !self.agree_to_terms {
            errors.add("agreeToTerms", "You must agree to the terms and conditions.");
        }

        match payment {
            Some(payment) if errors.is_empty() => Ok(BookingPayload {
                passengers,
                contact_email: self.contact_email.clone(),
                contact_phone: self.contact_phone.clone(),
                payment,
                ancillaries: self.ancillaries,
                agree_to_terms: self.agree_to_terms,
            }),
            _ => Err(errors),
        }
    }
}
