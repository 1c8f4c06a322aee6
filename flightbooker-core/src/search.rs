use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{require_min_len, FieldErrors, Validate};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    #[default]
    Economy,
    Premium,
    Business,
    First,
}

/// Search form as typed by the user. Missing fields take the form defaults:
/// one-way, one adult, economy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchForm {
    pub trip_type: TripType,
    pub origin: String,
    pub destination: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub adults: i64,
    pub children: i64,
    pub infants: i64,
    pub cabin_class: CabinClass,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            trip_type: TripType::OneWay,
            origin: String::new(),
            destination: String::new(),
            departure_date: None,
            return_date: None,
            adults: 1,
            children: 0,
            infants: 0,
            cabin_class: CabinClass::Economy,
        }
    }
}

/// Accepted search. Only obtainable through `SearchForm::validate`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub trip_type: TripType,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub cabin_class: CabinClass,
}

impl SearchCriteria {
    pub fn traveller_count(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }
}

impl Validate for SearchForm {
    type Output = SearchCriteria;

    fn validate(&self) -> Result<SearchCriteria, FieldErrors> {
        let mut errors = FieldErrors::new();

        require_min_len(&mut errors, "origin", &self.origin, 3, "Origin is required");
        require_min_len(
            &mut errors,
            "destination",
            &self.destination,
            3,
            "Destination is required",
        );

        if self.departure_date.is_none() {
            errors.add("departureDate", "Departure date is required.");
        }

        if self.adults < 1 {
            errors.add("adults", "At least one adult is required");
        }
        if self.children < 0 {
            errors.add("children", "Number must be greater than or equal to 0");
        }
        if self.infants < 0 {
            errors.add("infants", "Number must be greater than or equal to 0");
        }
        let adults = narrow_count(&mut errors, "adults", self.adults);
        let children = narrow_count(&mut errors, "children", self.children);
        let infants = narrow_count(&mut errors, "infants", self.infants);

        // The refinement only runs once the base fields are sound.
        if errors.is_empty() && self.trip_type == TripType::RoundTrip {
            let valid = match (self.departure_date, self.return_date) {
                (Some(departure), Some(ret)) => ret > departure,
                _ => false,
            };
            if !valid {
                errors.add(
                    "returnDate",
                    "Return date must be after departure date for round trips.",
                );
            }
        }

        let departure_date = match self.departure_date {
            Some(date) if errors.is_empty() => date,
            _ => return Err(errors),
        };

        Ok(SearchCriteria {
            trip_type: self.trip_type,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date,
            return_date: match self.trip_type {
                TripType::RoundTrip => self.return_date,
                TripType::OneWay => None,
            },
            adults,
            children,
            infants,
            cabin_class: self.cabin_class,
        })
    }
}

/// Narrows a submitted count. Negative input is reported by the caller's
/// own rule; only values past `u32::MAX` are flagged here.
fn narrow_count(errors: &mut FieldErrors, field: &str, value: i64) -> u32 {
    match u32::try_from(value) {
        Ok(count) => count,
        Err(_) => {
            if value > 0 {
                errors.add(field, "Number is too large");
            }
            0
        }
    }
}
