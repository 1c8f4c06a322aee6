use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{require_min_len, FieldErrors, Validate};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    Undisclosed,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "undisclosed" => Some(Gender::Undisclosed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PassengerType {
    #[default]
    Adult,
    Child,
    Infant,
}

impl fmt::Display for PassengerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PassengerType::Adult => "Adult",
            PassengerType::Child => "Child",
            PassengerType::Infant => "Infant",
        };
        write!(f, "{}", label)
    }
}

/// One traveller's entry on the passenger step. Gender stays free text until
/// validation so an unset select can be reported as a field error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PassengerForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: Option<String>,
    pub passenger_type: PassengerType,
}

impl PassengerForm {
    pub fn blank(passenger_type: PassengerType) -> Self {
        Self {
            passenger_type,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassengerRecord {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: Gender,
    pub passenger_type: PassengerType,
}

impl PassengerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Validate for PassengerForm {
    type Output = PassengerRecord;

    fn validate(&self) -> Result<PassengerRecord, FieldErrors> {
        let mut errors = FieldErrors::new();

        require_min_len(&mut errors, "firstName", &self.first_name, 1, "First name is required");
        require_min_len(&mut errors, "lastName", &self.last_name, 1, "Last name is required");
        require_min_len(&mut errors, "dob", &self.dob, 1, "Date of birth is required");

        let gender = self.gender.as_deref().and_then(Gender::parse);
        if gender.is_none() {
            errors.add("gender", "Gender is required");
        }

        match gender {
            Some(gender) if errors.is_empty() => Ok(PassengerRecord {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                dob: self.dob.clone(),
                gender,
                passenger_type: self.passenger_type,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> PassengerForm {
        PassengerForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            dob: "1990-04-01".to_string(),
            gender: Some("female".to_string()),
            passenger_type: PassengerType::Adult,
        }
    }

    #[test]
    fn test_valid_passenger() {
        let record = jane().validate().unwrap();
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.full_name(), "Jane Doe");
    }

    #[test]
    fn test_blank_passenger_reports_every_field() {
        let errors = PassengerForm::blank(PassengerType::Child).validate().unwrap_err();
        for path in ["firstName", "lastName", "dob", "gender"] {
            assert!(errors.contains(path), "missing error for {}", path);
        }
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let errors = PassengerForm {
            gender: Some("robot".to_string()),
            ..jane()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.first("gender"), Some("Gender is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_passenger_type_wire_format() {
        let form: PassengerForm = serde_json::from_str(r#"{"passengerType":"Infant"}"#).unwrap();
        assert_eq!(form.passenger_type, PassengerType::Infant);
        assert_eq!(PassengerType::Infant.to_string(), "Infant");
    }
}
