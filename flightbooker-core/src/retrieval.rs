use serde::{Deserialize, Serialize};

use crate::validation::{require_min_len, FieldErrors, Validate};

/// "Find your booking" form on the My Trips screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievalForm {
    pub booking_reference: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalQuery {
    pub booking_reference: String,
    pub last_name: String,
}

impl Validate for RetrievalForm {
    type Output = RetrievalQuery;

    fn validate(&self) -> Result<RetrievalQuery, FieldErrors> {
        let mut errors = FieldErrors::new();
        require_min_len(
            &mut errors,
            "bookingReference",
            &self.booking_reference,
            6,
            "Booking reference must be at least 6 characters",
        );
        require_min_len(&mut errors, "lastName", &self.last_name, 1, "Last name is required");

        errors.finish(|| RetrievalQuery {
            booking_reference: self.booking_reference.clone(),
            last_name: self.last_name.clone(),
        })
    }
}
