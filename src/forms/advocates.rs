use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::advocate::NewAdvocate;
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// One advocate entry as found in a seed file.
pub struct NewAdvocateForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    #[validate(range(max = 80))]
    pub years_of_experience: u32,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

/// Phone numbers are stored as plain digit strings of plausible length.
fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if (7..=15).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number"))
    }
}

impl From<NewAdvocateForm> for NewAdvocate {
    fn from(form: NewAdvocateForm) -> Self {
        NewAdvocate::new(
            form.first_name,
            form.last_name,
            form.city,
            form.degree,
            form.specialties,
            form.years_of_experience,
            form.phone_number,
        )
    }
}

/// Parses a JSON array of advocate entries.
pub fn parse_seed_file(contents: &str) -> Result<Vec<NewAdvocateForm>, FormError> {
    Ok(serde_json::from_str(contents)?)
}
