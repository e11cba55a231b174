use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::types::AdvocateId;

/// A directory entry describing one advocate.
///
/// Serialized with camelCase keys, which is the shape the directory endpoint
/// returns and the directory controller consumes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
    pub id: AdvocateId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    /// Zero or more specialty tags in display order.
    #[serde(default, deserialize_with = "specialties_or_empty")]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default, deserialize_with = "phone_number_text")]
    pub phone_number: String,
}

impl Advocate {
    /// Creates an advocate with only an identifier set.
    #[must_use]
    pub fn new(id: AdvocateId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            city: None,
            degree: None,
            specialties: Vec::new(),
            years_of_experience: 0,
            phone_number: String::new(),
        }
    }

    /// `tel:` link built from the digits of the phone number.
    pub fn phone_href(&self) -> String {
        let digits: String = self
            .phone_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        format!("tel:{digits}")
    }
}

/// Payload used to insert a new advocate into the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAdvocate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: u32,
    pub phone_number: String,
}

impl NewAdvocate {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        city: String,
        degree: String,
        specialties: Vec<String>,
        years_of_experience: u32,
        phone_number: String,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            city: city.trim().to_string(),
            degree: degree.trim().to_string(),
            specialties: specialties
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            years_of_experience,
            phone_number: phone_number.trim().to_string(),
        }
    }
}

/// Anything other than an array of strings degrades to no specialties.
fn specialties_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Phone numbers may arrive as JSON strings or as bare numbers.
fn phone_number_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
