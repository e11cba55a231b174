use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::advocate::{Advocate as DomainAdvocate, NewAdvocate as DomainNewAdvocate};
use crate::domain::types::{AdvocateId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::advocates)]
/// Diesel model for [`crate::domain::advocate::Advocate`].
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    /// JSON-encoded array of specialty names.
    pub specialties: String,
    pub years_of_experience: i32,
    pub phone_number: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::advocates)]
/// Insertable form of [`Advocate`].
pub struct NewAdvocate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub city: &'a str,
    pub degree: &'a str,
    pub specialties: String,
    pub years_of_experience: i32,
    pub phone_number: &'a str,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn decode_specialties(id: i32, raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(specialties) => specialties,
        Err(e) => {
            log::warn!("Advocate {id} has malformed specialties, treating as empty: {e}");
            Vec::new()
        }
    }
}

impl TryFrom<Advocate> for DomainAdvocate {
    type Error = TypeConstraintError;

    fn try_from(row: Advocate) -> Result<Self, Self::Error> {
        let specialties = decode_specialties(row.id, &row.specialties);
        Ok(Self {
            id: AdvocateId::new(row.id)?,
            first_name: non_empty(row.first_name),
            last_name: non_empty(row.last_name),
            city: non_empty(row.city),
            degree: non_empty(row.degree),
            specialties,
            years_of_experience: u32::try_from(row.years_of_experience).unwrap_or_default(),
            phone_number: row.phone_number,
        })
    }
}

impl<'a> From<&'a DomainNewAdvocate> for NewAdvocate<'a> {
    fn from(advocate: &'a DomainNewAdvocate) -> Self {
        // Vec<String> always serializes.
        let specialties =
            serde_json::to_string(&advocate.specialties).unwrap_or_else(|_| "[]".to_string());
        Self {
            first_name: advocate.first_name.as_str(),
            last_name: advocate.last_name.as_str(),
            city: advocate.city.as_str(),
            degree: advocate.degree.as_str(),
            specialties,
            years_of_experience: i32::try_from(advocate.years_of_experience).unwrap_or(i32::MAX),
            phone_number: advocate.phone_number.as_str(),
        }
    }
}
