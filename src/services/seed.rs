//! Bulk loading of advocates into an empty or existing store.

use validator::Validate;

use crate::domain::advocate::NewAdvocate;
use crate::forms::advocates::NewAdvocateForm;
use crate::repository::AdvocateWriter;
use crate::services::{ServiceError, ServiceResult};

/// Validates every entry and inserts them all, or nothing when any entry is
/// invalid.
pub fn seed_advocates<R>(repo: &R, forms: Vec<NewAdvocateForm>) -> ServiceResult<usize>
where
    R: AdvocateWriter + ?Sized,
{
    let mut advocates = Vec::with_capacity(forms.len());

    for (index, form) in forms.into_iter().enumerate() {
        if let Err(err) = form.validate() {
            log::error!("Rejected advocate entry #{index}: {err}");
            return Err(ServiceError::Validation(format!("entry #{index}: {err}")));
        }
        advocates.push(NewAdvocate::from(form));
    }

    if advocates.is_empty() {
        return Ok(0);
    }

    let inserted = repo.create_advocates(&advocates)?;
    log::info!("Seeded {inserted} advocates");

    Ok(inserted)
}
