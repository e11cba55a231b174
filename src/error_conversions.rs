//! Error conversion glue between the domain value objects and the outer layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
