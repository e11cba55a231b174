//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, supported
//! page sizes) so that once a value reaches the domain layer it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided page size is zero.
    #[error("page size must be greater than zero")]
    NonPositivePageSize,
    /// Provided page size is not one of the selectable options.
    #[error("unsupported page size: {0}")]
    UnsupportedPageSize(u32),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AdvocateId, "Unique identifier for an advocate.");

/// Number of advocates requested from the directory endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageSize(u32);

impl PageSize {
    /// Values offered by the page-size selector.
    pub const OPTIONS: [u32; 3] = [10, 20, 30];
    /// Default client-side cap.
    pub const MAX: Self = Self(30);
    pub const DEFAULT: Self = Self(10);

    /// Creates a page size from any positive value.
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value == 0 {
            return Err(TypeConstraintError::NonPositivePageSize);
        }
        Ok(Self(value))
    }

    /// Accepts one of [`PageSize::OPTIONS`] and clamps it to `max`.
    pub fn from_option(value: u32, max: PageSize) -> Result<Self, TypeConstraintError> {
        if !Self::OPTIONS.contains(&value) {
            return Err(TypeConstraintError::UnsupportedPageSize(value));
        }
        Ok(Self(value.min(max.0)))
    }

    /// Returns the raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}
