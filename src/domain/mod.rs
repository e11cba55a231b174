//! Domain entities exposed by the advocate directory.

pub mod advocate;
pub mod types;
