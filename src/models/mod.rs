//! Database models and configuration shared across the directory service.

pub mod advocate;
pub mod config;
