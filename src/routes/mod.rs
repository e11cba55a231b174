//! HTTP handlers for the advocate directory.

pub mod api;
