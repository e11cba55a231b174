//! DTOs exposed by the directory API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::advocate::Advocate;

/// Query parameters accepted by `GET /api/advocates`.
#[derive(Debug, Default, Deserialize)]
pub struct AdvocatesQuery {
    /// Raw, unparsed upper bound on the number of returned advocates.
    pub limit: Option<String>,
}

/// Body returned by `GET /api/advocates`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvocatesResponse {
    pub data: Vec<Advocate>,
}
