use crate::{
    db::DbPool,
    domain::advocate::{Advocate, NewAdvocate},
    repository::errors::RepositoryResult,
};

pub mod advocate;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Selection of advocates in natural store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvocateListQuery {
    /// Maximum number of records to return; `None` returns the full set.
    pub limit: Option<usize>,
}

impl AdvocateListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub trait AdvocateReader {
    fn list_advocates(&self, query: AdvocateListQuery) -> RepositoryResult<Vec<Advocate>>;
}

pub trait AdvocateWriter {
    fn create_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<usize>;
}

/// Diesel-backed repository shared by the HTTP handlers and binaries.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
