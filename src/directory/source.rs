//! Where the directory controller gets its advocates from.

use std::future::Future;

use thiserror::Error;

use crate::domain::advocate::Advocate;
use crate::domain::types::PageSize;
use crate::dto::api::AdvocatesResponse;
use crate::repository::AdvocateReader;
use crate::services::advocates::list_advocates;

/// Reasons a retrieval can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Asynchronous provider of one page of advocates.
pub trait AdvocateSource {
    fn fetch_advocates(
        &self,
        page_size: PageSize,
    ) -> impl Future<Output = FetchResult<Vec<Advocate>>>;
}

/// Calls `GET {base_url}/api/advocates?limit={page_size}`.
#[derive(Debug, Clone)]
pub struct HttpAdvocateSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAdvocateSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/advocates", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AdvocateSource for HttpAdvocateSource {
    async fn fetch_advocates(&self, page_size: PageSize) -> FetchResult<Vec<Advocate>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("limit", page_size.get())])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: AdvocatesResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(body.data)
    }
}

/// Reads advocates straight from a repository, bypassing HTTP.
#[derive(Debug, Clone)]
pub struct StoreAdvocateSource<R> {
    repo: R,
}

impl<R> StoreAdvocateSource<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: AdvocateReader> AdvocateSource for StoreAdvocateSource<R> {
    async fn fetch_advocates(&self, page_size: PageSize) -> FetchResult<Vec<Advocate>> {
        let limit = page_size.to_string();
        list_advocates(&self.repo, Some(&limit))
            .map(|response| response.data)
            .map_err(|e| FetchError::Store(e.to_string()))
    }
}
