//! Content API client

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::document::{Document, SearchResponse};
use super::query::{Predicate, SearchQuery};
use crate::config::CmsConfig;

/// Errors surfaced by the content API
///
/// Transport and API failures propagate to the caller unchanged; there is
/// no retry and no response caching at this layer.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content API returned status {status}")]
    Api { status: u16 },

    #[error("no published ref in API metadata")]
    MissingRef,

    #[error("document identifier must not be empty")]
    EmptyUid,
}

/// Capability interface over the content API
///
/// Core logic depends on this seam rather than the HTTP transport, so a
/// test double can stand in for the hosted service.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Run a search query and return one page of results
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CmsError>;

    /// Fetch a single document by its uid; `None` when it does not exist
    async fn get_by_uid(
        &self,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<Document>, CmsError>;

    /// Follow an opaque next-page URL from a previous response
    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse, CmsError>;
}

/// reqwest-backed implementation of [`ContentApi`]
pub struct HttpContentApi {
    http: reqwest::Client,
    config: CmsConfig,
}

impl HttpContentApi {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/documents/search",
            self.config.api_url.trim_end_matches('/')
        )
    }

    /// A preview ref passes through verbatim; otherwise the published
    /// (master) ref is looked up from the API root.
    async fn resolve_ref(&self, preview_ref: Option<&str>) -> Result<String, CmsError> {
        if let Some(preview) = preview_ref {
            return Ok(preview.to_string());
        }

        let response = check(self.http.get(&self.config.api_url).send().await?)?;
        let info: ApiInfo = response.json().await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or(CmsError::MissingRef)
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CmsError> {
        let resolved_ref = self.resolve_ref(query.preview()).await?;
        let params = query.to_params(&resolved_ref);

        tracing::debug!("Searching {} with {:?}", self.search_url(), params);
        let response = check(
            self.http
                .get(self.search_url())
                .query(&params)
                .send()
                .await?,
        )?;
        Ok(response.json().await?)
    }

    async fn get_by_uid(
        &self,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<Document>, CmsError> {
        if uid.trim().is_empty() {
            return Err(CmsError::EmptyUid);
        }

        let query = SearchQuery::new()
            .predicate(Predicate::at(
                &format!("my.{}.uid", self.config.document_type),
                uid,
            ))
            .page_size(1)
            .preview_ref(preview_ref);

        let response = self.search(&query).await?;
        Ok(response.results.into_iter().next())
    }

    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse, CmsError> {
        tracing::debug!("Following page cursor {}", cursor);
        let response = check(self.http.get(cursor).send().await?)?;
        Ok(response.json().await?)
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, CmsError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CmsError::Api {
            status: status.as_u16(),
        })
    }
}

/// API root metadata: the set of content refs
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}
