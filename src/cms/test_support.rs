//! In-memory stand-in for the content API
//!
//! Implements enough of the search semantics (ordering, after-cursor,
//! page size) to exercise the assemblers without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use super::client::{CmsError, ContentApi};
use super::document::{Document, DocumentData, SearchResponse};
use super::query::SearchQuery;

pub(crate) struct InMemoryApi {
    docs: Vec<Document>,
    pages: HashMap<String, SearchResponse>,
    search_next_page: Option<String>,
    /// Query params of every search issued, in order
    pub recorded: Mutex<Vec<Vec<(String, String)>>>,
    /// Cursors followed via fetch_page, in order
    pub followed: Mutex<Vec<String>>,
}

impl InMemoryApi {
    pub fn new(docs: Vec<Document>) -> Self {
        Self {
            docs,
            pages: HashMap::new(),
            search_next_page: None,
            recorded: Mutex::new(Vec::new()),
            followed: Mutex::new(Vec::new()),
        }
    }

    /// Register the page returned for a cursor URL
    pub fn with_page(mut self, cursor: &str, page: SearchResponse) -> Self {
        self.pages.insert(cursor.to_string(), page);
        self
    }

    /// Cursor attached to direct search responses
    pub fn with_search_next_page(mut self, cursor: &str) -> Self {
        self.search_next_page = Some(cursor.to_string());
        self
    }

    pub fn recorded_params(&self) -> Vec<Vec<(String, String)>> {
        self.recorded.lock().unwrap().clone()
    }
}

pub(crate) fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Build a minimal post document for fixtures
pub(crate) fn doc(id: &str, uid: &str, first: &str, last: &str, title: &str) -> Document {
    let parse = |s: &str| -> Option<DateTime<FixedOffset>> {
        if s.is_empty() {
            None
        } else {
            Some(DateTime::parse_from_rfc3339(s).unwrap())
        }
    };
    Document {
        id: id.to_string(),
        uid: Some(uid.to_string()),
        first_publication_date: parse(first),
        last_publication_date: parse(last),
        data: DocumentData {
            title: title.to_string(),
            subtitle: format!("{} subtitle", title),
            author: "Jane Doe".to_string(),
            ..DocumentData::default()
        },
    }
}

#[async_trait]
impl ContentApi for InMemoryApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, CmsError> {
        let params = query.to_params(query.preview().unwrap_or("published-ref"));
        self.recorded.lock().unwrap().push(params.clone());

        let orderings = param(&params, "orderings").unwrap_or("");
        let by_last = orderings.contains("last_publication_date");
        let descending = orderings.contains(" desc");
        let sort_key = |d: &Document| {
            if by_last {
                d.last_publication_date
            } else {
                d.first_publication_date
            }
        };

        let mut results = self.docs.clone();
        results.sort_by_key(sort_key);
        if descending {
            results.reverse();
        }

        // The after cursor keeps only documents strictly past the pivot
        // in the current ordering
        if let Some(after) = param(&params, "after") {
            if let Some(pos) = results.iter().position(|d| d.id == after) {
                results = results.split_off(pos + 1);
            }
        }

        let total = results.len() as u64;
        if let Some(size) = param(&params, "pageSize").and_then(|v| v.parse().ok()) {
            results.truncate(size);
        }

        Ok(SearchResponse {
            results,
            next_page: self.search_next_page.clone(),
            total_results_size: Some(total),
        })
    }

    async fn get_by_uid(
        &self,
        uid: &str,
        _preview_ref: Option<&str>,
    ) -> Result<Option<Document>, CmsError> {
        if uid.trim().is_empty() {
            return Err(CmsError::EmptyUid);
        }
        Ok(self
            .docs
            .iter()
            .find(|d| d.uid.as_deref() == Some(uid))
            .cloned())
    }

    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse, CmsError> {
        self.followed.lock().unwrap().push(cursor.to_string());
        Ok(self.pages.get(cursor).cloned().unwrap_or_default())
    }
}
