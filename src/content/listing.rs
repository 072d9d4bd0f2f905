//! Listing assembler - the paginated post list

use anyhow::Result;

use super::post::PostSummary;
use crate::cms::{ContentApi, Predicate, SearchQuery, SearchResponse};
use crate::config::SiteConfig;

/// One page of the listing, plus the cursor to the page after it
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub posts: Vec<PostSummary>,
    /// Absent on the terminal page; no "load more" beyond this point
    pub next_page: Option<String>,
}

/// Assembles pages of post summaries
pub struct Listing<'a, C: ContentApi> {
    client: &'a C,
    config: &'a SiteConfig,
}

impl<'a, C: ContentApi> Listing<'a, C> {
    pub fn new(client: &'a C, config: &'a SiteConfig) -> Self {
        Self { client, config }
    }

    /// Load the first page: up to `per_page` posts, most recent first
    pub async fn first_page(&self, preview_ref: Option<&str>) -> Result<ListingPage> {
        let query = SearchQuery::new()
            .predicate(Predicate::at("document.type", &self.config.cms.document_type))
            .fetch(&self.config.cms.fetch_fields)
            .page_size(self.config.per_page)
            .orderings(&self.config.cms.orderings)
            .preview_ref(preview_ref);

        let response = self.client.search(&query).await?;
        Ok(normalize(response))
    }

    /// Fetch the page behind a cursor and return only its posts
    ///
    /// The caller owns the accumulated list and appends the delta to its
    /// end; duplicate invocations are not deduplicated here.
    pub async fn load_more(&self, cursor: &str) -> Result<ListingPage> {
        let response = self.client.fetch_page(cursor).await?;
        Ok(normalize(response))
    }
}

fn normalize(response: SearchResponse) -> ListingPage {
    ListingPage {
        posts: response
            .results
            .iter()
            .map(PostSummary::from_document)
            .collect(),
        next_page: response.next_page,
    }
}
