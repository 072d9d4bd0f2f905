//! Detail assembler - a single post with navigation and reading time

use anyhow::Result;

use super::post::{AdjacentPost, ContentBlock, PostDetail};
use crate::cms::{richtext, ContentApi, Ordering, Predicate, SearchQuery};
use crate::config::SiteConfig;
use crate::helpers::word_count;

/// Page size used when enumerating all post paths
const PATHS_PAGE_SIZE: usize = 100;

/// Assembles a full post page from its document and temporal neighbors
pub struct DetailAssembler<'a, C: ContentApi> {
    client: &'a C,
    config: &'a SiteConfig,
}

impl<'a, C: ContentApi> DetailAssembler<'a, C> {
    pub fn new(client: &'a C, config: &'a SiteConfig) -> Self {
        Self { client, config }
    }

    /// Load a post by uid; `None` when the CMS has no such document
    ///
    /// Requests run sequentially: the document itself, then the
    /// ascending-after neighbor, then the descending-after neighbor.
    pub async fn load(&self, uid: &str, preview_ref: Option<&str>) -> Result<Option<PostDetail>> {
        let Some(doc) = self.client.get_by_uid(uid, preview_ref).await? else {
            return Ok(None);
        };

        let mut detail = PostDetail::from_document(&doc);
        detail.reading_minutes = reading_time(&detail.blocks);
        // The post published right after this one links back as
        // "previous", and the one right before as "next"
        detail.prev_post = self.neighbor(&doc.id, false, preview_ref).await?;
        detail.next_post = self.neighbor(&doc.id, true, preview_ref).await?;

        Ok(Some(detail))
    }

    /// Single-result query for the adjacent post in one direction
    ///
    /// An empty result set means no neighbor exists; that is the normal
    /// end of the timeline, not an error.
    async fn neighbor(
        &self,
        id: &str,
        descending: bool,
        preview_ref: Option<&str>,
    ) -> Result<Option<AdjacentPost>> {
        let ordering = if descending {
            Ordering::desc("document.first_publication_date")
        } else {
            Ordering::asc("document.first_publication_date")
        };
        let query = SearchQuery::new()
            .predicate(Predicate::at("document.type", &self.config.cms.document_type))
            .page_size(1)
            .order_by(ordering)
            .after(id)
            .preview_ref(preview_ref);

        let response = self.client.search(&query).await?;
        Ok(response.results.first().map(|doc| AdjacentPost {
            uid: doc.uid.clone().unwrap_or_default(),
            title: doc.data.title.clone(),
        }))
    }

    /// Enumerate the uid of every post, following page cursors
    pub async fn all_uids(&self, preview_ref: Option<&str>) -> Result<Vec<String>> {
        let query = SearchQuery::new()
            .predicate(Predicate::at("document.type", &self.config.cms.document_type))
            .page_size(PATHS_PAGE_SIZE)
            .preview_ref(preview_ref);

        let mut response = self.client.search(&query).await?;
        let mut uids = Vec::new();
        loop {
            uids.extend(response.results.iter().filter_map(|d| d.uid.clone()));
            match response.next_page.take() {
                Some(cursor) => response = self.client.fetch_page(&cursor).await?,
                None => break,
            }
        }

        Ok(uids)
    }
}

/// Estimated reading time in minutes, at 200 words per minute
///
/// Words are whitespace-delimited tokens; each section contributes its
/// heading and its flattened body text.
pub fn reading_time(blocks: &[ContentBlock]) -> u32 {
    let total: usize = blocks
        .iter()
        .map(|b| word_count(&b.heading) + word_count(&richtext::as_text(&b.body)))
        .sum();
    total.div_ceil(200) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::test_support::{doc, param, InMemoryApi};
    use crate::cms::{Document, RichTextBlock, SearchResponse};

    fn fixture_docs() -> Vec<Document> {
        vec![
            doc(
                "A",
                "post-a",
                "2021-01-01T00:00:00+00:00",
                "2021-01-01T00:00:00+00:00",
                "Post A",
            ),
            doc(
                "B",
                "post-b",
                "2021-02-01T00:00:00+00:00",
                "2021-02-01T00:00:00+00:00",
                "Post B",
            ),
            doc(
                "C",
                "post-c",
                "2021-03-01T00:00:00+00:00",
                "2021-03-01T00:00:00+00:00",
                "Post C",
            ),
        ]
    }

    fn blocks_with_words(heading_words: usize, body_words: usize) -> Vec<ContentBlock> {
        let words = |n: usize| vec!["word"; n].join(" ");
        vec![ContentBlock {
            heading: words(heading_words),
            body: vec![RichTextBlock {
                kind: "paragraph".to_string(),
                text: words(body_words),
                ..RichTextBlock::default()
            }],
        }]
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(&blocks_with_words(10, 340)), 2); // 350 words
        assert_eq!(reading_time(&blocks_with_words(0, 200)), 1);
        assert_eq!(reading_time(&blocks_with_words(0, 201)), 2);
        assert_eq!(reading_time(&[]), 0);
        assert_eq!(reading_time(&blocks_with_words(0, 0)), 0);
    }

    #[test]
    fn test_reading_time_sums_across_blocks() {
        let mut blocks = blocks_with_words(5, 95);
        blocks.extend(blocks_with_words(5, 95)); // 200 words total
        assert_eq!(reading_time(&blocks), 1);
        blocks.extend(blocks_with_words(1, 0)); // 201
        assert_eq!(reading_time(&blocks), 2);
    }

    #[tokio::test]
    async fn test_neighbors_for_middle_post() {
        let api = InMemoryApi::new(fixture_docs());
        let config = SiteConfig::default();
        let assembler = DetailAssembler::new(&api, &config);

        let detail = assembler.load("post-b", None).await.unwrap().unwrap();
        assert_eq!(detail.prev_post.as_ref().unwrap().uid, "post-c");
        assert_eq!(detail.next_post.as_ref().unwrap().uid, "post-a");
    }

    #[tokio::test]
    async fn test_neighbors_at_timeline_ends() {
        let api = InMemoryApi::new(fixture_docs());
        let config = SiteConfig::default();
        let assembler = DetailAssembler::new(&api, &config);

        let first = assembler.load("post-a", None).await.unwrap().unwrap();
        assert_eq!(first.prev_post.as_ref().unwrap().uid, "post-b");
        assert!(first.next_post.is_none());

        let last = assembler.load("post-c", None).await.unwrap().unwrap();
        assert!(last.prev_post.is_none());
        assert_eq!(last.next_post.as_ref().unwrap().uid, "post-b");
    }

    #[tokio::test]
    async fn test_unknown_uid_is_not_an_error() {
        let api = InMemoryApi::new(fixture_docs());
        let config = SiteConfig::default();
        let assembler = DetailAssembler::new(&api, &config);

        assert!(assembler.load("missing", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_neighbor_queries_propagate_preview_ref() {
        let api = InMemoryApi::new(fixture_docs());
        let config = SiteConfig::default();
        let assembler = DetailAssembler::new(&api, &config);

        assembler
            .load("post-b", Some("preview-token"))
            .await
            .unwrap();

        let recorded = api.recorded_params();
        assert_eq!(recorded.len(), 2); // one per direction
        for params in &recorded {
            assert_eq!(param(params, "ref"), Some("preview-token"));
            assert_eq!(param(params, "pageSize"), Some("1"));
            assert_eq!(param(params, "after"), Some("B"));
        }
    }

    #[tokio::test]
    async fn test_all_uids_follows_cursors() {
        let tail = SearchResponse {
            results: vec![doc(
                "D",
                "post-d",
                "2021-04-01T00:00:00+00:00",
                "2021-04-01T00:00:00+00:00",
                "Post D",
            )],
            next_page: None,
            total_results_size: Some(4),
        };
        let api = InMemoryApi::new(fixture_docs())
            .with_search_next_page("mem://paths/2")
            .with_page("mem://paths/2", tail);
        let config = SiteConfig::default();
        let assembler = DetailAssembler::new(&api, &config);

        let uids = assembler.all_uids(None).await.unwrap();
        assert_eq!(uids, vec!["post-a", "post-b", "post-c", "post-d"]);
        assert_eq!(*api.followed.lock().unwrap(), vec!["mem://paths/2"]);
    }
}
