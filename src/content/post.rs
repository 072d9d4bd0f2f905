//! Post models
//!
//! Read-only projections of CMS documents. Nothing here is ever written
//! back to the CMS.

use chrono::{DateTime, FixedOffset};

use crate::cms::{ContentSlice, Document, RichTextBlock};

/// A post entry on the listing page
#[derive(Debug, Clone)]
pub struct PostSummary {
    /// Human-readable unique identifier, used in the URL path
    pub uid: String,

    /// When the post was first published; drafts have none
    pub first_publication_date: Option<DateTime<FixedOffset>>,

    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Author display name
    pub author: String,
}

impl PostSummary {
    /// Normalize a raw document into a listing entry
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone().unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        }
    }
}

/// One titled section of a post body
#[derive(Debug, Clone)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

impl ContentBlock {
    fn from_slice(slice: &ContentSlice) -> Self {
        Self {
            heading: slice.heading.clone(),
            body: slice.body.clone(),
        }
    }
}

/// Reference to a chronologically adjacent post, by identifier only
#[derive(Debug, Clone)]
pub struct AdjacentPost {
    pub uid: String,
    pub title: String,
}

/// A fully assembled post page
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    pub last_publication_date: Option<DateTime<FixedOffset>>,
    pub title: String,
    pub author: String,
    pub banner_url: Option<String>,
    pub blocks: Vec<ContentBlock>,

    /// Estimated reading time in minutes
    pub reading_minutes: u32,

    /// Navigation links; either may be absent at the ends of the timeline
    pub prev_post: Option<AdjacentPost>,
    pub next_post: Option<AdjacentPost>,
}

impl PostDetail {
    /// Normalize a raw document; reading time and navigation are filled
    /// in by the detail assembler
    pub fn from_document(doc: &Document) -> Self {
        Self {
            uid: doc.uid.clone().unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: doc.data.title.clone(),
            author: doc.data.author.clone(),
            banner_url: doc.data.banner.url.clone(),
            blocks: doc.data.content.iter().map(ContentBlock::from_slice).collect(),
            reading_minutes: 0,
            prev_post: None,
            next_post: None,
        }
    }

    /// The last publication date, only when the post was edited after
    /// first publication
    pub fn edited_at(&self) -> Option<&DateTime<FixedOffset>> {
        match (&self.first_publication_date, &self.last_publication_date) {
            (Some(first), Some(last)) if first != last => Some(last),
            (None, Some(last)) => Some(last),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::test_support::doc;

    #[test]
    fn test_summary_from_document() {
        let d = doc(
            "Y1",
            "my-first-post",
            "2021-01-01T12:00:00+00:00",
            "2021-01-01T12:00:00+00:00",
            "My first post",
        );
        let summary = PostSummary::from_document(&d);
        assert_eq!(summary.uid, "my-first-post");
        assert_eq!(summary.title, "My first post");
        assert_eq!(summary.author, "Jane Doe");
        assert!(summary.first_publication_date.is_some());
    }

    #[test]
    fn test_edited_at_absent_when_dates_match() {
        let d = doc(
            "Y1",
            "p",
            "2021-01-01T12:00:00+00:00",
            "2021-01-01T12:00:00+00:00",
            "P",
        );
        assert!(PostDetail::from_document(&d).edited_at().is_none());
    }

    #[test]
    fn test_edited_at_shows_last_date() {
        let d = doc(
            "Y1",
            "p",
            "2021-01-01T12:00:00+00:00",
            "2021-01-05T09:30:00+00:00",
            "P",
        );
        let detail = PostDetail::from_document(&d);
        let edited = detail.edited_at().expect("marker expected");
        assert_eq!(edited.to_rfc3339(), "2021-01-05T09:30:00+00:00");
    }
}
