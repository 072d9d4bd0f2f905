//! Wire-format projections of CMS documents

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

use super::richtext::RichTextBlock;

/// One page of search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Document>,
    /// Opaque URL of the next page; absent on the last page
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub total_results_size: Option<u64>,
}

/// A raw post document as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_publication_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub data: DocumentData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub banner: Banner,
    #[serde(default)]
    pub content: Vec<ContentSlice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Banner {
    #[serde(default)]
    pub url: Option<String>,
}

/// A titled section of the post body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSlice {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

// The API emits offsets both with and without a colon
// ("+00:00" and "+0000"); accept either.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .or_else(|_| DateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%z"))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
