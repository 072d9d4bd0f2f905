//! Content module - assembles CMS documents into renderable posts

mod detail;
mod listing;
mod post;

pub use detail::{reading_time, DetailAssembler};
pub use listing::{Listing, ListingPage};
pub use post::{AdjacentPost, ContentBlock, PostDetail, PostSummary};
