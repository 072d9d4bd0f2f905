//! List site content from the CMS

use anyhow::Result;

use crate::cms::{ContentApi, HttpContentApi};
use crate::config::SiteConfig;
use crate::content::{DetailAssembler, Listing, PostSummary};
use crate::helpers;
use crate::Spacewalk;

/// List site content by type
pub async fn run(app: &Spacewalk, content_type: &str) -> Result<()> {
    let client = HttpContentApi::new(app.config.cms.clone());

    match content_type {
        "post" | "posts" => {
            let posts = fetch_all_summaries(&client, &app.config).await?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .first_publication_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "unpublished".to_string());
                println!("  {} - {} [{}]", date, post.title, post.uid);
            }
        }
        "path" | "paths" => {
            let assembler = DetailAssembler::new(&client, &app.config);
            let uids = assembler.all_uids(None).await?;
            println!("Paths ({}):", uids.len());
            for uid in uids {
                println!("  {}", helpers::post_path(&app.config, &uid));
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, path", content_type);
        }
    }

    Ok(())
}

/// Walk the whole listing, page by page
async fn fetch_all_summaries<C: ContentApi>(
    client: &C,
    config: &SiteConfig,
) -> Result<Vec<PostSummary>> {
    let listing = Listing::new(client, config);
    let first = listing.first_page(None).await?;
    let mut posts = first.posts;
    let mut next = first.next_page;

    while let Some(cursor) = next {
        let delta = listing.load_more(&cursor).await?;
        posts.extend(delta.posts);
        next = delta.next_page;
    }

    Ok(posts)
}
