//! Generator module - renders the site from CMS content using the
//! embedded Tera templates

use anyhow::Result;
use std::fs;

use tera::Context;
use walkdir::WalkDir;

use crate::cms::{richtext, ContentApi};
use crate::content::{
    AdjacentPost, DetailAssembler, Listing, ListingPage, PostDetail, PostSummary,
};
use crate::helpers;
use crate::i18n::I18n;
use crate::templates::{
    CommentsData, ConfigData, LabelsData, NavPostData, PostItemData, PostPageData, SectionData,
    TemplateRenderer,
};
use crate::Spacewalk;

/// Static site generator
pub struct Generator<'a, C: ContentApi> {
    app: &'a Spacewalk,
    client: &'a C,
    renderer: TemplateRenderer,
    i18n: I18n,
}

impl<'a, C: ContentApi> Generator<'a, C> {
    /// Create a new generator
    pub fn new(app: &'a Spacewalk, client: &'a C) -> Result<Self> {
        Ok(Self {
            app,
            client,
            renderer: TemplateRenderer::new()?,
            i18n: I18n::new(&app.config.language),
        })
    }

    /// Generate the entire site
    ///
    /// A preview ref, when given, flows into every CMS query so the
    /// whole build renders the draft content set.
    pub async fn generate(&self, preview_ref: Option<&str>) -> Result<()> {
        fs::create_dir_all(&self.app.public_dir)?;

        self.copy_static_assets()?;

        // Listing page
        let listing = Listing::new(self.client, &self.app.config);
        let first_page = listing.first_page(preview_ref).await?;
        self.generate_index(&first_page, preview_ref)?;

        // Post pages
        let assembler = DetailAssembler::new(self.client, &self.app.config);
        let uids = assembler.all_uids(preview_ref).await?;
        let mut generated = 0;
        for uid in &uids {
            match assembler.load(uid, preview_ref).await? {
                Some(detail) => {
                    self.generate_post_page(&detail, preview_ref)?;
                    generated += 1;
                }
                None => {
                    tracing::warn!("Post {} disappeared during generation", uid);
                }
            }
        }

        self.generate_not_found_page(preview_ref)?;

        tracing::info!("Rendered listing and {} post pages", generated);
        Ok(())
    }

    /// Context shared by every page
    fn base_context(&self, preview: bool) -> Context {
        let mut context = Context::new();
        context.insert("config", &ConfigData::new(&self.app.config));
        context.insert("page_title", &None::<String>);
        context.insert("canonical", &None::<String>);
        context.insert("labels", &LabelsData::new(&self.i18n));
        context.insert("comments", &CommentsData::new(&self.app.config.comments));
        context.insert("preview", &preview);
        context.insert("exit_preview_href", &self.app.config.preview_exit_path);
        context
    }

    fn generate_index(&self, page: &ListingPage, preview_ref: Option<&str>) -> Result<()> {
        let mut context = self.base_context(preview_ref.is_some());
        context.insert("canonical", &helpers::full_url_for(&self.app.config, ""));
        let posts: Vec<PostItemData> = page.posts.iter().map(|p| self.post_item(p)).collect();
        context.insert("posts", &posts);
        context.insert("next_page", &page.next_page);

        let html = self.renderer.render("index.html", &context)?;
        let output = self.app.public_dir.join("index.html");
        fs::write(&output, html)?;
        tracing::debug!("Generated: {:?}", output);
        Ok(())
    }

    fn generate_post_page(&self, detail: &PostDetail, preview_ref: Option<&str>) -> Result<()> {
        let mut context = self.base_context(preview_ref.is_some());
        context.insert("page_title", &detail.title);
        let path = helpers::post_path(&self.app.config, &detail.uid);
        context.insert(
            "canonical",
            &format!("{}{}", self.app.config.url.trim_end_matches('/'), path),
        );
        context.insert("post", &self.post_page(detail));

        let html = self.renderer.render("post.html", &context)?;
        let dir = self.app.public_dir.join("post").join(&detail.uid);
        fs::create_dir_all(&dir)?;
        let output = dir.join("index.html");
        fs::write(&output, html)?;
        tracing::debug!("Generated: {:?}", output);
        Ok(())
    }

    fn generate_not_found_page(&self, preview_ref: Option<&str>) -> Result<()> {
        let context = self.base_context(preview_ref.is_some());
        let html = self.renderer.render("404.html", &context)?;
        fs::write(self.app.public_dir.join("404.html"), html)?;
        Ok(())
    }

    fn post_item(&self, summary: &PostSummary) -> PostItemData {
        let config = &self.app.config;
        PostItemData {
            title: summary.title.clone(),
            subtitle: summary.subtitle.clone(),
            author: summary.author.clone(),
            date: summary.first_publication_date.as_ref().map(|d| {
                helpers::display_date(d, &config.date_format, &config.timezone, &self.i18n)
            }),
            href: helpers::post_path(config, &summary.uid),
        }
    }

    fn post_page(&self, detail: &PostDetail) -> PostPageData {
        let config = &self.app.config;
        PostPageData {
            title: detail.title.clone(),
            author: detail.author.clone(),
            date: detail.first_publication_date.as_ref().map(|d| {
                helpers::display_date(d, &config.date_format, &config.timezone, &self.i18n)
            }),
            edited_on: detail.edited_at().map(|d| {
                helpers::display_date(d, &config.datetime_format, &config.timezone, &self.i18n)
            }),
            reading_minutes: detail.reading_minutes,
            banner_url: detail.banner_url.clone(),
            sections: detail
                .blocks
                .iter()
                .map(|b| SectionData {
                    heading: b.heading.clone(),
                    body_html: richtext::as_html(&b.body),
                })
                .collect(),
            prev: detail.prev_post.as_ref().map(|p| self.nav_post(p)),
            next: detail.next_post.as_ref().map(|p| self.nav_post(p)),
        }
    }

    fn nav_post(&self, adjacent: &AdjacentPost) -> NavPostData {
        NavPostData {
            label: helpers::pagination_label(&adjacent.title),
            href: helpers::post_path(&self.app.config, &adjacent.uid),
        }
    }

    /// Copy static assets (images, css, etc.) into the output
    fn copy_static_assets(&self) -> Result<()> {
        if !self.app.static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&self.app.static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(&self.app.static_dir)?;
                let target = self.app.public_dir.join(relative);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &target)?;
            }
        }

        Ok(())
    }
}
