//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; there is no
//! on-disk theme to resolve.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{CommentsConfig, SiteConfig};
use crate::i18n::I18n;

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("spacewalk/layout.html")),
            ("index.html", include_str!("spacewalk/index.html")),
            ("post.html", include_str!("spacewalk/post.html")),
            ("404.html", include_str!("spacewalk/404.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("spacewalk/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("spacewalk/partials/header.html"),
            ),
            (
                "partials/comments.html",
                include_str!("spacewalk/partials/comments.html"),
            ),
            (
                "partials/preview.html",
                include_str!("spacewalk/partials/preview.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub language: String,
}

impl ConfigData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
            language: config.language.clone(),
        }
    }
}

/// UI strings for the selected language
#[derive(Debug, Clone, Serialize)]
pub struct LabelsData {
    pub load_more: String,
    pub prev_post: String,
    pub next_post: String,
    pub edited_on: String,
    pub reading_time: String,
    pub not_found: String,
    pub exit_preview: String,
}

impl LabelsData {
    pub fn new(i18n: &I18n) -> Self {
        Self {
            load_more: i18n.t("load_more").to_string(),
            prev_post: i18n.t("prev_post").to_string(),
            next_post: i18n.t("next_post").to_string(),
            edited_on: i18n.t("edited_on").to_string(),
            reading_time: i18n.t("reading_time").to_string(),
            not_found: i18n.t("not_found").to_string(),
            exit_preview: i18n.t("exit_preview").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsData {
    pub enable: bool,
    pub script_url: String,
    pub repository: String,
    pub issue_term: String,
    pub theme: String,
}

impl CommentsData {
    pub fn new(config: &CommentsConfig) -> Self {
        Self {
            // A widget without a repository has nowhere to thread
            enable: config.enable && !config.repository.is_empty(),
            script_url: config.script_url.clone(),
            repository: config.repository.clone(),
            issue_term: config.issue_term.clone(),
            theme: config.theme.clone(),
        }
    }
}

/// A listing entry
#[derive(Debug, Clone, Serialize)]
pub struct PostItemData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: Option<String>,
    pub href: String,
}

/// A rendered body section
#[derive(Debug, Clone, Serialize)]
pub struct SectionData {
    pub heading: String,
    pub body_html: String,
}

/// A prev/next navigation link
#[derive(Debug, Clone, Serialize)]
pub struct NavPostData {
    pub label: String,
    pub href: String,
}

/// Everything the post page needs
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub author: String,
    pub date: Option<String>,
    pub edited_on: Option<String>,
    pub reading_minutes: u32,
    pub banner_url: Option<String>,
    pub sections: Vec<SectionData>,
    pub prev: Option<NavPostData>,
    pub next: Option<NavPostData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_context() -> Context {
        let config = SiteConfig::default();
        let mut context = Context::new();
        context.insert("config", &ConfigData::new(&config));
        context.insert("labels", &LabelsData::new(&I18n::new("en")));
        context.insert("comments", &CommentsData::new(&config.comments));
        context.insert("preview", &false);
        context.insert("page_title", &None::<String>);
        context.insert("canonical", &None::<String>);
        context
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "posts",
            &vec![PostItemData {
                title: "First post".to_string(),
                subtitle: "It begins".to_string(),
                author: "Jane Doe".to_string(),
                date: Some("15 Mar 2021".to_string()),
                href: "/post/first-post/".to_string(),
            }],
        );
        context.insert("next_page", &Some("https://api/page/2".to_string()));

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("First post"));
        assert!(html.contains("15 Mar 2021"));
        assert!(html.contains("Load more posts"));
        assert!(html.contains("data-next-page"));
    }

    #[test]
    fn test_render_index_terminal_page_has_no_button() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("posts", &Vec::<PostItemData>::new());
        context.insert("next_page", &None::<String>);

        let html = renderer.render("index.html", &context).unwrap();
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn test_render_post() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "post",
            &PostPageData {
                title: "First post".to_string(),
                author: "Jane Doe".to_string(),
                date: Some("15 Mar 2021".to_string()),
                edited_on: Some("16 Mar 2021, 10:00".to_string()),
                reading_minutes: 4,
                banner_url: Some("https://images.example.com/banner.png".to_string()),
                sections: vec![SectionData {
                    heading: "Intro".to_string(),
                    body_html: "<p>Hello <strong>there</strong>.</p>".to_string(),
                }],
                prev: Some(NavPostData {
                    label: "Second post...".to_string(),
                    href: "/post/second-post/".to_string(),
                }),
                next: None,
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("4 min"));
        assert!(html.contains("* edited on 16 Mar 2021, 10:00"));
        // Rendered rich text is injected unescaped
        assert!(html.contains("<strong>there</strong>"));
        assert!(html.contains("Second post..."));
        assert!(html.contains("Previous post"));
        assert!(!html.contains("Next post"));
    }

    #[test]
    fn test_comments_render_only_with_repository() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        let comments = CommentsData::new(&CommentsConfig {
            enable: true,
            repository: "me/my-blog".to_string(),
            ..CommentsConfig::default()
        });
        context.insert("comments", &comments);
        context.insert(
            "post",
            &PostPageData {
                title: "P".to_string(),
                author: "A".to_string(),
                date: None,
                edited_on: None,
                reading_minutes: 0,
                banner_url: None,
                sections: Vec::new(),
                prev: None,
                next: None,
            },
        );

        assert!(!CommentsData::new(&CommentsConfig::default()).enable);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("comment-thread"));
        assert!(html.contains("me/my-blog"));
        assert!(html.contains("issue-term"));
    }

    #[test]
    fn test_preview_badge() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("preview", &true);
        context.insert("exit_preview_href", "/");
        context.insert("posts", &Vec::<PostItemData>::new());
        context.insert("next_page", &None::<String>);

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("Exit preview mode"));
    }
}
