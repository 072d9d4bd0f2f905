//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("static/css"))?;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let style_path = target_dir.join("static/css/style.css");
    if !style_path.exists() {
        fs::write(&style_path, DEFAULT_STYLE)?;
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Spacewalk Configuration

# Site
title: Spacewalk
subtitle: ''
description: ''
author: John Doe
language: en
timezone: ''

# URL
url: http://example.com
root: /

# Directory
public_dir: public
static_dir: static

# Date / Time format
date_format: DD MMM YYYY
datetime_format: DD MMM YYYY, HH:mm

# Listing pagination
per_page: 2

# Content API
cms:
  api_url: https://blog.cdn.example.com/api/v2
  document_type: posts
  fetch_fields:
    - posts.title
    - posts.subtitle
    - posts.author
  orderings: '[document.last_publication_date desc]'

# Comment widget
comments:
  enable: false
  script_url: https://utteranc.es/client.js
  repository: ''
  issue_term: pathname
  theme: github-dark

# Where the preview badge links to leave preview mode
preview_exit_path: /
"#;

const DEFAULT_STYLE: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: sans-serif;
  background: #1a1d23;
  color: #d7d7d7;
  line-height: 1.6;
}

.container {
  max-width: 720px;
  margin: 0 auto;
  padding: 2rem 1rem;
}

.site-title {
  color: #fff;
  font-size: 1.5rem;
  text-decoration: none;
}

.posts .post {
  display: block;
  color: inherit;
  text-decoration: none;
  margin-bottom: 3rem;
}

.info {
  display: flex;
  gap: 1.5rem;
  font-size: 0.875rem;
  color: #bbb;
}

.banner {
  width: 100%;
  max-height: 400px;
  object-fit: cover;
}

.edited {
  font-size: 0.875rem;
  font-style: italic;
  color: #bbb;
}

.post-pagination {
  display: flex;
  justify-content: space-between;
  margin-top: 3rem;
}

.preview-badge {
  position: fixed;
  bottom: 2rem;
  left: 2rem;
  padding: 0.75rem 1.5rem;
  border-radius: 2rem;
  background: #3ddc84;
}

.preview-badge a {
  color: #1a1d23;
  text-decoration: none;
}

#load-more {
  background: none;
  border: none;
  color: #ff57b2;
  font-size: 1rem;
  cursor: pointer;
  padding: 0;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("static/css/style.css").exists());

        // The scaffolded config parses back to the defaults
        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.title, "Spacewalk");
        assert_eq!(config.per_page, 2);
        assert_eq!(config.cms.document_type, "posts");
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_config.yml"), "title: Kept\n").unwrap();

        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.title, "Kept");
    }
}
