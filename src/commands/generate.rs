//! Generate static files

use anyhow::Result;

use crate::cms::HttpContentApi;
use crate::generator::Generator;
use crate::Spacewalk;

/// Generate the static site from the current CMS content
pub async fn run(app: &Spacewalk, preview_ref: Option<&str>) -> Result<()> {
    let start = std::time::Instant::now();

    let client = HttpContentApi::new(app.config.cms.clone());
    let generator = Generator::new(app, &client)?;
    generator.generate(preview_ref).await?;

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}
