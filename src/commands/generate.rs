//! Generate static files

use crate::content::DataLoader;
use crate::error::Result;
use crate::generator::{GenerationReport, Generator};
use crate::Site;

/// Load the catalogs and render every page
pub fn run(site: &Site) -> Result<GenerationReport> {
    let start = std::time::Instant::now();

    let data = DataLoader::new(&site.data_dir).load_all()?;
    let generator = Generator::new(site)?;
    let report = generator.generate(&data)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        report.total_pages(),
        duration.as_secs_f64()
    );

    Ok(report)
}
