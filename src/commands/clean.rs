//! Clean generated output

use std::fs;
use std::path::Path;

use crate::error::{GenError, Result};
use crate::generator::{FINANCING_DIR, PROPERTY_DIR};
use crate::Site;

/// Remove everything `generate` writes, leaving hand-written pages alone
pub fn run(site: &Site) -> Result<()> {
    for dir in [FINANCING_DIR, PROPERTY_DIR] {
        let path = site.public_dir.join(dir);
        if path.exists() {
            fs::remove_dir_all(&path).map_err(|source| write_error(&path, source))?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    for file in ["sitemap.xml", "robots.txt"] {
        let path = site.public_dir.join(file);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| write_error(&path, source))?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> GenError {
    GenError::Write {
        path: path.to_path_buf(),
        source,
    }
}
