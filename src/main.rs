//! CLI entry point for cre-pages

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cre-pages")]
#[command(version)]
#[command(about = "Programmatic SEO page generator for commercial real estate lending", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate pages, sitemap.xml and robots.txt (default)
    #[command(alias = "g")]
    Generate,

    /// Remove generated pages, sitemap.xml and robots.txt
    Clean,

    /// List loaded catalog content
    List {
        /// Type of content to list (loan, property, city, transaction)
        #[arg(default_value = "loan")]
        r#type: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "cre_pages=debug,info"
    } else {
        "cre_pages=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            let site = cre_pages::Site::new(&base_dir)?;
            tracing::info!("Generating pages from {:?}", site.data_dir);

            let report = site.generate().context("Generation failed")?;

            println!("{}", "=".repeat(50));
            println!("  TOTAL PAGES GENERATED: {}", report.total_pages());
            println!("  Sitemap URLs: {}", report.sitemap_urls);
            println!("  Output: {}", report.output_dir.display());
            println!("{}", "=".repeat(50));
        }

        Commands::Clean => {
            let site = cre_pages::Site::new(&base_dir)?;
            tracing::info!("Cleaning generated output...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = cre_pages::Site::new(&base_dir)?;
            cre_pages::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("cre-pages version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
