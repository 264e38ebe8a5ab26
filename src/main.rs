use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use curricula::PipelineConfig;

/// Command-line arguments for curricula
#[derive(Parser, Debug)]
#[command(name = "curricula")]
#[command(about = "Merge curricular-plan spreadsheets into one discipline table")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Final artifact path (`.xlsx`, `.csv` or `.parquet`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the per-source intermediate artifacts
    #[arg(long)]
    intermediate_dir: Option<PathBuf>,

    /// Load files one at a time
    #[arg(long)]
    sequential: bool,

    /// Skip unreadable or malformed files instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Draw progress bars while loading
    #[arg(long)]
    progress: bool,
}

impl Args {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(output) = self.output {
            config.output.path = output;
        }
        if let Some(dir) = self.intermediate_dir {
            config.output.intermediate_dir = Some(dir);
        }
        if self.sequential {
            config.parallel = false;
        }
        if self.skip_unreadable {
            config.skip_unreadable_files = true;
        }
        if self.progress {
            config.show_progress = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    info!(
        "Loading master plans from {}, specializations from {}, microcredentials from {}",
        config.master_dir.display(),
        config.specialization_dir.display(),
        config.microcredential_file.display()
    );

    let summary = curricula::run(&config).context("Pipeline run failed")?;

    for (kind, rows) in &summary.source_rows {
        info!("{kind}: {rows} rows");
    }
    info!(
        "Wrote {} disciplines to {} in {:?}",
        summary.merge.output_rows,
        summary.output.display(),
        summary.elapsed
    );
    Ok(())
}
