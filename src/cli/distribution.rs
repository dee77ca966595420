use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use powertrace::analysis::estimate_distribution;
use powertrace::loader::TraceLoader;

use super::{AnalysisOverrides, Config};

/// Write the power-level distribution of a log as `power_w,density` CSV
pub fn run(
    config: &Config,
    file: PathBuf,
    output: Option<PathBuf>,
    overrides: AnalysisOverrides,
) -> Result<()> {
    let trace = TraceLoader::new(config.loader_config())
        .load_path(&file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let analysis = config.analysis_config(overrides);
    let distribution = estimate_distribution(&trace, &analysis.distribution)
        .context("Failed to estimate distribution")?;

    info!(
        "{}: {:.2}% of samples above idle",
        file.display(),
        distribution.total_mass() * 100.0
    );

    match output {
        Some(path) => {
            let out = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            distribution
                .write_csv(BufWriter::new(out))
                .context("Failed to write distribution")?;
            info!("Wrote {} bins to {}", distribution.len(), path.display());
        }
        None => distribution
            .write_csv(io::stdout().lock())
            .context("Failed to write distribution")?,
    }

    Ok(())
}
