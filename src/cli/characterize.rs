use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use powertrace::loader::TraceLoader;
use powertrace::report::analyze_all;

use super::{AnalysisOverrides, Config};

/// Characterize each power log and print its report
pub fn run(
    config: &Config,
    files: Vec<PathBuf>,
    json: bool,
    overrides: AnalysisOverrides,
) -> Result<()> {
    let loader = TraceLoader::new(config.loader_config());
    let analysis = config.analysis_config(overrides);

    let traces = files
        .iter()
        .map(|file| {
            loader
                .load_path(file)
                .with_context(|| format!("Failed to load {}", file.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let reports = analyze_all(&traces, &analysis).context("Analysis failed")?;
    info!("Characterized {} traces", reports.len());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?
        );
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", report.format_colored());
    }

    Ok(())
}
