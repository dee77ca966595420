use anyhow::{Context, Result};
use chrono::DateTime;
use std::path::PathBuf;

use powertrace::analysis::detect_load_changes;
use powertrace::loader::TraceLoader;

use super::{AnalysisOverrides, Config};

/// List readings deviating from the running mean
pub fn run(config: &Config, file: PathBuf, json: bool, overrides: AnalysisOverrides) -> Result<()> {
    let trace = TraceLoader::new(config.loader_config())
        .load_path(&file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let analysis = config.analysis_config(overrides);
    let changes = detect_load_changes(&trace, &analysis.load_change)
        .context("Failed to detect load changes")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&changes).context("Failed to serialize changes")?
        );
        return Ok(());
    }

    println!(
        "{} potential load changes (threshold {}%)",
        changes.len(),
        analysis.load_change.threshold_pct
    );
    for change in &changes {
        let time = DateTime::from_timestamp(change.timestamp as i64, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| change.timestamp.to_string());
        println!(
            "  #{:<8} {}  {:>10.2} W  (mean {:.2} W, {:.1}%)",
            change.index,
            time,
            change.watts,
            change.running_mean,
            change.deviation_pct
        );
    }

    Ok(())
}
