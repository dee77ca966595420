use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use powertrace::cleaner::DataCleaner;

use super::Config;

/// Clean a raw export and write the tidy table
pub fn run(
    config: &Config,
    input: PathBuf,
    output: PathBuf,
    device_id: Option<String>,
    calc_energy: bool,
) -> Result<()> {
    let cleaner = DataCleaner::new(config.cleaner_config(device_id, calc_energy));

    let table = cleaner
        .clean_path(&input)
        .with_context(|| format!("Failed to clean {}", input.display()))?;

    table
        .write_path(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Cleaning complete!");
    info!("  Rows written: {}", table.len());
    info!("  Rows dropped: {}", table.dropped_rows());
    if let Some(energy) = table.total_energy_wh() {
        info!("  Total energy: {:.3} Wh", energy);
    }

    Ok(())
}
