//! # powertrace CLI
//!
//! Command-line front end for characterizing appliance power logs.
//!
//! ## Usage
//!
//! ```bash
//! # Characterize two appliances side by side
//! powertrace characterize data/printer-data.csv data/water-data.csv
//!
//! # Export the power-level distribution for plotting
//! powertrace distribution data/printer-data.csv -o printer-dist.csv
//!
//! # Clean a raw database export
//! powertrace clean raw-export.csv tidy.csv --device-id 563672
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
