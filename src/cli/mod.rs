use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod characterize;
mod clean;
mod distribution;
mod load_changes;

mod config;

pub use config::{AnalysisOverrides, Config};

/// powertrace - Appliance Power-Trace Characterization
#[derive(Parser)]
#[command(name = "powertrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file (see powertrace.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Characterize one or more power logs
    Characterize {
        /// Input power log files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Number of distribution bins (default: 1000)
        #[arg(short = 'b', long)]
        bins: Option<usize>,

        /// Upper end of the power axis in watts (default: 1000)
        #[arg(short = 'm', long)]
        max_value: Option<f64>,
    },

    /// Export the power-level distribution of a power log as CSV
    Distribution {
        /// Input power log file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of distribution bins (default: 1000)
        #[arg(short = 'b', long)]
        bins: Option<usize>,

        /// Upper end of the power axis in watts (default: 1000)
        #[arg(short = 'm', long)]
        max_value: Option<f64>,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Clean a raw sensor export into a Time/Power/Energy table
    Clean {
        /// Raw export CSV file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Keep only rows of this device
        #[arg(short = 'd', long)]
        device_id: Option<String>,

        /// Skip the energy column
        #[arg(long)]
        no_energy: bool,
    },

    /// List readings that suggest the appliance changed
    LoadChanges {
        /// Input power log file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Deviation threshold in percent (default: 50)
        #[arg(short = 't', long)]
        threshold: Option<f64>,

        /// Print changes as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Characterize {
            files,
            json,
            bins,
            max_value,
        } => characterize::run(
            &config,
            files,
            json,
            AnalysisOverrides {
                bin_count: bins,
                max_value,
                ..Default::default()
            },
        ),
        Commands::Distribution {
            file,
            bins,
            max_value,
            output,
        } => distribution::run(
            &config,
            file,
            output,
            AnalysisOverrides {
                bin_count: bins,
                max_value,
                ..Default::default()
            },
        ),
        Commands::Clean {
            input,
            output,
            device_id,
            no_energy,
        } => clean::run(&config, input, output, device_id, !no_energy),
        Commands::LoadChanges {
            file,
            threshold,
            json,
        } => load_changes::run(
            &config,
            file,
            json,
            AnalysisOverrides {
                threshold_pct: threshold,
                ..Default::default()
            },
        ),
    }
}
