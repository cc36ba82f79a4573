//! NorSand CLI — descriptor generation, batch processing, and validation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use norsand_cli::commands;
use norsand_cli::settings::{GenerateOverrides, ModeFlag, ProcessOverrides};

#[derive(Parser)]
#[command(name = "norsand")]
#[command(version, about = "NorSand parametric study toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one solver input descriptor per sampled run.
    Generate {
        /// Study configuration (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory for the `ns-XXXXXX.json` descriptors.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sampling mode.
        #[arg(long, value_enum)]
        mode: Option<ModeFlag>,

        /// Number of random draws.
        #[arg(long)]
        samples: Option<usize>,

        /// Random seed.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify a range of solver runs and write the report tables.
    Process {
        /// Batch configuration (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root holding the `ns-XXXXXX/` run directories.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Number of runs.
        #[arg(long)]
        runs: Option<u32>,

        /// First run id.
        #[arg(long)]
        start: Option<u32>,

        /// Directory for tables, summary, and figures.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads (0 = one per core).
        #[arg(short, long)]
        threads: Option<usize>,

        /// Write per-run JSON figures.
        #[arg(long)]
        figures: bool,

        /// Leave unresolved critical points at -1.
        #[arg(long)]
        no_extrapolation: bool,

        /// Report the critical point in every table.
        #[arg(long)]
        extended: bool,
    },

    /// Classify a single run directory and print the result.
    Classify {
        /// Directory holding saveParams.txt and saveData.txt.
        run_dir: PathBuf,

        /// Leave unresolved critical points at -1.
        #[arg(long)]
        no_extrapolation: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a run descriptor (.json) or a configuration file (.toml).
    Validate {
        /// Path to descriptor or config file.
        path: PathBuf,
    },
}

fn main() {
    norsand_cli::logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, output, mode, samples, seed } => commands::generate(
            config.as_deref(),
            &GenerateOverrides {
                output,
                mode,
                samples,
                seed,
            },
        ),
        Commands::Process {
            config,
            data_dir,
            runs,
            start,
            output,
            threads,
            figures,
            no_extrapolation,
            extended,
        } => commands::process(
            config.as_deref(),
            &ProcessOverrides {
                data_dir,
                runs,
                start,
                output,
                threads,
                figures,
                no_extrapolation,
                extended,
            },
        ),
        Commands::Classify { run_dir, no_extrapolation, json } => {
            commands::classify(&run_dir, no_extrapolation, json)
        }
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
