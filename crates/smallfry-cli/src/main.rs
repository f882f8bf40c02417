//! smallfry CLI - score raw luma dumps

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

/// Perceptual quality metrics for recompressed images.
#[derive(Parser)]
#[command(name = "smallfry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a candidate luma plane against its reference
    Compare {
        /// Reference luma plane (raw 8-bit, row-major)
        #[arg(short, long)]
        reference: PathBuf,

        /// Candidate luma plane (raw 8-bit, row-major)
        #[arg(short, long)]
        candidate: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: usize,

        /// Image height in pixels
        #[arg(long)]
        height: usize,

        /// Metric preset
        #[arg(long, value_enum, default_value_t = Preset::All)]
        preset: Preset,

        /// JSON metric configuration (overrides --preset)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Window radius for the windowed metrics
        #[arg(long, allow_hyphen_values = true)]
        radius: Option<i32>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a correlation value to sigma
    Sigma {
        /// Correlation value
        #[arg(allow_hyphen_values = true)]
        correlation: f64,
    },

    /// Print the metric library version
    Version,
}

/// Named metric selections.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Preset {
    /// Every metric
    All,
    /// Non-windowed metrics
    Fast,
    /// Windowed metrics
    Structural,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compare {
            reference,
            candidate,
            width,
            height,
            preset,
            config,
            radius,
            format,
            output,
        } => commands::compare::run(
            &commands::compare::CompareArgs {
                reference,
                candidate,
                width,
                height,
                preset,
                config,
                radius,
                format,
                output,
            },
            cli.verbose,
        ),
        Commands::Sigma { correlation } => {
            println!("{}", smallfry::cor_sigma(correlation));
            Ok(())
        }
        Commands::Version => {
            println!("{}", smallfry::version());
            Ok(())
        }
    }
}
