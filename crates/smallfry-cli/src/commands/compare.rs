//! Compare command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use smallfry::{ComparisonReport, LumaPair, MetricConfig};

use crate::{OutputFormat, Preset};

pub struct CompareArgs {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    pub width: usize,
    pub height: usize,
    pub preset: Preset,
    pub config: Option<PathBuf>,
    pub radius: Option<i32>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// One CSV line per comparison; unselected metrics stay empty.
#[derive(Serialize)]
struct CsvRow<'a> {
    reference: &'a str,
    candidate: &'a str,
    width: usize,
    height: usize,
    radius: i32,
    smallfry: Option<f64>,
    correlation: Option<f64>,
    correlation_sigma: Option<f64>,
    sharpen_correlation: Option<f64>,
    sharpen_bad: Option<f64>,
    sharpen_distance: Option<f64>,
    ringing: Option<f64>,
}

pub fn run(args: &CompareArgs, verbose: bool) -> Result<()> {
    let mut config = load_config(args.preset, args.config.as_deref())?;
    if let Some(radius) = args.radius {
        config = config.with_radius(radius);
    }
    if config.is_empty() {
        bail!("No metrics selected");
    }

    if verbose {
        eprintln!("Reference: {}", args.reference.display());
        eprintln!("Candidate: {}", args.candidate.display());
    }

    let reference = fs::read(&args.reference)
        .with_context(|| format!("Failed to read {}", args.reference.display()))?;
    let candidate = fs::read(&args.candidate)
        .with_context(|| format!("Failed to read {}", args.candidate.display()))?;

    let pair = LumaPair::new(&reference, &candidate, args.width, args.height)
        .context("Invalid luma planes")?;
    let report = ComparisonReport::compute(&pair, &config);
    log::debug!("computed {:?}", report.metrics);

    let rendered = match args.format {
        OutputFormat::Json => report.to_json()? + "\n",
        OutputFormat::Csv => render_csv(args, &report)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            if verbose {
                eprintln!("Saved to: {}", path.display());
            }
        }
        None => std::io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

fn load_config(preset: Preset, path: Option<&Path>) -> Result<MetricConfig> {
    if let Some(path) = path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        return serde_json::from_str(&json)
            .with_context(|| format!("Invalid config {}", path.display()));
    }

    Ok(match preset {
        Preset::All => MetricConfig::all(),
        Preset::Fast => MetricConfig::fast(),
        Preset::Structural => MetricConfig::structural(),
    })
}

fn render_csv(args: &CompareArgs, report: &ComparisonReport) -> Result<String> {
    let reference = args.reference.display().to_string();
    let candidate = args.candidate.display().to_string();
    let metrics = &report.metrics;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(CsvRow {
        reference: &reference,
        candidate: &candidate,
        width: report.width,
        height: report.height,
        radius: report.config.radius,
        smallfry: metrics.smallfry,
        correlation: metrics.correlation,
        correlation_sigma: metrics.correlation_sigma,
        sharpen_correlation: metrics.sharpen_correlation,
        sharpen_bad: metrics.sharpen_bad,
        sharpen_distance: metrics.sharpen_distance,
        ringing: metrics.ringing,
    })?;

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
