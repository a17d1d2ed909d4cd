use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use color_census::{
    sampling, AnalysisConfig, ColorAnalyzer, DistanceFormula, ReferencePalette,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Classify image colors against a named palette and extract dominant colors.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Palette JSON file: array of {"name", "hex"} records (default: built-in palette)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Analysis configuration JSON file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Distance formula: CIE76, CIE94 or CIEDE2000
    #[arg(short, long)]
    formula: Option<DistanceFormula>,

    /// Number of dominant colors
    #[arg(short = 'k', long)]
    clusters: Option<usize>,

    /// Number of k-means iterations
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(formula) = args.formula {
        config.formula = formula;
    }
    if let Some(clusters) = args.clusters {
        config.cluster_count = clusters;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }

    let palette = match &args.palette {
        Some(path) => ReferencePalette::from_json_file(path)
            .with_context(|| format!("loading palette {}", path.display()))?,
        None => ReferencePalette::builtin(),
    };
    let analyzer = ColorAnalyzer::new(config.clone()).context("invalid analysis settings")?;

    for input in &args.inputs {
        let samples = sampling::load_samples(input, &config.sampling)
            .with_context(|| format!("sampling {}", input.display()))?;
        let report = analyzer.analyze(&palette, &samples);

        let document = json!({
            "file": input.display().to_string(),
            "samples": report.sample_count,
            "formula": report.formula,
            "percentages": report.export(),
            "dominant": report.dominant_hex(),
        });

        let text = if args.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        println!("{text}");
    }

    Ok(())
}
