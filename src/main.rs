//! imageops-cutout - remove uniform backgrounds from character art
//!
//! CLI entry point

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use imageops_cutout::{segment_and_cut, CutoutConfig};
use tracing::{error, info, warn, Level};

/// Cut characters out of near-uniform backgrounds
#[derive(Debug, Parser)]
#[command(name = "imageops-cutout", version, about)]
struct Cli {
    /// Images to process
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory receiving `<name>-cutout.png` files
    #[arg(short, long, default_value = "cutouts")]
    output_dir: PathBuf,

    /// TOML file overriding pipeline settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable the lower-region relaxed fill for inputs whose file name contains PATTERN
    #[arg(long = "relaxed-lower-fill-for", value_name = "PATTERN")]
    relaxed_lower_fill_for: Vec<String>,

    /// Enable the lower-region relaxed fill for every input
    #[arg(long)]
    lower_region_relaxed_fill: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Created(PathBuf),
    Skipped,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Processes every input; `Ok(false)` if any existing input failed.
fn run(cli: &Cli) -> Result<bool> {
    let base = load_config(cli.config.as_deref())?;
    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;

    let mut created = 0;
    let mut failed = 0;
    for (input, result) in cli.inputs.iter().zip(process_all(cli, &base)) {
        match result {
            Ok(Outcome::Created(_)) => created += 1,
            Ok(Outcome::Skipped) => {}
            Err(e) => {
                failed += 1;
                error!("[FAIL] {}: {e:#}", input.display());
            }
        }
    }

    info!(
        "Done. Rebuilt {created} cutouts in: {}",
        cli.output_dir.display()
    );
    Ok(failed == 0)
}

#[cfg(feature = "rayon")]
fn process_all(cli: &Cli, base: &CutoutConfig) -> Vec<Result<Outcome>> {
    use rayon::prelude::*;

    cli.inputs
        .par_iter()
        .map(|input| process_one(input, cli, base))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn process_all(cli: &Cli, base: &CutoutConfig) -> Vec<Result<Outcome>> {
    cli.inputs
        .iter()
        .map(|input| process_one(input, cli, base))
        .collect()
}

fn process_one(input: &Path, cli: &Cli, base: &CutoutConfig) -> Result<Outcome> {
    if !input.exists() {
        warn!("[SKIP] Missing source: {}", input.display());
        return Ok(Outcome::Skipped);
    }

    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("unusable file name: {}", input.display()))?;
    let config = config_for(
        file_name,
        &cli.relaxed_lower_fill_for,
        cli.lower_region_relaxed_fill,
        base,
    );

    let image = image::open(input)
        .with_context(|| format!("failed to decode {}", input.display()))?
        .to_rgb8();
    let cutout = segment_and_cut(&image, &config)
        .with_context(|| format!("failed to cut out {}", input.display()))?;

    let output = cli.output_dir.join(output_name(file_name));
    cutout
        .image
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "[OK] {} transparent={:.3}",
        output_name(file_name),
        cutout.transparency_ratio
    );
    Ok(Outcome::Created(output))
}

/// Per-input configuration: the relaxed lower fill is switched on by the
/// global flag, the config file, or a matching file-name pattern.
fn config_for(
    file_name: &str,
    patterns: &[String],
    enable_all: bool,
    base: &CutoutConfig,
) -> CutoutConfig {
    let relaxed = enable_all
        || base.lower_region_relaxed_fill
        || patterns.iter().any(|p| file_name.contains(p.as_str()));
    base.clone().with_lower_region_relaxed_fill(relaxed)
}

/// `name.png` becomes `name-cutout.png`; other names get the suffix appended.
fn output_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
    format!("{stem}-cutout.png")
}

fn load_config(path: Option<&Path>) -> Result<CutoutConfig> {
    let Some(path) = path else {
        return Ok(CutoutConfig::default());
    };
    let document = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    CutoutConfig::from_toml_str(&document)
        .with_context(|| format!("invalid config {}", path.display()))
}
