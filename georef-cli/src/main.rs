//! Georef CLI - batch georeferencing driver
//!
//! Reads a GeoJSON FeatureCollection, runs every feature's property bag
//! through the georeferencing pipeline, and writes raster copies plus
//! sidecar files into the output directory.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use georef::{
    GeorefConfig, Georeferencer, ImageDecoder, OutcomeStatus, PropertyBag, ReqwestFetcher,
};

/// Georeference exported scene quicklooks from a feature collection.
#[derive(Debug, Parser)]
#[command(name = "georef", version, about)]
struct Cli {
    /// GeoJSON FeatureCollection with scene properties (id, sat_name, date,
    /// x1..y4, url)
    input: PathBuf,

    /// Directory for raster copies and sidecar files
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Root directory of the downloaded-images cache
    /// [default: platform data dir + /georef/images]
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Network timeout per scene download, in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Number of features processed in parallel
    #[arg(short = 'j', long, default_value_t = 4)]
    jobs: usize,

    /// World-file extension (without the leading dot)
    #[arg(long, default_value = "jgw")]
    world_ext: String,
}

fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("georef")
        .join("images")
}

/// Pull the property bags out of a GeoJSON FeatureCollection.
fn read_feature_properties(input: &PathBuf) -> Result<Vec<PropertyBag>, String> {
    let raw = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;
    let doc: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse {}: {}", input.display(), e))?;

    let features = doc
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| format!("{}: not a FeatureCollection", input.display()))?;

    Ok(features
        .iter()
        .filter_map(|f| f.get("properties"))
        .filter_map(|p| p.as_object().cloned())
        .collect())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let features = match read_feature_properties(&cli.input) {
        Ok(features) => features,
        Err(msg) => {
            error!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&cli.output_dir) {
        error!(
            "Failed to create output directory {}: {}",
            cli.output_dir.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    let fetcher = match ReqwestFetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = GeorefConfig::new(cli.cache_dir.unwrap_or_else(default_cache_dir))
        .with_fetch_timeout(Duration::from_secs(cli.timeout))
        .with_world_file_ext(cli.world_ext)
        .with_max_concurrent(cli.jobs);

    let georeferencer = Georeferencer::new(config, Arc::new(fetcher), Arc::new(ImageDecoder));
    let outcomes = georeferencer.run(features, &cli.output_dir).await;

    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.status {
            OutcomeStatus::Written { .. } => written += 1,
            OutcomeStatus::Skipped(_) => skipped += 1,
            OutcomeStatus::Failed(e) => {
                failed += 1;
                eprintln!(
                    "feature {} ({}): {}",
                    outcome.index,
                    outcome.scene_id.as_deref().unwrap_or("?"),
                    e
                );
            }
        }
    }

    println!(
        "{} features: {} written, {} skipped, {} failed",
        outcomes.len(),
        written,
        skipped,
        failed
    );

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
