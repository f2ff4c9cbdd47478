//! osgrid-url
//!
//! Prints Ordnance Survey tile request URLs for host tile addresses.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use osgrid_tiles::{Protocol, TileAddress, TileSource, TileSourceConfig};
use osgrid_url::{load_config, resolve_block, write_tiles, Overrides};

#[derive(Parser, Debug)]
#[command(name = "osgrid-url")]
#[command(about = "Resolve Ordnance Survey tile request URLs")]
struct Args {
    /// Tile source configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,

    /// Service API key
    #[arg(long, env = "OS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Service generation: legacy-bbox or matrix
    #[arg(short, long)]
    protocol: Option<Protocol>,

    /// Image format override
    #[arg(long)]
    format: Option<String>,

    /// GetTile layer override
    #[arg(long)]
    layer: Option<String>,

    /// Endpoint override
    #[arg(long)]
    base_url: Option<String>,

    /// Host zoom level
    #[arg(short, long, default_value_t = 0)]
    zoom: u32,

    /// Host tile column
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    col: i64,

    /// Host tile row (negative from the top of the grid)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    row: i64,

    /// Columns in the block to resolve
    #[arg(long, default_value_t = 1)]
    cols: u32,

    /// Rows in the block to resolve
    #[arg(long, default_value_t = 1)]
    rows: u32,

    /// Emit one JSON record per tile
    #[arg(long)]
    json: bool,

    /// Print the attribution text before the URLs
    #[arg(long)]
    attribution: bool,

    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let config = load_config(path)?;
            info!(path = %path, protocol = %config.protocol, "Loaded tile source configuration");
            config
        }
        None => TileSourceConfig::default(),
    };

    let overrides = Overrides {
        api_key: args.api_key.clone(),
        protocol: args.protocol,
        format: args.format.clone(),
        layer: args.layer.clone(),
        base_url: args.base_url.clone(),
    };
    let source =
        TileSource::new(overrides.apply(config)).context("Invalid tile source configuration")?;

    let origin = TileAddress::new(args.col, args.row, args.zoom);
    let tiles = resolve_block(&source, origin, args.cols, args.rows)
        .with_context(|| format!("Failed to resolve tiles from {}", origin))?;
    debug!(count = tiles.len(), "Resolved tiles");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.attribution {
        writeln!(out, "{}", source.attribution_text())?;
    }
    write_tiles(&mut out, &tiles, args.json)?;

    Ok(())
}
