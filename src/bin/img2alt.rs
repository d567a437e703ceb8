//! CLI binary for img2alt.
//!
//! A thin shim over the library crate that maps CLI flags to `AppConfig`
//! and runs the web server.

use anyhow::{Context, Result};
use clap::Parser;
use img2alt::{server, AppConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Start with defaults (reads OPENROUTER_API_KEY from env or .env)
  img2alt

  # Bind elsewhere
  img2alt --host 127.0.0.1 --port 9000

  # Custom ledger and asset locations
  img2alt --ledger /var/lib/img2alt/descriptions.csv --asset-dir /var/lib/img2alt/temp
"#;

/// Generate alt text and page descriptions for images and PDFs,
/// with French translations.
#[derive(Parser, Debug)]
#[command(name = "img2alt", version, about, after_help = AFTER_HELP)]
struct Args {
    /// Listen address.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Listen port.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Chat-completions endpoint URL.
    #[arg(long, env = "IMG2ALT_API_URL")]
    api_url: Option<String>,

    /// API credential. Prefer setting OPENROUTER_API_KEY in the
    /// environment or a .env file over passing it on the command line.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// CSV ledger file path.
    #[arg(long, default_value = "image_descriptions.csv")]
    ledger: PathBuf,

    /// Temp-asset directory for display copies.
    #[arg(long, default_value = "static/temp")]
    asset_dir: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("img2alt={default_level},tower_http=info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed arguments' fallbacks.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let mut builder = AppConfig::builder()
        .host(args.host)
        .port(args.port)
        .ledger_path(args.ledger)
        .asset_dir(args.asset_dir);
    if let Some(url) = args.api_url {
        builder = builder.api_url(url);
    }
    if let Some(key) = args.api_key {
        builder = builder.api_key(key);
    }

    let config = builder.build().context("invalid configuration")?;

    server::serve(config).await.context("server failed")?;
    Ok(())
}
