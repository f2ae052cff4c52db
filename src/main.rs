//! SATCHEL — step-limited greedy item selection
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reads the item list (or falls back to the reference items), runs the
//! selector and prints a report.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use satchel::config::AppConfig;
use satchel::input;
use satchel::selection::Selector;
use satchel::types::SelectionReport;

const DEFAULT_CONFIG: &str = "config.toml";

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SATCHEL_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let cfg = if Path::new(&config_path).exists() {
        AppConfig::load(&config_path)?
    } else {
        warn!(path = %config_path, "Config file not found, using defaults");
        AppConfig::default()
    };

    let items = match cfg.items_path() {
        Some(path) => input::load_items(&path)?,
        None => input::reference_items(),
    };

    let selector = Selector::new(cfg.selector_config());
    let selection = selector
        .run(&items)
        .context("Selection failed")?;

    let sel_cfg = selector.config();
    let report = SelectionReport::new(
        &selection,
        sel_cfg.step_limit,
        sel_cfg.capacity,
        sel_cfg.policy,
        items.len(),
    );

    info!(
        run_id = %report.run_id,
        total_value = %report.total_value,
        picked = report.picked.len(),
        "Run complete"
    );

    if cfg.output.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialise report")?;
        println!("{json}");
    } else {
        println!("{report}");
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("satchel=info"));

    let json_logging = std::env::var("SATCHEL_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
