//! LSG Dashboard - interactive terminal view of the plant inventory
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin lsg_dashboard
//! ```
//!
//! ## Environment Variables
//!
//! - CONNECTIONS_SUPABASE_URL / CONNECTIONS_SUPABASE_KEY - Managed connection (primary source)
//! - SUPABASE_URL / SUPABASE_KEY - Direct client (fallback, also used by the managed connection when unset)
//! - LSG_SNAPSHOT_PATH - JSON snapshot used when both Supabase sources fail (optional)
//! - LSG_TABLE - Table name (default: plant_inventory)
//! - LSG_CACHE_TTL_SECS - Cache lifetime in seconds (default: 300)
//! - LSG_REQUEST_TIMEOUT_SECS - HTTP request timeout in seconds (default: 30)
//! - LSG_ACTIVE_ATTENTION_DAYS - Age after which an Active plant needs attention (default: 60)
//! - LSG_CUTBACK_ATTENTION_DAYS - Age after which a Cut Back plant needs attention (default: 90)
//! - RUST_LOG - Logging level (optional, default: errors only)
//!
//! ## Keys
//!
//! `g`/`s`/`b` cycle the genotype, status and bench filters, `c` clears them,
//! `r` reloads from the source, `j`/`k` scroll the table, `q` quits.

use lsg_inventory::{ui, Config, Dashboard};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr; without RUST_LOG only errors are shown so the
    // alternate screen stays clean
    let mut builder = if std::env::var("RUST_LOG").is_ok() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    } else {
        env_logger::Builder::from_default_env()
    };
    builder.target(env_logger::Target::Stderr).init();

    let config = Config::from_env();

    log::info!("🌱 Starting LSG inventory dashboard...");
    config.log_summary();

    let mut dashboard = Dashboard::from_config(&config);
    ui::run_ui(&mut dashboard).await?;

    log::info!("👋 Dashboard closed");
    Ok(())
}
