//! Seawall terminal front end.

use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;

use app::App;
use seawall_core::{GameConfig, GameController, Preferences};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let turn_duration_secs: u32 = std::env::var("SEAWALL_TURN_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5);

    let prefs_path: PathBuf = std::env::var("SEAWALL_PREFS")
        .unwrap_or_else(|_| "seawall-prefs.json".into())
        .into();

    info!("Starting Seawall ({turn_duration_secs}s turns)...");

    let config = GameConfig {
        turn_duration_secs,
        show_timeout_dialogue: true,
    };
    let controller = GameController::new(config)?;
    let prefs = Preferences::load(&prefs_path);

    App::new(controller, prefs, prefs_path).run().await
}
