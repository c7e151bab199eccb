//! Trim timeline preview window.
//!
//! Reads the trim configuration from the RON file named by `TRIMLINE_CONFIG`
//! and falls back to defaults when it is unset.

use std::path::PathBuf;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trimline::core::{ConfigError, TrimConfig};
use trimline::ui::EditorApp;

fn load_config() -> Result<TrimConfig, ConfigError> {
    match std::env::var_os("TRIMLINE_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading trim config");
            TrimConfig::load(&path)
        }
        None => Ok(TrimConfig::default()),
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "trimline=debug,warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config().unwrap_or_else(|err| {
        tracing::warn!(%err, "invalid trim config, using defaults");
        TrimConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("trimline")
            .with_inner_size([1280.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "trimline",
        native_options,
        Box::new(move |cc| Box::new(EditorApp::new(cc, config))),
    )
}
