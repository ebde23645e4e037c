//! Finclusion: bank account ownership estimates for survey respondents.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use finclusion::adapters::JsonArtifactStore;
use finclusion::application::ResourceLoader;
use finclusion::config::Settings;
use finclusion::tui::App;

fn main() -> Result<()> {
    let settings = Settings::from_env();

    // Writing logs to the terminal corrupts the alternate screen, so an
    // interactive run logs to a file unless told otherwise.
    let use_file = settings.log_mode.use_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = settings.log_file.parent() {
            // Best-effort: a missing directory surfaces as an open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting Finclusion...");

    // Resources load before the terminal is touched; a failure exits with the error.
    let loader = ResourceLoader::new(JsonArtifactStore::new(settings.artifacts.clone()));
    let mut app = App::new(&loader)?;
    app.run()?;

    tracing::info!("Finclusion shutdown complete.");
    Ok(())
}
