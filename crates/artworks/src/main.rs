mod bootstrap;
mod tasks;

use anyhow::Result;
use artworks_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("artworks v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Task: {}, input: {}, database: {}",
        settings.task,
        settings.input.display(),
        settings.database.display()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    tasks::run(&settings, &mut out)?;

    tracing::info!("Task '{}' finished", settings.task);
    Ok(())
}
