use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use std::fs::OpenOptions;

/// Installs the global logger. Output goes to the configured file, or to
/// stderr so that stdout only carries command results.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    // Base configuration for all outputs
    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(config.level_filter());

    match config.file() {
        Some(file_path) => match OpenOptions::new().create(true).append(true).open(&file_path) {
            Ok(file) => base_config.chain(file).apply()?,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open log file '{}': {e}",
                    file_path.display()
                );
                eprintln!("Logging to stderr instead.");
                base_config.chain(std::io::stderr()).apply()?;
            }
        },
        None => base_config.chain(std::io::stderr()).apply()?,
    }

    log::debug!("Logger initialized with level: {}", config.level());
    Ok(())
}
