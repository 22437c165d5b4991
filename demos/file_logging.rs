//! File logging example
//!
//! Demonstrates logging to the console and to a rotating log file.
//!
//! Run with: cargo run --example file_logging

use app_logger_system::prelude::*;

fn main() -> Result<()> {
    println!("=== App Logger System - File Logging Example ===\n");

    let config = LoggerConfig::builder()
        .min_level(LogLevel::Debug)
        .show_thread(true)
        .file(
            FileOptions::new("logs")
                .with_prefix("demo")
                .with_max_size(4 * 1024)
                .with_max_backups(3),
        )
        .build()?;
    let logger = Logger::with_config(config);

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warning("Using default settings for some options");

    let cause: SharedError = std::sync::Arc::new(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "plugin.toml not found",
    ));
    logger.log_with(LogLevel::Error, "Failed to load optional plugin", "Plugins", Some(cause));

    println!("\n2. Writing enough entries to trigger rotation:");
    for i in 1..=200 {
        logger.debug(format!("Processing item {}/200", i));
    }
    logger.flush();

    println!("\n3. Files on disk, newest first:");
    for path in logger.log_files() {
        println!("   {}", path.display());
    }

    logger.shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
