//! Basic logger usage example
//!
//! Demonstrates console logging, the level gate and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use app_logger_system::prelude::*;
use app_logger_system::{info, warning};

fn main() -> Result<()> {
    println!("=== App Logger System - Basic Usage Example ===\n");

    let logger = Logger::new();
    logger.configure(
        LoggerConfig::builder()
            .min_level(LogLevel::Verbose)
            .default_tag("Demo")
            .colors(true)
            .build()?,
    );

    println!("1. Logging at different levels:");
    logger.verbose("This is a verbose message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.flush();

    println!("\n2. Raising the minimum level to INFO:");
    logger.configure(
        LoggerConfig::builder()
            .min_level(LogLevel::Info)
            .format(FormatMode::Compact)
            .build()?,
    );
    logger.v("Verbose message (hidden)");
    logger.d("Debug message (hidden)");
    logger.i("Info message (visible)");
    logger.w("Warning message (visible)");
    logger.flush();

    println!("\n3. Macros with tags and function names:");
    let items = 3;
    info!(logger, tag: "Cart", "Cart holds {} items", items);
    warning!(logger, "Stock for SKU {} is low", "A1");

    let total = logger.measure("checksum", || (1..=1_000u64).sum::<u64>());
    info!(logger, "Checksum is {}", total);

    logger.shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
