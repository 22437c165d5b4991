//! Network logging example
//!
//! Demonstrates request/response logging through the process-wide logger.
//!
//! Run with: cargo run --example network_logging

use app_logger_system::global;
use app_logger_system::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

fn fetch(url: &str, status: u16) -> (u16, u64) {
    global::log_request(
        "get",
        url,
        Some(&[("Accept", "application/json"), ("X-Request-Id", "demo-1")][..]),
        None,
    );
    let start = Instant::now();
    thread::sleep(Duration::from_millis(15));
    (status, start.elapsed().as_millis() as u64)
}

fn main() -> Result<()> {
    println!("=== App Logger System - Network Logging Example ===\n");

    global::configure(
        LoggerConfig::builder()
            .format(FormatMode::Compact)
            .add_filter(LogFilter::tag_is_not("Analytics"))
            .build()?,
    );

    for (url, status) in [
        ("https://api.example.com/products", 200),
        ("https://api.example.com/legacy", 301),
        ("https://api.example.com/products/999", 404),
        ("https://api.example.com/checkout", 503),
    ] {
        let (status, elapsed_ms) = fetch(url, status);
        global::log_response(url, status, elapsed_ms, Some(r#"{"ok":false}"#));
    }

    global::log_with(LogLevel::Info, "Dropped by the tag filter", "Analytics", None);

    let parsed = global::measure("parse catalog", || {
        thread::sleep(Duration::from_millis(5));
        42
    });
    global::info(format!("Parsed {} products", parsed));

    global::shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
