//! File logging example
//!
//! Loads options from JSON, writes redacted JSON lines to a file and prints
//! what landed on disk.
//!
//! Run with: cargo run --example file_logging

use safe_json_logger::prelude::*;
use serde_json::json;

const CONFIG: &str = r#"{
    "level": "debug",
    "replacer": ["password", "apiKey"],
    "replacerArrayIncludes": false,
    "alwaysExcludeValues": ["4111-1111-1111-1111"],
    "excludedValue": "[REDACTED]"
}"#;

fn main() -> Result<()> {
    println!("=== Safe JSON Logger - File Logging Example ===\n");

    let path = std::env::temp_dir().join("safe_json_logger_demo.jsonl");
    let logger = Logger::builder()
        .config(LoggerConfig::from_json(CONFIG)?)
        .appender(FileAppender::new(&path)?)
        .build()?;

    println!("1. Writing to {}", path.display());
    logger.info(json!({"event": "login", "user": "ann", "password": "hunter2"}));
    logger.debug(json!({"event": "charge", "card": "4111-1111-1111-1111", "amount": 12.5}));
    logger.trace(json!({"event": "hidden"}));

    for i in 1..=3 {
        logger.info(json!({"event": "processing", "item": i, "of": 3}));
    }

    logger.flush()?;

    println!("\n2. File contents:");
    for line in std::fs::read_to_string(&path)?.lines() {
        println!("   {}", line);
    }

    let metrics = logger.metrics();
    println!(
        "\n3. Metrics: {} written, {} suppressed",
        metrics.lines_written(),
        metrics.suppressed_count()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
