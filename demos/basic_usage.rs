//! Basic logger usage example
//!
//! Logs a self-referencing payload with an embedded error at several levels,
//! pretty-printed to the console.
//!
//! Run with: cargo run --example basic_usage

use safe_json_logger::prelude::*;
use safe_json_logger::{info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Safe JSON Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level(LogLevel::Debug)
        .indent(Indent::Spaces(2))
        .build()?;

    let person = LogValue::object()
        .with("name", "freddy")
        .with(
            "address",
            json!({"street": "1234 lane st", "city": "hereshey", "st": "PA", "zip": "19293"}),
        )
        .with(
            "error",
            LogValue::from_error(&std::io::Error::new(
                std::io::ErrorKind::Other,
                "something bad happened",
            )),
        )
        .with("nest", json!({"really": {"deep": {"stuff": ["one", 2, "three"]}}}));
    person.insert("circular", person.clone());

    println!("1. A cyclic payload at error level:");
    logger.error(person);

    println!("\n2. Below the threshold (nothing printed):");
    logger.trace(json!({"hidden": true}));

    println!("\n3. Macros and a call-site key list:");
    info!(logger, {"event": "started", "port": 8080});
    warn!(logger, "disk usage high");
    logger.info_with(json!({"keep": 1, "drop": 2}), ["keep"], Some(Indent::None));

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
