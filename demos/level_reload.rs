//! Level hot-reload example
//!
//! Points the logger at a level file, then rewrites the file and shows which
//! calls get through after each poll.
//!
//! Run with: cargo run --example level_reload

use safe_json_logger::prelude::*;
use serde_json::json;
use std::thread;
use std::time::Duration;

const POLL: Duration = Duration::from_millis(100);

fn emit_all(logger: &Logger) {
    for level in LogLevel::ALL {
        logger.log(level, json!({"probe": level.to_str()}));
    }
}

fn main() -> Result<()> {
    println!("=== Safe JSON Logger - Level Reload Example ===\n");

    let level_file = std::env::temp_dir().join("safe_json_logger_demo.level");
    std::fs::write(&level_file, "info\n")?;

    let logger = Logger::builder()
        .level(LogLevel::Trace)
        .level_file(&level_file)
        .poll_interval(POLL)
        .build()?;

    println!("1. Before the first poll (trace):");
    emit_all(&logger);

    thread::sleep(POLL * 3);
    println!("\n2. After the file said 'info' (now {}):", logger.level());
    emit_all(&logger);

    std::fs::write(&level_file, "ERROR")?;
    let reloaded = logger.level_source().refresh()?;
    println!("\n3. After an immediate refresh (now {}):", reloaded);
    emit_all(&logger);

    std::fs::write(&level_file, "verbose")?;
    thread::sleep(POLL * 3);
    println!("\n4. Unrecognized level '{}' silences everything:", logger.level());
    emit_all(&logger);

    logger.stop_level_polling();
    std::fs::remove_file(&level_file)?;

    println!(
        "\n{} level reloads, {} lines written",
        logger.metrics().level_reloads(),
        logger.metrics().lines_written()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
