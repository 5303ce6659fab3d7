//! Basic logger usage example
//!
//! Demonstrates named loggers, level control, templates and target layout.
//!
//! Run with: cargo run --example basic_usage

use reggol::prelude::*;
use reggol::{info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Reggol - Basic Usage Example ===\n");

    let factory = Factory::builder()
        .target(ConsoleTarget::target().with_show_diff(true))
        .formatter('u', |value, _, _| value.to_string().to_uppercase())
        .build()?;

    let logger = factory.create_logger("app");

    println!("1. Logging every message type:");
    logger.set_level(DEBUG);
    logger.success(["This is a success message"]);
    logger.error(["This is an error message"]);
    logger.info(["This is an info message"]);
    logger.warn(["This is a warning message"]);
    logger.debug(["This is a debug message"]);

    println!("\n2. Templates and structured values:");
    info!(logger, "user %s signed in from %s", "alice", "10.0.0.7");
    info!(logger, "retrying in %dms, shouting %u", 250, "done");
    warn!(logger, "config loaded", json!({ "port": 8080, "tls": { "enabled": false } }));

    println!("\n3. Namespaced loggers inherit levels:");
    let db = logger.extend("db");
    db.set_level(ERROR);
    db.info(["Info message (hidden)"]);
    db.error(["Error message (visible)"]);

    println!("\n4. Errors log their cause:");
    let failure = LoggedError::new("query failed").with_cause(LoggedError::new("connection reset"));
    db.error([failure]);

    println!("\n5. Right-aligned labels:");
    factory.set_levels(LevelTree::new(INFO));
    let aligned = MemoryTarget::new();
    factory.add_target(Target::printer(aligned.clone()).with_label(LabelStyle {
        width: 10,
        margin: 2,
        align: Align::Right,
    }));
    factory.create_logger("http").info(["GET /health\n200 OK"]);
    print!("{}", aligned.contents());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
