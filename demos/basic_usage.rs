//! Basic recorder usage example
//!
//! Demonstrates console echo, nested profiling scopes and flushing to an
//! in-memory document store.
//!
//! Run with: cargo run --example basic_usage

use rust_profiling_logger::prelude::*;
use rust_profiling_logger::{log_err, log_ok};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Profiling Logger - Basic Usage Example ===\n");

    let store = Arc::new(MemoryCollection::new("loggers"));
    let registry = SinkRegistry::builder()
        .session("demo")
        .console()
        .store(store.clone(), Locality::Local)
        .build()?;

    println!("1. Logging events (results are echoed to the console):");
    let mut logger = Logger::new(&registry, "Importer");
    {
        let mut scope = logger.scope("Importer", "run");
        scope.log("Importer", "open", Some(Outcome::ok_with("customers.csv opened")));
        scope.log(
            "Importer",
            "parse",
            Some(Outcome::failure(3, "row rejected").with_payload(json!({ "row": 7 }))),
        );
        scope.set_outcome(Outcome::ok_with("import finished with warnings"));
    }
    log_ok!(logger, "Importer", "summary", "{} rows imported", 41);
    log_err!(logger, "Importer", "notify", 12, "mail server {} unreachable", "smtp-1");

    println!("\n2. Flushing:");
    let report = logger.flush();
    println!("   flush took {:.3} ms", report.elapsed_ms());
    println!("   logger lived {:.3} ms", report.total_hrt);
    println!("   event spread {} ms", logger.elapsed_since_start());
    println!("   balanced: {}", report.is_balanced());
    println!("   documents in store: {}", store.len());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
