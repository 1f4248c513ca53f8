//! Session file example
//!
//! Writes a few daily sessions to the file sink, reads the latest one back and
//! prunes all but the two most recent.
//!
//! Run with: cargo run --example session_files

use rust_profiling_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Profiling Logger - Session Files Example ===\n");

    let data_folder = std::env::temp_dir().join("rust_profiling_logger_demo");
    fs::create_dir_all(&data_folder)?;

    let registry = std::sync::Arc::new(SinkRegistry::new());
    for day in 1..=4 {
        let session = format!("2025-01-0{}", day);
        registry.set_session(&session);
        registry.add_file_sink(&data_folder, &format!("{}.log", session));

        for worker in 0..3 {
            let mut logger = Logger::new(&registry, format!("Worker{}", worker));
            {
                let _scope = logger.scope("Job", "run");
            }
            logger.flush();
        }
    }

    let mut service = SessionFileService::new(&data_folder);
    service.load_sessions()?;
    println!("1. Sessions, most recent first: {:?}", service.sessions());

    let latest = service.load_loggers_from_session_index(0)?;
    println!("2. Latest session holds {} loggers:", latest.len());
    for logger in &latest {
        println!(
            "   #{} {} ({} events, {:.3} ms)",
            logger.id,
            logger.name,
            logger.events.len(),
            logger.total_hrt
        );
    }

    let removed = service.purge_old_sessions(2)?;
    println!("3. Purged {} old sessions, kept {:?}", removed, service.sessions());

    println!("\n=== Example completed successfully! ===");
    println!("Session files live in {}", data_folder.display());

    Ok(())
}
