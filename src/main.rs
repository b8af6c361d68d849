// src/main.rs
mod extractors;
mod index;
mod storage;
mod utils;

use std::path::Path;

use clap::Parser;

use index::IndexBuilder;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the Polaris backup index generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the backup files; the index is written there too
    #[arg(short, long, default_value = ".")]
    dir: String,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting index generation for args: {:?}", args);

    // 3. Scan the directory and assemble the index document
    let builder = IndexBuilder::new();
    let document = builder.build(Path::new(&args.dir))?;

    // 4. Write the document into the scanned directory
    let storage = StorageManager::new(&args.dir)?;
    let index_path = storage.save_index(&document)?;

    // 5. Operator-facing report
    println!("✅ Generated {} successfully!", index_path.display());
    println!("📊 Backup count: {}", document.total_count);
    println!("📁 Files:");
    for backup in &document.backups {
        println!("   - {} ({})", backup.label, backup.filename);
    }

    Ok(())
}
