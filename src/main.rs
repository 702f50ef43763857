//! RAX FAT store - Entry Point
//!
//! Interactive shell over a block-chained file table.

use log::{error, info};
use tokio::io::BufReader;

use rax_fat_store::shell::run_shell;
use rax_fat_store::{FatSystem, StoreConfig};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching FAT store shell...");

    let config = match StoreConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut fat = match FatSystem::open(&config) {
        Ok(fat) => fat,
        Err(e) => {
            error!("Failed to open store at {}: {}", config.data_root, e);
            std::process::exit(1);
        }
    };

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = run_shell(&mut fat, stdin, tokio::io::stdout()).await {
        error!("Shell I/O error: {}", e);
    }
}
