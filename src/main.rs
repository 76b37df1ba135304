//! agpack - AppGallery package generator for progressive web apps.
//!
//! This binary resolves package options from a web-app manifest and
//! drives the remote build service that produces the native package.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match agpack::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
