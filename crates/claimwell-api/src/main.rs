//! Claimwell API server binary
//!
//! Starts the claim processing HTTP service.

use claimwell_api::{config::ApiConfig, start_server, ServiceError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServiceError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ApiConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: claimwell-api --config <path-to-config.toml>");
        eprintln!();
        ApiConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Claimwell API - Medical Insurance Claim Document Processor");
    println!();
    println!("USAGE:");
    println!("    claimwell-api --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    GEMINI_API_KEY     API key for the Gemini provider (required");
    println!("                       for claim processing; the server starts");
    println!("                       degraded without it)");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 8000)");
    println!("    - gemini_model: Model name (default: '{}')", claimwell_llm::gemini::DEFAULT_MODEL);
    println!();
    println!("ENDPOINTS:");
    println!("    GET  /               Liveness");
    println!("    GET  /health         Component readiness");
    println!("    POST /process-claim  Multipart PDF upload (field: files)");
    println!();
}
