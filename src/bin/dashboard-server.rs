//! Sales Dashboard API Server Binary
//!
//! Run with: `cargo run --bin dashboard-server`

use sales_dashboard::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing is initialized in run_server(); RUST_LOG controls the level:
    //   RUST_LOG=debug cargo run --bin dashboard-server
    //   DASHBOARD_SEED=42 cargo run --bin dashboard-server  (reproducible data)
    //   DASHBOARD_REFRESH=request cargo run --bin dashboard-server  (fresh data per render)
    let config = ServerConfig::from_env()?;

    println!("Starting Sales Dashboard API Server...");
    println!("   Host: {}", config.host);
    println!("   Port: {}", config.port);
    match config.seed {
        Some(seed) => println!("   Seed: {}", seed),
        None => println!("   Seed: (random)"),
    }
    println!("   Refresh: {:?}", config.refresh);
    println!();
    println!(
        "Server will be available at: http://{}:{}",
        config.host, config.port
    );
    println!();
    println!("Available endpoints:");
    println!("  GET  /health                  - Health check");
    println!("  GET  /filters                 - Filter options and defaults");
    println!("  GET  /dashboard               - Rendered dashboard view");
    println!("  GET  /records.csv             - Filtered raw data as CSV");
    println!("  POST /dataset/regenerate      - Draw a fresh dataset");
    println!();

    run_server(config).await?;

    Ok(())
}
