//! Estimator API Server binary

use clap::Parser;
use unified_estimator::api::{run_api_server, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "estimator-server")]
#[command(version)]
#[command(about = "Estimator API Server - HTTP REST API for implementation cost estimates")]
#[command(long_about = r#"
Estimator API Server

Endpoints:
  - GET  /api/v1/modules                  - Estimation modules and default tasks
  - GET  /api/v1/modules/:name/template   - Template estimate input
  - POST /api/v1/estimate                 - Compute an estimate (JSON)
  - POST /api/v1/export                   - Compute an estimate as .xlsx
  - GET  /health, /version, /

Example usage:
  estimator-server                           # Start on localhost:8080
  estimator-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/estimate \
    -H "Content-Type: application/json" \
    -d @rule_estimate.json
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "ESTIMATOR_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "ESTIMATOR_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
