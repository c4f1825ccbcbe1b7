//! Estimator API Server module
//!
//! Provides an HTTP REST API for computing and exporting estimates.
//! Run with `estimator-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server, ApiConfig};
