//! API request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::EstimationModule;
use crate::core::estimate as run_estimate;
use crate::error::{EstimatorError, EstimatorResult};
use crate::excel::EstimateExporter;
use crate::parser::validate_input;
use crate::types::{EstimateInput, EstimateReport, TaskEntry};

use super::server::AppState;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "Estimator API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for implementation cost estimates".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("GET", "/api/v1/modules", "List estimation modules"),
            EndpointInfo::new(
                "GET",
                "/api/v1/modules/:name/template",
                "Template estimate input for a module",
            ),
            EndpointInfo::new("POST", "/api/v1/estimate", "Compute an estimate"),
            EndpointInfo::new("POST", "/api/v1/export", "Compute an estimate as .xlsx"),
        ],
    }))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
    }))
}

/// One catalog module with its default tasks
#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub tasks: Vec<TaskEntry>,
}

/// GET /api/v1/modules - Estimation modules
pub async fn modules() -> impl IntoResponse {
    let modules: Vec<ModuleInfo> = EstimationModule::all()
        .iter()
        .map(|m| ModuleInfo {
            name: m.name().to_string(),
            tasks: m.default_tasks(),
        })
        .collect();
    Json(ApiResponse::ok(modules))
}

/// GET /api/v1/modules/:name/template - Template input for a module
pub async fn template(Path(name): Path<String>) -> Response {
    match EstimationModule::from_name(&name) {
        Ok(module) => Json(ApiResponse::ok(module.template())).into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<EstimateInput>::err(e.to_string())),
        )
            .into_response(),
    }
}

fn checked_estimate(input: &EstimateInput) -> EstimatorResult<EstimateReport> {
    validate_input(input)?;
    run_estimate(input)
}

/// POST /api/v1/estimate - Compute an estimate
pub async fn estimate(Json(input): Json<EstimateInput>) -> Response {
    match checked_estimate(&input) {
        Ok(report) => {
            info!(
                module = %report.module,
                final_estimate = report.result.final_estimate,
                "estimate computed"
            );
            Json(ApiResponse::ok(report)).into_response()
        }
        Err(e) => {
            warn!(module = %input.module, error = %e, "estimate rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<EstimateReport>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/export - Compute an estimate and return the workbook
pub async fn export(Json(input): Json<EstimateInput>) -> Response {
    let result = checked_estimate(&input).and_then(|report| {
        let value = format!("attachment; filename=\"{}\"", report.default_file_name());
        let disposition = HeaderValue::from_str(&value)
            .map_err(|e| EstimatorError::Export(format!("Invalid file name: {}", e)))?;
        EstimateExporter::new(report)
            .export_to_buffer()
            .map(|bytes| (disposition, bytes))
    });

    match result {
        Ok((disposition, bytes)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!(module = %input.module, error = %e, "export rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok_creates_success_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test data".to_string());

        assert!(response.success);
        assert_eq!(response.data, Some("test data".to_string()));
        assert!(response.error.is_none());
        // UUID format (8-4-4-4-12)
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err_creates_error_response() {
        let response: ApiResponse<String> = ApiResponse::err("Something went wrong");

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a: ApiResponse<()> = ApiResponse::ok(());
        let b: ApiResponse<()> = ApiResponse::ok(());
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_api_response_skips_empty_fields() {
        let response: ApiResponse<String> = ApiResponse::err("bad");
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"error\":\"bad\""));
    }
}
