//! HTTP handlers for the pipeline endpoints.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    ConvertExportCommand, ConvertExportHandler, GenerateCasesCommand, GenerateCasesHandler,
    GenerateDiagramCommand, GenerateDiagramHandler, PipelineError,
};

use super::dto::{
    ConvertRequest, ConvertResponse, DiagramRequest, DiagramResponse, ErrorResponse,
    GenerateRequest, GenerateResponse,
};

/// Shared handler state for the HTTP surface.
#[derive(Clone)]
pub struct CasegenHandlers {
    generate_handler: Arc<GenerateCasesHandler>,
    convert_handler: Arc<ConvertExportHandler>,
    diagram_handler: Arc<GenerateDiagramHandler>,
    /// Directory convert sources are resolved against.
    output_dir: PathBuf,
    /// Stem used when the request doesn't name one.
    default_stem: String,
}

impl CasegenHandlers {
    pub fn new(
        generate_handler: Arc<GenerateCasesHandler>,
        convert_handler: Arc<ConvertExportHandler>,
        diagram_handler: Arc<GenerateDiagramHandler>,
        output_dir: impl Into<PathBuf>,
        default_stem: impl Into<String>,
    ) -> Self {
        Self {
            generate_handler,
            convert_handler,
            diagram_handler,
            output_dir: output_dir.into(),
            default_stem: default_stem.into(),
        }
    }
}

/// POST /api/generate - Generate test cases and export them
pub async fn generate_cases(
    State(handlers): State<CasegenHandlers>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    let cmd = GenerateCasesCommand {
        topic: req.topic,
        context: req.context,
        num_cases: req.num_cases,
        field_set: req.field_set,
        format: req.format,
        stem: req.stem.unwrap_or_else(|| handlers.default_stem.clone()),
    };

    match handlers.generate_handler.handle(cmd).await {
        Ok(result) => {
            let response = GenerateResponse {
                message: "Test cases generated successfully.".to_string(),
                path: result.path.display().to_string(),
                record_count: result.record_count,
                format: result.format,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => pipeline_error_response(e),
    }
}

/// POST /api/convert - Convert a saved JSON export to CSV
pub async fn convert_export(
    State(handlers): State<CasegenHandlers>,
    Json(req): Json<ConvertRequest>,
) -> Response {
    // Only bare filenames inside the output directory are accepted.
    if !is_bare_filename(Path::new(&req.file)) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "invalid_request",
                "file must be a bare filename inside the export directory",
            )),
        )
            .into_response();
    }

    let cmd = ConvertExportCommand {
        source_path: handlers.output_dir.join(&req.file),
        field_set: req.field_set,
        stem: req.stem,
    };

    match handlers.convert_handler.handle(cmd).await {
        Ok(result) => {
            let response = ConvertResponse {
                message: "Conversion successful.".to_string(),
                path: result.path.display().to_string(),
                record_count: result.record_count,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => pipeline_error_response(e),
    }
}

/// POST /api/diagram - Generate a PlantUML sequence diagram
pub async fn generate_diagram(
    State(handlers): State<CasegenHandlers>,
    Json(req): Json<DiagramRequest>,
) -> Response {
    let cmd = GenerateDiagramCommand {
        scenario: req.scenario,
        stem: req.stem.unwrap_or_else(|| "test_scenario".to_string()),
    };

    match handlers.diagram_handler.handle(cmd).await {
        Ok(result) => {
            let response = DiagramResponse {
                message: "Diagram generated successfully.".to_string(),
                path: result.path.display().to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => pipeline_error_response(e),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

/// Maps pipeline failures onto HTTP statuses, fail-loud.
fn pipeline_error_response(err: PipelineError) -> Response {
    let (status, kind) = match &err {
        PipelineError::Source(_) => (StatusCode::BAD_REQUEST, "source_unavailable"),
        PipelineError::Service(_) => (StatusCode::BAD_GATEWAY, "service_error"),
        PipelineError::Normalization(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "normalization_failure")
        }
        PipelineError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "export_failure"),
    };

    tracing::warn!(kind, error = %err, "pipeline invocation failed");
    (status, Json(ErrorResponse::new(kind, err.to_string()))).into_response()
}

fn is_bare_filename(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
