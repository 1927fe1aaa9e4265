use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use chart_engine::{assemble_chart, normalize_datetime, verify_data_directory, ChartInput};
use models::{ChartRequest, HealthResponse};
use serde_json::Value;
use std::sync::PoisonError;

use crate::{
    error::ApiError,
    response::JsonPayload,
    state::{AppState, EngineSlot},
    Result,
};

/// GET / and GET /health
/// Health probe; never touches the engine
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    JsonPayload(
        StatusCode::OK,
        HealthResponse {
            ok: true,
            service: state.settings.service_name.clone(),
            hint: state.settings.hint.clone(),
        },
    )
}

/// POST /
/// Computes a natal chart for the posted request
pub async fn create_chart(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse> {
    let request = decode_request(&body)?;
    let utc = normalize_datetime(request.utc_datetime.as_ref())?;

    let engine = match &state.engine {
        EngineSlot::Ready(engine) => engine.clone(),
        EngineSlot::Unavailable(details) => {
            return Err(ApiError::EngineUnavailable(details.clone()));
        }
    };

    let ephe_path = state.ephe_path.clone();
    let chart = tokio::task::spawn_blocking(move || -> Result<_> {
        verify_data_directory(&ephe_path)?;

        // A panic in an earlier chart leaves the engine usable.
        let mut guard = engine.lock().unwrap_or_else(PoisonError::into_inner);
        let input = ChartInput {
            request: &request,
            utc,
            ephe_path: &ephe_path,
        };
        Ok(assemble_chart(&mut *guard, &input)?)
    })
    .await
    .map_err(|e| ApiError::Computation(e.to_string()))??;

    Ok(JsonPayload(StatusCode::OK, chart))
}

/// Any other method on a known path
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}

/// Any unknown path
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

// An empty body decodes as `{}` and then fails timestamp validation.
fn decode_request(body: &[u8]) -> Result<ChartRequest> {
    let raw: &[u8] = if body.is_empty() { b"{}" } else { body };
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| ApiError::MalformedRequestBody(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::MalformedRequestBody(
            "expected a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ApiError::MalformedRequestBody(e.to_string()))
}
