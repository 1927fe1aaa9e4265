use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const FALLBACK_BODY: &[u8] = br#"{"error":"Failed to encode response."}"#;

/// JSON response with an explicit status and exact `Content-Length`
pub struct JsonPayload<T>(pub StatusCode, pub T);

impl<T: Serialize> IntoResponse for JsonPayload<T> {
    fn into_response(self) -> Response {
        let JsonPayload(status, payload) = self;
        match serde_json::to_vec(&payload) {
            Ok(bytes) => encoded(status, bytes),
            Err(err) => {
                tracing::error!("Failed to encode JSON response: {}", err);
                encoded(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY.to_vec())
            }
        }
    }
}

fn encoded(status: StatusCode, bytes: Vec<u8>) -> Response {
    let length = HeaderValue::from(bytes.len());
    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
            (header::CONTENT_LENGTH, length),
        ],
        bytes,
    )
        .into_response()
}
