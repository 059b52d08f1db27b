//! Error conversions - HTTP rendering of [`AppError`]
//!
//! Every error body in the API has the same shape: `{ "error": "<message>" }`.

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use crate::error::{app_error::AppError, kind::ErrorKind};
    use axum::response::IntoResponse;

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorKind::Unauthorized, "Unauthorized").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);

        let response = AppError::new(ErrorKind::BadRequest, "Missing email").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_is_json() {
        let response = AppError::new(ErrorKind::Unauthorized, "Unauthorized").into_response();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        assert_eq!(content_type, Some("application/json"));
    }
}
