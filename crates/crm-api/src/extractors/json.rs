//! JSON body extractor that reports malformed bodies as validation errors.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;

use crm_core::error::{AppError, ErrorKind};

/// Like [`Json`], but a body that fails to parse becomes a 400
/// `VALIDATION_ERROR` in the standard error shape. A body over the
/// configured limit stays a 413.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected a JSON body with Content-Type: application/json")
        }
        JsonRejection::BytesRejection(bytes) if bytes.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            AppError::new(ErrorKind::PayloadTooLarge, "Request body is too large")
        }
        other => AppError::validation(format!("Invalid JSON body: {}", other.body_text())),
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::extract::DefaultBodyLimit;
    use axum::response::IntoResponse;
    use tower::ServiceExt;

    use super::*;

    fn post(body: &'static str, content_type: Option<&str>) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let err = ApiJson::<serde_json::Value>::from_request(post("{", Some("application/json")), &())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = ApiJson::<serde_json::Value>::from_request(post("{}", None), &())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ApiJson(value) =
            ApiJson::<serde_json::Value>::from_request(post(r#"{"a":1}"#, Some("application/json")), &())
                .await
                .unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_payload_too_large() {
        async fn echo(ApiJson(value): ApiJson<serde_json::Value>) -> impl IntoResponse {
            axum::Json(value)
        }
        let app = Router::new()
            .route("/", axum::routing::post(echo))
            .layer(DefaultBodyLimit::max(16));

        let response = app
            .oneshot(post(r#"{"name":"far too long for the limit"}"#, Some("application/json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
