use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::core::error::AppError;

/// JSON body extractor whose rejections render as `{ "error": ... }` with 400
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => {
                format!("Invalid JSON syntax: {}", err.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            other => {
                tracing::debug!("Unhandled JSON rejection: {}", other);
                "Failed to parse JSON body".to_string()
            }
        };

        AppError::BadRequest(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct KeyBody {
        key: String,
    }

    async fn extract(request: Request<Body>) -> Result<AppJson<KeyBody>, AppError> {
        AppJson::<KeyBody>::from_request(request, &()).await
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let AppJson(body) = extract(json_request(r#"{"key":"avatars/a.png"}"#))
            .await
            .unwrap();
        assert_eq!(body.key, "avatars/a.png");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = extract(json_request("{")).await.err().unwrap();
        assert!(matches!(&err, AppError::BadRequest(m) if m.starts_with("Invalid JSON syntax")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .body(Body::from(r#"{"key":"a"}"#))
            .unwrap();

        let err = extract(request).await.err().unwrap();
        assert!(matches!(&err, AppError::BadRequest(m) if m.contains("application/json")));
    }
}
