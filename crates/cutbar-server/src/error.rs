use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cutbar_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UsernameTaken(username) => ServerError::UsernameTaken(username),
            other => ServerError::Store(other),
        }
    }
}

/// Turn a store `NotFound` into a specific API error.
pub trait OrNotFound<T> {
    fn or_not_found(self, err: ServerError) -> Result<T, ServerError>;
}

impl<T> OrNotFound<T> for cutbar_store::Result<T> {
    fn or_not_found(self, err: ServerError) -> Result<T, ServerError> {
        match self {
            Err(StoreError::NotFound) => Err(err),
            other => other.map_err(ServerError::from),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::UserNotFound | ServerError::PostNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ServerError::UsernameTaken(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::Store(_) | ServerError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (ServerError::Validation("content: empty".into()), StatusCode::BAD_REQUEST),
            (ServerError::UserNotFound, StatusCode::NOT_FOUND),
            (ServerError::PostNotFound, StatusCode::NOT_FOUND),
            (StoreError::UsernameTaken("ana".into()).into(), StatusCode::CONFLICT),
            (StoreError::LockPoisoned.into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn not_found_is_rewritten_other_errors_pass_through() {
        let missing: cutbar_store::Result<()> = Err(StoreError::NotFound);
        assert!(matches!(
            missing.or_not_found(ServerError::PostNotFound),
            Err(ServerError::PostNotFound)
        ));

        let broken: cutbar_store::Result<()> = Err(StoreError::LockPoisoned);
        assert!(matches!(
            broken.or_not_found(ServerError::PostNotFound),
            Err(ServerError::Store(StoreError::LockPoisoned))
        ));
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let response = ServerError::Internal("disk on fire at /var/db".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }
}
