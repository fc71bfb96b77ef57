//! Request extractors that report failures as [`ServerError`] JSON bodies.

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ServerError;

/// JSON body that must deserialize into `T` and pass `T`'s validation rules.
///
/// Malformed JSON, a missing field, a wrong primitive type and a failed rule
/// all become [`ServerError::Validation`] (400). The store is never reached.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ServerError::Validation(errors.to_string()))?;

        Ok(Self(value))
    }
}

/// Parse an integer id from a path segment. Anything non-numeric cannot name
/// a stored row, so it reads as `not_found`.
pub fn parse_id(raw: &str, not_found: ServerError) -> Result<i64, ServerError> {
    raw.parse::<i64>().map_err(|_| not_found)
}
