//! Request extractors with this API's error body.
//!
//! Axum's own `Json` and `Query` reject with plain text; these wrappers turn
//! every rejection into a 400 with `{"error", "code"}`.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use super::session::ErrorResponse;

/// Like [`Json`], covering syntax errors, wrong shapes and a missing
/// content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject("body", rejection.body_text())),
        }
    }
}

/// Like [`Query`], covering query strings that do not fit `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject("query", rejection.body_text())),
        }
    }
}

fn reject(source: &'static str, reason: String) -> Response {
    tracing::warn!(source, reason = %reason, "Rejected request");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(reason)),
    )
        .into_response()
}
