/**
 * JSON Body Extractor
 *
 * `ApiJson<T>` wraps axum's `Json<T>` so that a body rejection becomes a
 * `BackendError` and is answered with the usual
 * `{"success": false, "message": ...}` body instead of axum's plain text.
 */

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body with structured rejections
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
