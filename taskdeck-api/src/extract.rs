/// Request body extraction with validation
///
/// [`ValidatedJson`] parses a JSON body, normalizes it, then runs
/// `validator` rules. Malformed bodies become `400 bad_request` and rule
/// failures become `400 validation_error`, both in the standard error format.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Input cleanup applied before validation (trimming, case folding)
pub trait Normalize {
    fn normalize(&mut self) {}
}

/// JSON body that has been normalized and validated
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.normalize();
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Trims a string field in place
pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
