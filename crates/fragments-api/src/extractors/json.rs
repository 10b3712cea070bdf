//! JSON body extractors that reject with the standard error body.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use fragments_core::error::AppError;

use crate::error::ApiError;

/// `Json<T>` whose rejections become 400 validation errors.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::validation(format!("Invalid request body: {}", rejection.body_text()))
        })?;
        Ok(JsonBody(value))
    }
}

/// [`JsonBody`] that also runs the DTO's `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate().map_err(|e| AppError::validation(first_message(&e)))?;
        Ok(ValidatedJson(value))
    }
}

/// The message of the first failing field, by field name.
pub fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(length(max = 3))]
        code: String,
    }

    #[test]
    fn custom_message_is_used() {
        let sample = Sample {
            name: String::new(),
            code: "ok".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(first_message(&errors), "Name is required");
    }

    #[test]
    fn missing_message_names_the_field() {
        let sample = Sample {
            name: "x".to_string(),
            code: "toolong".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(first_message(&errors), "Invalid code");
    }
}
