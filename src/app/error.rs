use std::{borrow::Cow, collections::HashMap};

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("malformed input in the request body")]
    AxumJsonRejection(#[from] JsonRejection),

    #[error("malformed query string")]
    AxumQueryRejection(#[from] QueryRejection),

    #[error("request does not meet requirements")]
    ValidationError(#[from] ValidationErrors),

    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize, ToSchema)]
pub struct InputErrorResponse {
    #[schema(value_type = HashMap<String, Vec<String>>)]
    errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::ValidationError(ref e) => {
                let mut error_map: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>> =
                    HashMap::new();
                collect_error_codes(e, &mut error_map);

                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(InputErrorResponse { errors: error_map }),
                )
                    .into_response();
            }

            Self::Anyhow(ref e) => {
                tracing::error!("Internal server error: {:?}", e)
            }

            _ => (),
        }

        (self.status_code(), self.to_string()).into_response()
    }
}

/// Flattens nested validation errors into `field -> [code]`, keeping only the
/// innermost field name.
fn collect_error_codes(
    errors: &ValidationErrors,
    error_map: &mut HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => error_map
                .entry(field.clone().into())
                .or_default()
                .extend(field_errors.iter().map(|e| e.code.clone())),
            ValidationErrorsKind::Struct(nested) => collect_error_codes(nested, error_map),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_error_codes(nested, error_map);
                }
            }
        }
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AxumJsonRejection(_) => StatusCode::BAD_REQUEST,
            Self::AxumQueryRejection(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn test_status_codes() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(ValidationErrors::new());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_nested_errors_are_flattened() {
        let mut inner = ValidationErrors::new();
        inner.add("svgAttributes", ValidationError::new("attribute_name"));

        let mut outer = ValidationErrors::new();
        outer.add("text", ValidationError::new("markup"));
        let outer = ValidationErrors::merge(Err(outer), "svg_attributes", Err(inner));

        let mut error_map = HashMap::new();
        collect_error_codes(&outer.unwrap_err(), &mut error_map);

        assert_eq!(error_map["text"], vec![Cow::Borrowed("markup")]);
        assert_eq!(error_map["svgAttributes"], vec![Cow::Borrowed("attribute_name")]);
    }
}
