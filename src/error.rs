use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

pub const REQUIRED_PARAMETERS: [&str; 4] = ["source", "destination", "distance", "weight"];

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
    pub detail: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({}): {}", self.message, self.code, detail),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        io_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self.code {
            1..=99 => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": self.message,
                    "message": self.detail.unwrap_or_default(),
                }),
            ),
            101 => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": self.message,
                    "required": REQUIRED_PARAMETERS,
                }),
            ),
            104 => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": self.message }),
            ),
            105 => (StatusCode::NOT_FOUND, json!({ "error": self.message })),
            _ => (StatusCode::BAD_REQUEST, json!({ "error": self.message })),
        };

        (status, Json(body)).into_response()
    }
}

impl Error {
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_client_error(&self) -> bool {
        self.code >= 100
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "invalid input".into(),
        detail: None,
    }
}

pub fn missing_parameters_error() -> Error {
    Error {
        code: 101,
        message: "Missing required parameters".into(),
        detail: None,
    }
}

pub fn non_positive_quantity_error() -> Error {
    Error {
        code: 102,
        message: "Distance and weight must be positive numbers".into(),
        detail: None,
    }
}

pub fn non_positive_factor_error() -> Error {
    Error {
        code: 103,
        message: "Location factors must be positive numbers".into(),
        detail: None,
    }
}

pub fn method_not_allowed_error() -> Error {
    Error {
        code: 104,
        message: "Method not allowed, use POST".into(),
        detail: None,
    }
}

pub fn location_not_found_error(id: &str) -> Error {
    Error {
        code: 105,
        message: "location not found".into(),
        detail: Some(id.into()),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
        detail: Some(err.to_string()),
    }
}

pub fn config_error(detail: impl Into<String>) -> Error {
    Error {
        code: 2,
        message: "configuration error".into(),
        detail: Some(detail.into()),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
        detail: Some(err.to_string()),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "Failed to predict price".into(),
        detail: None,
    }
}

pub fn invalid_output_error() -> Error {
    Error {
        code: 5,
        message: "Invalid output from prediction model".into(),
        detail: None,
    }
}

pub fn computation_error<T: Debug>(value: T) -> Error {
    Error {
        code: 6,
        message: "Internal server error".into(),
        detail: Some(format!("non-finite price computation: {:?}", value)),
    }
}

pub fn io_error(err: std::io::Error) -> Error {
    Error {
        code: 7,
        message: "I/O error".into(),
        detail: Some(err.to_string()),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 8,
        message: "Internal server error".into(),
        detail: None,
    }
}

#[test]
fn client_error_codes_test() {
    assert!(missing_parameters_error().is_client_error());
    assert!(non_positive_quantity_error().is_client_error());
    assert!(method_not_allowed_error().is_client_error());
    assert!(!upstream_error().is_client_error());
    assert!(!computation_error(f64::NAN).is_client_error());
}

#[test]
fn error_status_test() {
    assert_eq!(
        missing_parameters_error().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        method_not_allowed_error().into_response().status(),
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(
        location_not_found_error("XYZ").into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        upstream_error().with_detail("exit status 1").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
