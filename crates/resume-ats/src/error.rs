use crate::ats::{TaxonomyError, ToolError};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Taxonomy(TaxonomyError),
    Tool(ToolError),
    Input(serde_json::Error),
    UnknownSkill(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Taxonomy(err) => write!(f, "skill taxonomy error: {}", err),
            AppError::Tool(err) => write!(f, "{}", err),
            AppError::Input(err) => write!(f, "invalid input: {}", err),
            AppError::UnknownSkill(name) => write!(f, "unknown skill '{}'", name),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Taxonomy(err) => Some(err),
            AppError::Tool(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::UnknownSkill(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Tool(_) | AppError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownSkill(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Taxonomy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<TaxonomyError> for AppError {
    fn from(value: TaxonomyError) -> Self {
        Self::Taxonomy(value)
    }
}

impl From<ToolError> for AppError {
    fn from(value: ToolError) -> Self {
        Self::Tool(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_errors_keep_their_prefix_and_map_to_422() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::from(ToolError::InvalidInput(parse));
        assert!(error.to_string().starts_with("ATS Scoring failed:"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn config_errors_are_server_errors() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert_eq!(error.to_string(), "configuration error: APP_PORT must be a valid u16");
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn io_errors_from_binding_are_server_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let error = AppError::from(io);
        assert_eq!(error.to_string(), "io error: address in use");
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
