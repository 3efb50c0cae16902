//! Error types for ScholarGraph services
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - HTTP status code mapping
//! - Retryability classification for upstream failures
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,

    // External service errors (8xxx)
    UpstreamError,
    UpstreamTimeout,
    UpstreamRateLimited,
    UpstreamAuthError,

    // Internal errors (9xxx)
    RenderError,
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,

            // External (8xxx)
            ErrorCode::UpstreamError => 8001,
            ErrorCode::UpstreamTimeout => 8002,
            ErrorCode::UpstreamRateLimited => 8003,
            ErrorCode::UpstreamAuthError => 8004,

            // Internal (9xxx)
            ErrorCode::RenderError => 9001,
            ErrorCode::InternalError => 9002,
            ErrorCode::ConfigurationError => 9003,
            ErrorCode::SerializationError => 9004,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    // External service errors
    #[error("Scholar search failed: {message}")]
    ScholarUpstream { message: String },

    #[error("Scholar search timed out after {timeout_secs}s")]
    ScholarTimeout { timeout_secs: u64 },

    #[error("Scholar search rate limited")]
    ScholarRateLimited,

    #[error("Scholar API rejected the configured credential: {message}")]
    ScholarAuth { message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Internal errors
    #[error("Graph rendering failed: {message}")]
    Render { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::ScholarUpstream { .. } => ErrorCode::UpstreamError,
            AppError::ScholarTimeout { .. } => ErrorCode::UpstreamTimeout,
            AppError::ScholarRateLimited => ErrorCode::UpstreamRateLimited,
            AppError::ScholarAuth { .. } => ErrorCode::UpstreamAuthError,
            AppError::HttpClient(e) if e.is_timeout() => ErrorCode::UpstreamTimeout,
            AppError::HttpClient(_) => ErrorCode::UpstreamError,
            AppError::Render { .. } => ErrorCode::RenderError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. } | AppError::MissingField { .. } => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            AppError::Render { .. }
            | AppError::Internal { .. }
            | AppError::Configuration { .. }
            | AppError::ScholarAuth { .. }
            | AppError::Serialization(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 502 Bad Gateway
            AppError::ScholarUpstream { .. } | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable
            AppError::ScholarTimeout { .. } | AppError::ScholarRateLimited => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    /// Whether retrying the same request later may succeed.
    ///
    /// Transient upstream failures (network, timeout, rate limit, 5xx) are
    /// retryable; credential and configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::ScholarUpstream { .. }
            | AppError::ScholarTimeout { .. }
            | AppError::ScholarRateLimited => true,
            AppError::HttpClient(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        // This service serves browsers, so errors render as a minimal HTML
        // page rather than a JSON body. Retryable upstream failures get a
        // "try again" hint; internal details stay in the logs.
        let user_message = if self.is_retryable() {
            "The scholar search service is temporarily unavailable. Please try again in a moment."
        } else if self.is_client_error() {
            "The request was invalid. Please go back and check the search form."
        } else {
            "Something went wrong on our side. The problem has been logged."
        };

        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>ScholarGraph - Error</title></head>\n\
             <body><h1>Search failed</h1><p>{}</p>\n\
             <p><a href=\"/\">Back to search</a></p>\n\
             <p><small>error code {}</small></p></body></html>",
            user_message,
            code.as_code()
        );

        (status, Html(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
