//! ScholarGraph Common Library
//!
//! Shared code for the ScholarGraph services including:
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability
//! - Scholar search client abstraction

pub mod config;
pub mod errors;
pub mod metrics;
pub mod scholar;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use scholar::{ScholarResponse, ScholarSearch, SerpApiClient};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default scholar search engine
pub const DEFAULT_SEARCH_ENGINE: &str = "google_scholar";
