//! # Client Error Types
//!
//! Error types for the HTTP collaborators and the storefront engine.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ClientError (transport / config)                                      │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │  InvalidConfig  │  │  Http{status}   │  │  Decode                 │ │
//! │  │  InvalidUrl     │  │  Network        │  │                         │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  StorefrontError (what callers handle)                                 │
//! │  AuthRequired · Validation · StockExceeded · OrderSubmission{n of m}  │
//! │  LocationFetch{level} · Core · Client                                  │
//! │                                                                         │
//! │  kind() → ErrorKind        recovery() → Recovery hint                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use wellness_core::{CoreError, LocationLevel, ValidationError};

/// Result type alias for HTTP and config operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

// =============================================================================
// Client Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never got an answer (DNS, refused, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The answer could not be parsed.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ClientError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return ClientError::Decode(err.to_string());
        }
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if sending the same request again may succeed.
    ///
    /// ## Retryable Errors
    /// - Network failures
    /// - 5xx responses, 408 and 429
    ///
    /// Nothing in this crate retries on its own; callers decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Http { status, .. } => {
                matches!(status, 408 | 429 | 500..=599)
            }
            _ => false,
        }
    }

    /// Returns true for 401/403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Http { status: 401 | 403, .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidUrl(_)
                | ClientError::InvalidConfig(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

// =============================================================================
// Storefront Error
// =============================================================================

/// Every failure a storefront caller can see.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Sign in to continue")]
    AuthRequired,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Only under the strict stock policy.
    #[error("Insufficient stock: available {available}, requested {requested}")]
    StockExceeded { available: u32, requested: u32 },

    /// Line `committed + 1` of `total` failed. Earlier lines stay recorded
    /// on the backend.
    #[error("Order submission failed after {committed} of {total} lines: {source}")]
    OrderSubmission {
        committed: usize,
        total: usize,
        #[source]
        source: ClientError,
    },

    #[error("Failed to load {level} options: {source}")]
    LocationFetch {
        level: LocationLevel,
        #[source]
        source: ClientError,
    },

    #[error(transparent)]
    Core(CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<CoreError> for StorefrontError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthRequired => StorefrontError::AuthRequired,
            CoreError::Validation(v) => StorefrontError::Validation(v),
            CoreError::StockExceeded {
                available,
                requested,
                ..
            } => StorefrontError::StockExceeded {
                available,
                requested,
            },
            other => StorefrontError::Core(other),
        }
    }
}

/// Coarse error category for UI branching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    AuthRequired,
    Validation,
    StockExceeded,
    OrderSubmission,
    LocationFetch,
    InvalidState,
    Network,
    Configuration,
}

/// What the user can do about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recovery {
    Login,
    FixInput,
    /// Try the same operation again. For orders this may duplicate lines
    /// that were already committed.
    Retry,
    ReselectParent,
    None,
}

impl StorefrontError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorefrontError::AuthRequired => ErrorKind::AuthRequired,
            StorefrontError::Validation(_) => ErrorKind::Validation,
            StorefrontError::StockExceeded { .. } => ErrorKind::StockExceeded,
            StorefrontError::OrderSubmission { .. } => ErrorKind::OrderSubmission,
            StorefrontError::LocationFetch { .. } => ErrorKind::LocationFetch,
            StorefrontError::Core(CoreError::LocationNotOffered { .. })
            | StorefrontError::Core(CoreError::ParentNotSelected { .. })
            | StorefrontError::Core(CoreError::LevelBeyondTarget { .. })
            | StorefrontError::Core(CoreError::ProductUnavailable(_))
            | StorefrontError::Core(CoreError::ProductNotFound(_)) => ErrorKind::Validation,
            StorefrontError::Core(_) => ErrorKind::InvalidState,
            StorefrontError::Client(err) if err.is_config_error() => ErrorKind::Configuration,
            StorefrontError::Client(_) => ErrorKind::Network,
        }
    }

    pub fn recovery(&self) -> Recovery {
        match self {
            StorefrontError::AuthRequired => Recovery::Login,
            StorefrontError::Validation(_) | StorefrontError::StockExceeded { .. } => {
                Recovery::FixInput
            }
            StorefrontError::OrderSubmission { source, .. } if source.is_unauthorized() => {
                Recovery::Login
            }
            StorefrontError::OrderSubmission { .. } => Recovery::Retry,
            StorefrontError::LocationFetch { .. } => Recovery::ReselectParent,
            StorefrontError::Core(_) => match self.kind() {
                ErrorKind::Validation => Recovery::FixInput,
                _ => Recovery::None,
            },
            StorefrontError::Client(err) if err.is_unauthorized() => Recovery::Login,
            StorefrontError::Client(err) if err.is_retryable() => Recovery::Retry,
            StorefrontError::Client(_) => Recovery::None,
        }
    }
}
