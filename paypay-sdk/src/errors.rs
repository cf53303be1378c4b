//! Error types for PayPay SDK operations.
//!
//! Protocol and crypto failures surface as [`PayPayError`]. Business failures
//! reported by the gateway (`code != "10000"`) are not errors: they come back
//! as a normal [`PaymentResponse`](crate::PaymentResponse) for the caller to
//! branch on.

use std::fmt;

use crate::crypto::CryptoError;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PayPayErrorCode {
    /// Feature not compiled in
    Unimplemented = 1000,
    /// Transport/network layer error
    Transport = 2000,
    /// Connection failed
    ConnectionFailed = 2001,
    /// Connection timeout
    ConnectionTimeout = 2002,
    /// Gateway answered with a non-2xx status
    HttpStatus = 2003,
    /// Response or notification signature did not verify
    InvalidSignature = 3000,
    /// Business content could not be decrypted or parsed
    Decryption = 3001,
    /// Missing or malformed configuration
    Configuration = 4000,
    /// Invalid request data
    InvalidRequest = 5000,
    /// Serialization error
    Serialization = 5001,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Error type for PayPay SDK operations.
#[derive(Debug)]
pub enum PayPayError {
    /// Feature not compiled in.
    Unimplemented(&'static str),

    /// Transport/network layer error.
    Transport(String),

    /// Connection failed.
    ConnectionFailed {
        /// Target endpoint
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection timeout.
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The gateway answered with a non-2xx HTTP status.
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Signature verification failed. No response field is exposed.
    InvalidSignature {
        /// What was being verified (e.g. "response", "notification")
        context: String,
    },

    /// Business content decryption or parsing failed.
    Decryption(String),

    /// Missing or malformed configuration, detected before any network call.
    Configuration {
        /// Configuration field
        field: String,
        /// Reason for rejection
        reason: String,
    },

    /// Invalid request data supplied by the caller.
    InvalidRequest {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// Internal/unexpected error.
    Internal(String),
}

impl PayPayError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> PayPayErrorCode {
        match self {
            Self::Unimplemented(_) => PayPayErrorCode::Unimplemented,
            Self::Transport(_) => PayPayErrorCode::Transport,
            Self::ConnectionFailed { .. } => PayPayErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => PayPayErrorCode::ConnectionTimeout,
            Self::HttpStatus { .. } => PayPayErrorCode::HttpStatus,
            Self::InvalidSignature { .. } => PayPayErrorCode::InvalidSignature,
            Self::Decryption(_) => PayPayErrorCode::Decryption,
            Self::Configuration { .. } => PayPayErrorCode::Configuration,
            Self::InvalidRequest { .. } => PayPayErrorCode::InvalidRequest,
            Self::Serialization(_) => PayPayErrorCode::Serialization,
            Self::Internal(_) => PayPayErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true for network-level failures, including non-2xx statuses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::ConnectionFailed { .. }
                | Self::ConnectionTimeout { .. }
                | Self::HttpStatus { .. }
        )
    }

    /// Returns true for signature or decryption failures.
    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::InvalidSignature { .. } | Self::Decryption(_))
    }

    /// Returns true for configuration failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns true if this error is potentially recoverable by retrying.
    ///
    /// The SDK never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::ConnectionTimeout { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create a configuration error.
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid signature error.
    pub fn invalid_signature(context: impl Into<String>) -> Self {
        Self::InvalidSignature {
            context: context.into(),
        }
    }
}

impl fmt::Display for PayPayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unimplemented(msg) => write!(f, "not implemented: {}", msg),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::ConnectionFailed { target, reason } => {
                write!(f, "connection to {} failed: {}", target, reason)
            }
            Self::ConnectionTimeout {
                operation,
                timeout_ms,
            } => {
                write!(f, "{} timed out after {}ms", operation, timeout_ms)
            }
            Self::HttpStatus { status, body } => {
                write!(f, "gateway returned HTTP {}: {}", status, body)
            }
            Self::InvalidSignature { context } => {
                write!(f, "invalid {} signature", context)
            }
            Self::Decryption(msg) => write!(f, "decryption error: {}", msg),
            Self::Configuration { field, reason } => {
                write!(f, "invalid configuration {}: {}", field, reason)
            }
            Self::InvalidRequest { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for PayPayError {}

impl From<serde_json::Error> for PayPayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<CryptoError> for PayPayError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPrivateKey(_) => {
                Self::configuration("private_key", err.to_string())
            }
            CryptoError::InvalidPublicKey(_) => Self::configuration("public_key", err.to_string()),
            CryptoError::Signing(_) | CryptoError::Encryption(_) => {
                Self::Internal(err.to_string())
            }
            CryptoError::InvalidEncoding(_)
            | CryptoError::DecryptFailed(_)
            | CryptoError::InvalidPayload(_) => Self::Decryption(err.to_string()),
        }
    }
}
