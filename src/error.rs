use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure payload reported by the native speech provider.
///
/// The shape is provider-defined; in practice it is a short machine code plus
/// a human-readable message. The Android engine, for example, reports
/// `"7"` / `"No match"` for an utterance it could not transcribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeError {
    /// Provider-specific error code, when the engine supplies one.
    pub code: Option<String>,
    /// Human-readable description from the engine.
    pub message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}/{}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for NativeError {}

/// Errors surfaced by the facade's operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
    /// The provider reported a failure for the requested operation.
    /// The native payload is preserved for the caller to inspect.
    #[error("native speech request failed: {0}")]
    Native(#[from] NativeError),

    /// The provider dropped its completion callback without invoking it.
    /// Only reachable when the provider itself is shutting down.
    #[error("speech provider went away before completing the request")]
    ProviderGone,
}
