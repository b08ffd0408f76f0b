/// Structured error types for the taxui-core library.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (taxui-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.

use std::io;
use thiserror::Error;

/// Main error type for taxui-core operations
#[derive(Error, Debug)]
pub enum UiError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// A collaborator element named by the page contract is absent
    #[error("Missing element '{id}' required by {component}")]
    MissingElement { id: String, component: &'static str },

    /// An element exists but is not the control kind the view expects
    #[error("Element '{id}' is not a {expected}")]
    WrongControl { id: String, expected: &'static str },

    /// Client-side validation failed; the message is surfaced as a blocking alert
    #[error("{message}")]
    Validation { message: String },

    /// Page snapshot could not be decoded
    #[error("Invalid page snapshot: {reason}")]
    Snapshot { reason: String },

    /// Event script could not be decoded
    #[error("Invalid event script: {reason}")]
    Script { reason: String },

    /// Preference storage failed
    #[error("Preference store error: {reason}")]
    Prefs { reason: String },
}

/// Result type alias for taxui-core operations
pub type Result<T> = std::result::Result<T, UiError>;

impl UiError {
    /// Create a missing-element error
    pub fn missing_element(id: impl Into<String>, component: &'static str) -> Self {
        Self::MissingElement {
            id: id.into(),
            component,
        }
    }

    /// Create a wrong-control error
    pub fn wrong_control(id: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongControl {
            id: id.into(),
            expected,
        }
    }

    /// Create a validation error carrying the alert message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a snapshot decode error
    pub fn snapshot(reason: impl Into<String>) -> Self {
        Self::Snapshot {
            reason: reason.into(),
        }
    }

    /// Create an event-script decode error
    pub fn script(reason: impl Into<String>) -> Self {
        Self::Script {
            reason: reason.into(),
        }
    }

    /// Create a preference-store error
    pub fn prefs(reason: impl Into<String>) -> Self {
        Self::Prefs {
            reason: reason.into(),
        }
    }
}
