//! User-interaction events delivered to the enhancement layer.
//!
//! Events are plain data so a whole interaction sequence can live in a JSON
//! script file and be replayed headlessly:
//!
//! ```json
//! [
//!   {"target": "association_select_search", "kind": "input", "value": "oak"},
//!   {"target": "association_select", "kind": "change", "value": "42"}
//! ]
//! ```
//!
//! `blur_settled` models the grace delay the floating dropdown keeps between
//! losing focus and hiding, so a click delivered in between still lands.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UiError};
use crate::page::FileMeta;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Element id the event targets. Empty for `page_load`.
    #[serde(default)]
    pub target: String,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Dispatched once by the engine after activation.
    PageLoad,
    /// A keystroke changed a text input to `value`.
    Input { value: String },
    /// A control settled on a new value. `value` is set when the user picked
    /// it natively; `None` when a script already wrote the value (synthetic
    /// change).
    Change {
        #[serde(default)]
        value: Option<String>,
    },
    Click,
    Focus,
    Blur,
    /// The blur grace delay elapsed.
    BlurSettled,
    DragOver,
    /// Covers both `dragleave` and `dragend`.
    DragLeave,
    /// Files dropped onto the target.
    Drop { files: Vec<FileMeta> },
    /// Files chosen through the native picker of a file input.
    FilesChosen { files: Vec<FileMeta> },
    Submit,
}

impl Event {
    pub fn new(target: impl Into<String>, kind: EventKind) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }

    pub fn page_load() -> Self {
        Self::new("", EventKind::PageLoad)
    }

    pub fn input(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            target,
            EventKind::Input {
                value: value.into(),
            },
        )
    }

    pub fn change(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            target,
            EventKind::Change {
                value: Some(value.into()),
            },
        )
    }

    pub fn synthetic_change(target: impl Into<String>) -> Self {
        Self::new(target, EventKind::Change { value: None })
    }

    pub fn click(target: impl Into<String>) -> Self {
        Self::new(target, EventKind::Click)
    }
}

/// Decode an event script (a JSON array of events).
pub fn parse_script(raw: &str) -> Result<Vec<Event>> {
    serde_json::from_str(raw).map_err(|e| UiError::script(e.to_string()))
}
