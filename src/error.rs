use thiserror::Error;

use crate::ceremony::EventKind;

#[derive(Debug, Error)]
pub enum CadenceError {
    /// `expected` is `None` when the current ceremony has no successor.
    #[error("{got} cannot follow the current ceremony, expected {}", expected_label(.expected))]
    OutOfOrder {
        expected: Option<EventKind>,
        got: EventKind,
    },

    #[error("Sprints always have to have the same length. Expected: {expected} days. Got: {got} days")]
    InconsistentSprintLength { expected: u32, got: u32 },

    #[error("Initialization failed: {0}")]
    Initialization(#[from] InitializationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn expected_label(expected: &Option<EventKind>) -> String {
    match expected {
        Some(kind) => kind.to_string(),
        None => "nothing".to_string(),
    }
}

impl CadenceError {
    /// Whether this error is one of the three rejections the controller
    /// produces, as opposed to an I/O or parsing failure around it.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CadenceError::OutOfOrder { .. }
                | CadenceError::InconsistentSprintLength { .. }
                | CadenceError::Initialization(_)
        )
    }
}

/// Raised by an event when it cannot be wired into the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitializationError {
    #[error("sprint planning needs {requested} items but the backlog holds {available}")]
    InsufficientBacklog { requested: u32, available: usize },

    #[error("sprint planning must select at least one item")]
    EmptySelection,

    #[error("a sprint must last at least one day")]
    ZeroLengthSprint,

    #[error("{0} was already initialized")]
    AlreadyInitialized(EventKind),
}
