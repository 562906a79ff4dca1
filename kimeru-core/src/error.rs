//! Error taxonomy for decision operations.

use thiserror::Error;

/// Errors raised by the decision core.
///
/// Degraded ladder connectivity is not an error; it is reported through
/// [`crate::ladder::Connectivity`] and never fails a draw.
#[derive(Debug, Error, PartialEq)]
pub enum PickerError {
    #[error("not enough items: {found} supplied, at least {required} required")]
    InsufficientItems { found: usize, required: usize },
    #[error("start rail {start} is outside a ladder with {columns} rails")]
    RailOutOfRange { start: usize, columns: usize },
    #[error("index {index} is outside a list of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("entries cannot be empty")]
    EmptyEntry,
    #[error("an entry named {0:?} already exists")]
    DuplicateEntry(String),
    #[error("nothing to add")]
    NothingToAdd,
    #[error("no amidakuji has been drawn yet")]
    NoDraw,
    #[error("malformed ladder: {0}")]
    MalformedLadder(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised when picker configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must not be blank")]
    BlankLabel { field: &'static str },
    #[error("failed to parse picker config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_items_message_names_counts() {
        let err = PickerError::InsufficientItems {
            found: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "not enough items: 1 supplied, at least 2 required"
        );
    }

    #[test]
    fn config_errors_convert_transparently() {
        let err: PickerError = ConfigError::BlankLabel {
            field: "labels.loss",
        }
        .into();
        assert_eq!(err.to_string(), "labels.loss must not be blank");
    }
}
