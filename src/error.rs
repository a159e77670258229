//! Error types for worksheet assembly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::builder::AssemblerState;
use crate::fragment::FragmentKind;

/// Errors that can occur while rendering fragments or assembling a document.
#[derive(Debug, Error)]
pub enum Error {
    /// A plan step did not carry a parameter its fragment kind requires.
    #[error("invalid fragment parameters: {kind} fragment is missing required field `{field}`")]
    MissingParameter {
        /// Kind of the fragment being described.
        kind: FragmentKind,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A parameter value cannot be turned into meaningful markup.
    #[error("invalid fragment parameters for {kind} fragment: {reason}")]
    InvalidFragment {
        /// Kind of the fragment being rendered.
        kind: FragmentKind,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// An assembler operation was called in the wrong lifecycle state.
    #[error("invalid assembler state for `{operation}`: expected {expected}, found {actual}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// State the operation requires.
        expected: AssemblerState,
        /// State the assembler was in.
        actual: AssemblerState,
    },

    /// An operation needs a capability that was disabled in the preamble options.
    #[error("`{operation}` requires the {capability} capability, which is disabled")]
    CapabilityDisabled {
        /// The rejected operation.
        operation: &'static str,
        /// Name of the disabled capability.
        capability: &'static str,
    },

    /// The destination could not be written.
    #[error("failed to write document to {}", .path.display())]
    Io {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A worksheet plan could not be parsed.
    #[cfg(feature = "serde")]
    #[error("failed to parse worksheet plan: {0}")]
    Plan(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(kind: FragmentKind, reason: impl Into<String>) -> Self {
        Self::InvalidFragment {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_names_kind_and_field() {
        let err = Error::MissingParameter {
            kind: FragmentKind::Text,
            field: "content",
        };
        let message = err.to_string();
        assert!(message.contains("text fragment"));
        assert!(message.contains("`content`"));
    }

    #[test]
    fn io_error_exposes_source() {
        let err = Error::io(
            "/nowhere/out.tex",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        assert!(err.to_string().contains("/nowhere/out.tex"));
        let source = std::error::Error::source(&err).expect("io error has a source");
        assert_eq!(source.to_string(), "no such directory");
    }
}
