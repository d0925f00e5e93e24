//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::SettingsError;

use crate::sessions::{Command, SessionPhase};

/// Errors emitted by drill sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no valid terms to drill ({dropped} malformed entries dropped)")]
    NoValidTerms { dropped: usize },

    #[error("`{command}` is not allowed while the session is {phase}")]
    PreconditionViolation {
        command: Command,
        phase: SessionPhase,
    },

    #[error("current turn is not multiple choice")]
    NotMultipleChoice,

    #[error("option {index} is out of range for {len} options")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
