use serde::Serialize;
use std::fmt;

/// Lifecycle state of a drill session.
///
/// `Loading` and `Presenting` are passed through inside a single command;
/// callers observe the others between commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Loading,
    Presenting,
    AwaitingAnswer,
    ShowingFeedback,
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Loading => "loading",
            SessionPhase::Presenting => "presenting",
            SessionPhase::AwaitingAnswer => "awaiting an answer",
            SessionPhase::ShowingFeedback => "showing feedback",
            SessionPhase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Caller-issued commands, named in precondition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    SubmitFreeText,
    SubmitChoice,
    Skip,
    Advance,
}

impl Command {
    /// Phase the session must be in for this command to be accepted.
    #[must_use]
    pub fn required_phase(self) -> SessionPhase {
        match self {
            Command::Start => SessionPhase::Idle,
            Command::SubmitFreeText | Command::SubmitChoice | Command::Skip => {
                SessionPhase::AwaitingAnswer
            }
            Command::Advance => SessionPhase::ShowingFeedback,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Start => "start",
            Command::SubmitFreeText => "submit_free_text",
            Command::SubmitChoice => "submit_choice",
            Command::Skip => "skip",
            Command::Advance => "advance",
        };
        f.write_str(name)
    }
}
