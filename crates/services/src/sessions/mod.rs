mod events;
mod phase;
mod progress;
mod queue;
mod service;
mod turn;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use events::SessionEvent;
pub use phase::{Command, SessionPhase};
pub use progress::SessionProgress;
pub use queue::WorkingQueue;
pub use service::{Advance, DrillSession};
pub use turn::{AnswerResult, SubmittedAnswer, Turn, normalize_answer};
