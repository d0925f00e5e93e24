mod ids;
mod session;
mod settings;
mod term;

pub use ids::TermKey;
pub use session::{AccuracySummary, LearnedPoint, Outcome, SessionStats};
pub use settings::{DrillMode, DrillSettings, SettingsError};
pub use term::{FieldKey, TermDraft, TermError, TermRecord};
