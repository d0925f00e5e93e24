use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::term::FieldKey;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("given and want fields must differ, both are `{0}`")]
    SameField(FieldKey),

    #[error("option count must be between {min} and {max}, got {provided}")]
    InvalidOptionCount { provided: u8, min: u8, max: u8 },
}

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// How the learner answers a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillMode {
    #[default]
    FreeText,
    MultipleChoice,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Per-session drill configuration.
///
/// Selects the prompt (`given`) and quizzed (`want`) fields, and the answer mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillSettings {
    given: FieldKey,
    want: FieldKey,
    mode: DrillMode,
    option_count: u8,
}

impl DrillSettings {
    pub const MIN_OPTIONS: u8 = 2;
    pub const MAX_OPTIONS: u8 = 8;
    pub const DEFAULT_OPTIONS: u8 = 4;

    /// Creates settings with the default option count.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::SameField` if `given == want`.
    pub fn new(given: FieldKey, want: FieldKey, mode: DrillMode) -> Result<Self, SettingsError> {
        if given == want {
            return Err(SettingsError::SameField(given));
        }
        Ok(Self {
            given,
            want,
            mode,
            option_count: Self::DEFAULT_OPTIONS,
        })
    }

    /// Override the number of options shown per multiple-choice turn.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidOptionCount` outside `2..=8`.
    pub fn with_option_count(mut self, option_count: u8) -> Result<Self, SettingsError> {
        if !(Self::MIN_OPTIONS..=Self::MAX_OPTIONS).contains(&option_count) {
            return Err(SettingsError::InvalidOptionCount {
                provided: option_count,
                min: Self::MIN_OPTIONS,
                max: Self::MAX_OPTIONS,
            });
        }
        self.option_count = option_count;
        Ok(self)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DrillMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn given(&self) -> FieldKey {
        self.given
    }

    #[must_use]
    pub fn want(&self) -> FieldKey {
        self.want
    }

    #[must_use]
    pub fn mode(&self) -> DrillMode {
        self.mode
    }

    #[must_use]
    pub fn option_count(&self) -> u8 {
        self.option_count
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        self.mode == DrillMode::MultipleChoice
    }
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            given: FieldKey::Front,
            want: FieldKey::Back,
            mode: DrillMode::FreeText,
            option_count: Self::DEFAULT_OPTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_same_field() {
        let err = DrillSettings::new(FieldKey::Back, FieldKey::Back, DrillMode::FreeText)
            .unwrap_err();
        assert_eq!(err, SettingsError::SameField(FieldKey::Back));
    }

    #[test]
    fn option_count_is_bounded() {
        let settings = DrillSettings::default();
        assert_eq!(settings.option_count(), 4);
        assert!(settings.clone().with_option_count(1).is_err());
        assert!(settings.clone().with_option_count(9).is_err());
        assert_eq!(settings.with_option_count(3).unwrap().option_count(), 3);
    }

    #[test]
    fn with_mode_switches_to_multiple_choice() {
        let settings = DrillSettings::default().with_mode(DrillMode::MultipleChoice);
        assert!(settings.is_multiple_choice());
        assert_eq!(settings.given(), FieldKey::Front);
        assert_eq!(settings.want(), FieldKey::Back);
    }
}
