use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::TermKey;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TermError {
    #[error("term field `{0}` is missing")]
    MissingField(FieldKey),

    #[error("term field `{0}` is blank")]
    BlankField(FieldKey),
}

//
// ─── FIELD KEY ─────────────────────────────────────────────────────────────────
//

/// One of the three drillable fields of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Front,
    Back,
    Definition,
}

impl FieldKey {
    pub const ALL: [FieldKey; 3] = [FieldKey::Front, FieldKey::Back, FieldKey::Definition];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Front => "front",
            FieldKey::Back => "back",
            FieldKey::Definition => "definition",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// A term as delivered by the surrounding application, before intake filtering.
///
/// Any field may be absent or blank; `validate` decides whether it can be drilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDraft {
    #[serde(default)]
    pub front: Option<String>,
    #[serde(default)]
    pub back: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
}

impl TermDraft {
    #[must_use]
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            front: Some(front.into()),
            back: Some(back.into()),
            definition: Some(definition.into()),
        }
    }

    /// Validate all three fields, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TermError::MissingField` or `TermError::BlankField` for the first
    /// field (front, back, definition order) that cannot be used.
    pub fn validate(self) -> Result<TermRecord, TermError> {
        let front = required(self.front, FieldKey::Front)?;
        let back = required(self.back, FieldKey::Back)?;
        let definition = required(self.definition, FieldKey::Definition)?;
        Ok(TermRecord {
            front,
            back,
            definition,
        })
    }
}

fn required(value: Option<String>, key: FieldKey) -> Result<String, TermError> {
    let raw = value.ok_or(TermError::MissingField(key))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TermError::BlankField(key));
    }
    Ok(trimmed.to_string())
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// The atomic unit drilled. All three fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TermRecord {
    front: String,
    back: String,
    definition: String,
}

impl TermRecord {
    /// Build a record directly from three values.
    ///
    /// # Errors
    ///
    /// Returns `TermError::BlankField` if any value is blank.
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        definition: impl Into<String>,
    ) -> Result<Self, TermError> {
        TermDraft::new(front, back, definition).validate()
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Front => &self.front,
            FieldKey::Back => &self.back,
            FieldKey::Definition => &self.definition,
        }
    }

    /// Identity of this term when `want` is the quizzed field.
    #[must_use]
    pub fn key(&self, want: FieldKey) -> TermKey {
        TermKey::new(self.field(want))
    }

    /// All three fields, in display order, for the answer reveal.
    #[must_use]
    pub fn display_fields(&self) -> Vec<(FieldKey, String)> {
        FieldKey::ALL
            .iter()
            .map(|key| (*key, self.field(*key).to_string()))
            .collect()
    }
}

impl<'de> Deserialize<'de> for TermRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let draft = TermDraft::deserialize(deserializer)?;
        draft.validate().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_fields() {
        let term = TermDraft::new("  猫 ", "māo", " cat\n").validate().unwrap();
        assert_eq!(term.front(), "猫");
        assert_eq!(term.back(), "māo");
        assert_eq!(term.definition(), "cat");
    }

    #[test]
    fn validate_rejects_missing_and_blank_fields() {
        let missing = TermDraft {
            front: Some("A".into()),
            back: None,
            definition: Some("d".into()),
        };
        assert_eq!(
            missing.validate().unwrap_err(),
            TermError::MissingField(FieldKey::Back)
        );

        let blank = TermDraft::new("A", "1", "   ");
        assert_eq!(
            blank.validate().unwrap_err(),
            TermError::BlankField(FieldKey::Definition)
        );
    }

    #[test]
    fn field_and_key_follow_field_key() {
        let term = TermRecord::new("A", "1", "d1").unwrap();
        assert_eq!(term.field(FieldKey::Front), "A");
        assert_eq!(term.key(FieldKey::Back), TermKey::new("1"));
        let fields = term.display_fields();
        assert_eq!(fields[2], (FieldKey::Definition, "d1".to_string()));
    }

    #[test]
    fn deserialize_validates_record() {
        let ok: TermRecord =
            serde_json::from_str(r#"{"front":"A","back":"1","definition":"d1"}"#).unwrap();
        assert_eq!(ok.back(), "1");

        let err = serde_json::from_str::<TermRecord>(r#"{"front":"A","back":""}"#);
        assert!(err.is_err());
    }
}
