use serde::Serialize;

use drill_core::distractor::OptionSet;
use drill_core::mastery::MasteryCounts;
use drill_core::model::FieldKey;

/// Everything the caller needs to render one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// 1-based position of this turn within the session.
    pub number: u32,
    pub term_index: usize,
    pub prompt_field: FieldKey,
    pub expected_field: FieldKey,
    pub prompt_value: String,
    pub expected_value: String,
    pub display_fields: Vec<(FieldKey, String)>,
    /// Present for multiple-choice turns only.
    pub options: Option<OptionSet>,
}

impl Turn {
    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        self.options.is_some()
    }

    #[must_use]
    pub fn option_values(&self) -> Option<&[String]> {
        self.options.as_ref().map(OptionSet::options)
    }

    #[must_use]
    pub fn correct_option_index(&self) -> Option<usize> {
        self.options.as_ref().map(OptionSet::correct_index)
    }
}

/// What the learner did to resolve a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmittedAnswer {
    FreeText(String),
    Choice(usize),
    Skipped,
}

/// Feedback for a resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub turn_number: u32,
    pub is_correct: bool,
    pub correct_value: String,
    pub display_fields: Vec<(FieldKey, String)>,
    pub submitted: SubmittedAnswer,
    /// Counts for the term after this answer.
    pub counts: MasteryCounts,
    /// True when this answer is the one that mastered the term.
    pub newly_mastered: bool,
}

/// Lowercase and strip all whitespace before comparing free-text answers.
#[must_use]
pub fn normalize_answer(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ignores_case_and_spaces() {
        assert_eq!(normalize_answer("  Ni Hao\t"), "nihao");
        assert_eq!(normalize_answer("MĀO"), "māo");
        assert_eq!(normalize_answer(""), "");
    }
}
