use serde::Serialize;

/// Aggregated view of session progress, useful for UI.
///
/// `total` counts term records while `mastered` counts distinct quizzed
/// values. Records sharing a value are mastered together, so such a set can
/// complete with `mastered < total` and `percent_mastered` below 100. Use
/// `is_complete` to detect the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub mastered: usize,
    pub answered: usize,
    pub remaining_in_pass: usize,
    pub percent_mastered: u32,
    pub is_complete: bool,
}
