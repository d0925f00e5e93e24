use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::model::{FieldKey, TermKey, TermRecord};

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Thresholds that retire a term from rotation.
///
/// A term is mastered once it has `mastered_at` correct answers, or
/// `fast_track_at` correct answers with no incorrect answer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryPolicy {
    mastered_at: u32,
    fast_track_at: Option<u32>,
}

impl MasteryPolicy {
    /// Builds a policy. `mastered_at` of zero is raised to one, and a fast track
    /// at or above `mastered_at` is dropped since it could never fire first.
    #[must_use]
    pub fn new(mastered_at: u32, fast_track_at: Option<u32>) -> Self {
        let mastered_at = mastered_at.max(1);
        let fast_track_at = fast_track_at.filter(|n| *n > 0 && *n < mastered_at);
        Self {
            mastered_at,
            fast_track_at,
        }
    }

    #[must_use]
    pub fn mastered_at(&self) -> u32 {
        self.mastered_at
    }

    #[must_use]
    pub fn fast_track_at(&self) -> Option<u32> {
        self.fast_track_at
    }

    #[must_use]
    pub fn is_met(&self, counts: MasteryCounts) -> bool {
        if counts.correct >= self.mastered_at {
            return true;
        }
        match self.fast_track_at {
            Some(fast) => counts.correct >= fast && counts.incorrect == 0,
            None => false,
        }
    }
}

impl Default for MasteryPolicy {
    /// Three correct answers, or two correct with no misses.
    fn default() -> Self {
        Self {
            mastered_at: 3,
            fast_track_at: Some(2),
        }
    }
}

//
// ─── COUNTS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryCounts {
    pub correct: u32,
    pub incorrect: u32,
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

/// Per-term answer counters for one session, keyed by the quizzed value.
///
/// Counts only ever grow and mastery is latched: a mastered key stays mastered
/// for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct MasteryTracker {
    policy: MasteryPolicy,
    counts: HashMap<TermKey, MasteryCounts>,
    mastered: HashSet<TermKey>,
}

impl MasteryTracker {
    #[must_use]
    pub fn new(policy: MasteryPolicy) -> Self {
        Self {
            policy,
            counts: HashMap::new(),
            mastered: HashSet::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> MasteryPolicy {
        self.policy
    }

    /// Apply one answer outcome and return the updated counts.
    pub fn record_outcome(&mut self, key: &TermKey, is_correct: bool) -> MasteryCounts {
        let entry = self.counts.entry(key.clone()).or_default();
        if is_correct {
            entry.correct = entry.correct.saturating_add(1);
        } else {
            entry.incorrect = entry.incorrect.saturating_add(1);
        }
        let counts = *entry;

        if !self.mastered.contains(key) && self.policy.is_met(counts) {
            tracing::debug!(term = %key, correct = counts.correct, incorrect = counts.incorrect, "term mastered");
            self.mastered.insert(key.clone());
        }
        counts
    }

    #[must_use]
    pub fn counts(&self, key: &str) -> MasteryCounts {
        self.counts.get(key).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_mastered(&self, key: &str) -> bool {
        self.mastered.contains(key)
    }

    /// Number of distinct keys mastered so far.
    #[must_use]
    pub fn mastered_count(&self) -> u32 {
        u32::try_from(self.mastered.len()).unwrap_or(u32::MAX)
    }

    /// Indices into `all_terms` of terms not yet mastered when quizzing `want`.
    #[must_use]
    pub fn eligible_terms(&self, all_terms: &[TermRecord], want: FieldKey) -> Vec<usize> {
        all_terms
            .iter()
            .enumerate()
            .filter(|(_, term)| !self.is_mastered(term.field(want)))
            .map(|(index, _)| index)
            .collect()
    }

    /// Like [`Self::eligible_terms`], returning the records themselves.
    #[must_use]
    pub fn eligible_records<'a>(
        &self,
        all_terms: &'a [TermRecord],
        want: FieldKey,
    ) -> Vec<&'a TermRecord> {
        all_terms
            .iter()
            .filter(|term| !self.is_mastered(term.field(want)))
            .collect()
    }
}
