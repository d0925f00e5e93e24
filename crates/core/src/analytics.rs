use chrono::{DateTime, Utc};

use crate::model::{AccuracySummary, LearnedPoint, Outcome, SessionStats};

/// Running tally of answers for one session.
///
/// Owns the `SessionStats` that is handed to the caller when the session ends.
#[derive(Debug, Clone)]
pub struct AnalyticsRecorder {
    stats: SessionStats,
}

impl AnalyticsRecorder {
    #[must_use]
    pub fn new(total_terms: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            stats: SessionStats::new(total_terms, started_at),
        }
    }

    /// Append one answer and the mastered count it left behind.
    pub fn record(&mut self, outcome: Outcome, mastered_after: u32) {
        self.stats.response_log.push(outcome);
        let trial = u32::try_from(self.stats.response_log.len()).unwrap_or(u32::MAX);
        self.stats.learned_over_time.push(LearnedPoint {
            trial,
            learned: mastered_after,
        });
        self.stats.mastered_count = mastered_after;
    }

    pub fn mark_completed(&mut self, completed_at: DateTime<Utc>) {
        self.stats.completed_at = Some(completed_at);
    }

    #[must_use]
    pub fn summary(&self) -> AccuracySummary {
        let correct = self
            .stats
            .response_log
            .iter()
            .filter(|outcome| outcome.is_correct())
            .count();
        let total = self.stats.response_log.len();
        let incorrect = total - correct;

        AccuracySummary {
            correct: u32::try_from(correct).unwrap_or(u32::MAX),
            incorrect: u32::try_from(incorrect).unwrap_or(u32::MAX),
            accuracy_percent: rounded_percent(correct, total),
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn into_stats(self) -> SessionStats {
        self.stats
    }
}

/// `round(part / whole * 100)`, or 0 when `whole` is zero. Halves round up.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part as u128 * 200 + whole as u128) / (whole as u128 * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn empty_summary_is_zero() {
        let recorder = AnalyticsRecorder::new(3, fixed_now());
        let summary = recorder.summary();
        assert_eq!(summary.correct, 0);
        assert_eq!(summary.incorrect, 0);
        assert_eq!(summary.accuracy_percent, 0);
    }

    #[test]
    fn record_appends_log_and_chart_point() {
        let mut recorder = AnalyticsRecorder::new(3, fixed_now());
        recorder.record(Outcome::Correct, 0);
        recorder.record(Outcome::Incorrect, 0);
        recorder.record(Outcome::Correct, 1);

        let stats = recorder.stats();
        assert_eq!(
            stats.response_log,
            vec![Outcome::Correct, Outcome::Incorrect, Outcome::Correct]
        );
        assert_eq!(
            stats.learned_over_time.last(),
            Some(&LearnedPoint {
                trial: 3,
                learned: 1
            })
        );
        assert_eq!(stats.mastered_count, 1);

        let summary = recorder.summary();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.accuracy_percent, 67);
    }

    #[test]
    fn rounded_percent_rounds_half_up() {
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(5, 5), 100);
    }
}
