use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one submitted answer, as stored in the response log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Incorrect,
    Correct,
}

impl Outcome {
    #[must_use]
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }

    /// Chart encoding: 1 for correct, 0 for incorrect.
    #[must_use]
    pub fn as_bit(self) -> u8 {
        match self {
            Self::Incorrect => 0,
            Self::Correct => 1,
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.as_bit())
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(Self::Incorrect),
            1 => Ok(Self::Correct),
            other => Err(serde::de::Error::custom(format!(
                "response outcome must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// One point of the learned-over-time chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedPoint {
    /// 1-based index of the answer that produced this point.
    pub trial: u32,
    /// Cumulative mastered count after that answer.
    pub learned: u32,
}

/// Correct/incorrect tally for the end-of-session screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub correct: u32,
    pub incorrect: u32,
    pub accuracy_percent: u32,
}

/// End-of-session statistics, handed to the caller for rendering or persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Valid term records loaded.
    pub total_terms: u32,
    /// Distinct quizzed values mastered; may stay below `total_terms` when
    /// records share a value.
    pub mastered_count: u32,
    pub response_log: Vec<Outcome>,
    pub learned_over_time: Vec<LearnedPoint>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionStats {
    #[must_use]
    pub fn new(total_terms: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            total_terms,
            mastered_count: 0,
            response_log: Vec::new(),
            learned_over_time: Vec::new(),
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.response_log.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn outcomes_serialize_as_bits() {
        let mut stats = SessionStats::new(2, fixed_now());
        stats.response_log = vec![Outcome::Correct, Outcome::Incorrect];
        stats.learned_over_time = vec![
            LearnedPoint {
                trial: 1,
                learned: 0,
            },
            LearnedPoint {
                trial: 2,
                learned: 0,
            },
        ];

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["response_log"], serde_json::json!([1, 0]));
        assert_eq!(json["learned_over_time"][1]["trial"], 2);
        assert!(json["completed_at"].is_null());

        let back: SessionStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn outcome_rejects_other_bits() {
        assert!(serde_json::from_str::<Outcome>("2").is_err());
        assert_eq!(serde_json::from_str::<Outcome>("1").unwrap(), Outcome::Correct);
    }
}
