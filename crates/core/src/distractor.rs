use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::{FieldKey, TermRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DistractorError {
    #[error("option count must be at least 2, got {0}")]
    InvalidCount(usize),

    #[error("candidate pool has {distinct} distinct value(s), need at least 2")]
    InsufficientPool { distinct: usize },
}

/// Options for one multiple-choice turn.
///
/// Only built by the generators below, so `correct_index` always points into
/// `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    options: Vec<String>,
    correct_index: usize,
}

impl OptionSet {
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// True when fewer options than requested could be produced.
    #[must_use]
    pub fn is_degraded(&self, requested: usize) -> bool {
        self.options.len() < requested
    }

    #[must_use]
    pub fn correct(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// Build up to `count` options for `correct`, drawing wrong answers from the
/// `field` values of `pool`.
///
/// Uses the thread-local RNG. See [`generate_options_with`].
///
/// # Errors
///
/// See [`generate_options_with`].
pub fn generate_options(
    correct: &str,
    pool: &[TermRecord],
    field: FieldKey,
    count: usize,
) -> Result<OptionSet, DistractorError> {
    generate_options_with(correct, pool, field, count, &mut rand::rng())
}

/// Build up to `count` options for `correct` using the supplied RNG.
///
/// Wrong answers are the distinct `field` values of `pool` other than `correct`,
/// shuffled, truncated to `count - 1`. `correct` is inserted at a uniformly
/// random position. When the pool holds fewer wrong values than requested the
/// shorter set is returned.
///
/// # Errors
///
/// - `InvalidCount` if `count < 2`
/// - `InsufficientPool` if the pool and `correct` together hold fewer than two
///   distinct values
pub fn generate_options_with<R: Rng>(
    correct: &str,
    pool: &[TermRecord],
    field: FieldKey,
    count: usize,
    rng: &mut R,
) -> Result<OptionSet, DistractorError> {
    if count < 2 {
        return Err(DistractorError::InvalidCount(count));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(correct);
    let mut wrong: Vec<&str> = pool
        .iter()
        .map(|term| term.field(field))
        .filter(|value| seen.insert(*value))
        .collect();

    if wrong.is_empty() {
        return Err(DistractorError::InsufficientPool { distinct: 1 });
    }

    wrong.shuffle(rng);
    wrong.truncate(count - 1);

    let correct_index = rng.random_range(0..=wrong.len());
    let mut options: Vec<String> = wrong.into_iter().map(str::to_string).collect();
    options.insert(correct_index, correct.to_string());

    if options.len() < count {
        tracing::debug!(
            requested = count,
            produced = options.len(),
            "degraded distractor set"
        );
    }

    Ok(OptionSet {
        options,
        correct_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn term(front: &str, back: &str) -> TermRecord {
        TermRecord::new(front, back, format!("def {front}")).unwrap()
    }

    fn pool() -> Vec<TermRecord> {
        vec![
            term("A", "1"),
            term("B", "2"),
            term("C", "3"),
            term("D", "4"),
            term("E", "5"),
            term("F", "2"),
        ]
    }

    #[test]
    fn correct_appears_exactly_once() {
        let pool = pool();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = generate_options_with("2", &pool, FieldKey::Back, 4, &mut rng).unwrap();
            assert_eq!(set.options().len(), 4);
            assert_eq!(set.options().iter().filter(|o| *o == "2").count(), 1);
            assert_eq!(set.correct(), Some("2"));

            let unique: HashSet<_> = set.options().iter().collect();
            assert_eq!(unique.len(), set.options().len());
        }
    }

    #[test]
    fn small_pool_degrades_instead_of_failing() {
        let pool = vec![term("A", "1"), term("B", "2"), term("C", "2")];
        let mut rng = StdRng::seed_from_u64(7);
        let set = generate_options_with("1", &pool, FieldKey::Back, 4, &mut rng).unwrap();

        assert_eq!(set.options().len(), 2);
        assert!(set.is_degraded(4));
        assert_eq!(set.correct(), Some("1"));
        assert!(set.options().contains(&"2".to_string()));
    }

    #[test]
    fn single_distinct_value_is_insufficient() {
        let pool = vec![term("A", "1"), term("B", "1")];
        let err = generate_options("1", &pool, FieldKey::Back, 4).unwrap_err();
        assert_eq!(err, DistractorError::InsufficientPool { distinct: 1 });
    }

    #[test]
    fn count_below_two_is_rejected() {
        let err = generate_options("1", &pool(), FieldKey::Back, 1).unwrap_err();
        assert_eq!(err, DistractorError::InvalidCount(1));
    }

    #[test]
    fn correct_index_covers_every_slot() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(42);
        let mut hit = [false; 4];
        for _ in 0..200 {
            let set = generate_options_with("1", &pool, FieldKey::Back, 4, &mut rng).unwrap();
            hit[set.correct_index()] = true;
        }
        assert!(hit.iter().all(|h| *h));
    }

    #[test]
    fn uses_requested_field() {
        let pool = pool();
        let set = generate_options("A", &pool, FieldKey::Front, 3).unwrap();
        assert_eq!(set.options().len(), 3);
        assert!(
            set.options()
                .iter()
                .all(|o| ["A", "B", "C", "D", "E", "F"].contains(&o.as_str()))
        );
    }
}
