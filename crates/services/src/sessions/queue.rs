use rand::Rng;
use rand::seq::SliceRandom;

/// Term indices still to be presented in the current pass.
///
/// Terms are taken from the back. A queue never holds the same index twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingQueue {
    items: Vec<usize>,
}

impl WorkingQueue {
    /// Shuffle `eligible` into a fresh queue.
    pub fn shuffled<R: Rng>(mut eligible: Vec<usize>, rng: &mut R) -> Self {
        eligible.sort_unstable();
        eligible.dedup();
        eligible.shuffle(rng);
        Self { items: eligible }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    fn contains(&self, index: usize) -> bool {
        self.items.contains(&index)
    }

    /// Drop every queued index for which `keep` returns false.
    pub fn retain(&mut self, keep: impl FnMut(&usize) -> bool) {
        self.items.retain(keep);
    }

    /// Take the next index, avoiding one whose key equals `previous`.
    ///
    /// If the popped entry repeats `previous` and some other queued entry has a
    /// different key, the two trade places: a uniformly random such entry is
    /// returned and the popped one goes back into its slot.
    pub fn pop_avoiding<'k, R, F>(
        &mut self,
        previous: Option<&str>,
        key_of: F,
        rng: &mut R,
    ) -> Option<usize>
    where
        R: Rng,
        F: Fn(usize) -> &'k str,
    {
        let next = self.items.pop()?;
        let Some(previous) = previous else {
            return Some(next);
        };
        if key_of(next) != previous {
            return Some(next);
        }

        let alternatives: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, index)| key_of(**index) != previous)
            .map(|(slot, _)| slot)
            .collect();
        if alternatives.is_empty() {
            return Some(next);
        }

        let slot = alternatives[rng.random_range(0..alternatives.len())];
        Some(std::mem::replace(&mut self.items[slot], next))
    }
}
