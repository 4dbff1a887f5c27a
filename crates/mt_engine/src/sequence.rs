//! Integer sequences and in-place shuffling.

use rand::seq::SliceRandom;

use crate::engine::MtEngine;
use crate::error::{EngineError, Result};

impl MtEngine {
    /// Returns the half-open range `[a, b)` as a vector.
    ///
    /// Does not touch the generator.
    ///
    /// # Errors
    ///
    /// `Range` if `a > b`. `a == b` yields an empty vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mt_engine::MtEngine;
    ///
    /// let engine = MtEngine::from_seed(0);
    /// assert_eq!(engine.sequence(5, 10).unwrap(), vec![5, 6, 7, 8, 9]);
    /// ```
    pub fn sequence(&self, a: i64, b: i64) -> Result<Vec<i64>> {
        EngineError::check_range("sequence", a, b)?;
        Ok((a..b).collect())
    }

    /// Returns a vector of `n` ones.
    pub fn ones(&self, n: usize) -> Vec<i64> {
        vec![1; n]
    }

    /// Shuffles `values` in place with a Fisher-Yates pass driven by this
    /// engine; every permutation is equally likely.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mt_engine::MtEngine;
    ///
    /// let mut engine = MtEngine::from_seed(7);
    /// let mut deck = vec![1, 2, 3, 4, 5];
    /// engine.shuffle(&mut deck);
    ///
    /// let mut sorted = deck.clone();
    /// sorted.sort();
    /// assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(self);
    }

    /// By-value variant of [`shuffle`](Self::shuffle).
    pub fn shuffled<T>(&mut self, mut values: Vec<T>) -> Vec<T> {
        self.shuffle(&mut values);
        values
    }
}
