//! Categorical choice: two-way, three-way, N-way and weighted.

use crate::engine::MtEngine;
use crate::error::{EngineError, Result};

impl MtEngine {
    /// Returns `a` if `uniform01() <= 0.5`, otherwise `b`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mt_engine::MtEngine;
    ///
    /// let mut engine = MtEngine::from_seed(3);
    /// let side = engine.choice_binary("heads", "tails");
    /// assert!(side == "heads" || side == "tails");
    /// ```
    #[inline]
    pub fn choice_binary<T>(&mut self, a: T, b: T) -> T {
        if self.uniform01() <= 0.5 {
            a
        } else {
            b
        }
    }

    /// Returns `a`, `b` or `c` with equal probability.
    ///
    /// Boundary draws belong to the lower-indexed option: `<= 1/3` selects
    /// `a`, `<= 2/3` selects `b`.
    pub fn choice_ternary<T>(&mut self, a: T, b: T, c: T) -> T {
        let r = self.uniform01();
        if r <= 1.0 / 3.0 {
            a
        } else if r <= 2.0 / 3.0 {
            b
        } else {
            c
        }
    }

    /// Draws an index in `[0, n)` by splitting [0, 1] into `n` equal
    /// segments and walking them in order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `n == 0`.
    pub fn choose_index(&mut self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(EngineError::invalid("values", "cannot choose from zero options"));
        }
        let r = self.uniform01();
        let total = n as f64;
        let index = (1..=n)
            .find(|&i| r <= i as f64 / total)
            .map_or(n - 1, |i| i - 1);

        tracing::trace!(index, n, "choice selected element");
        Ok(index)
    }

    /// Returns one element of `values`, each with probability `1 / len`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mt_engine::MtEngine;
    ///
    /// let mut engine = MtEngine::from_seed(1);
    /// let colours = ["red", "green", "blue", "yellow"];
    /// let picked = engine.choose(&colours).unwrap();
    /// assert!(colours.contains(picked));
    /// ```
    pub fn choose<'a, T>(&mut self, values: &'a [T]) -> Result<&'a T> {
        let index = self.choose_index(values.len())?;
        Ok(&values[index])
    }

    /// Returns one element of `values` with probability proportional to the
    /// matching entry of `weights`.
    ///
    /// Weights need not be normalised. A cumulative sum is built in input
    /// order, `r = uniform01() * total` is drawn, and the first value whose
    /// cumulative weight exceeds `r` is returned. Zero-weight entries are
    /// never selected.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the slices are empty or differ in length, if any
    /// weight is negative or not finite, or if the weights sum to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mt_engine::MtEngine;
    ///
    /// let mut engine = MtEngine::from_seed(10);
    /// let v = engine.choice_weighted(&[10.0, 20.0], &[0.0, 1.0]).unwrap();
    /// assert_eq!(v, 20.0);
    /// ```
    pub fn choice_weighted<T: Clone>(&mut self, values: &[T], weights: &[f64]) -> Result<T> {
        let cdf = cumulative_weights(values.len(), weights)?;
        let total = cdf[cdf.len() - 1];

        let r = self.uniform01() * total;
        let index = match cdf.partition_point(|&c| c <= r) {
            // rounding can push r onto the total; fall back to the last
            // option that carries weight
            i if i == cdf.len() => weights.iter().rposition(|&w| w > 0.0).unwrap_or(i - 1),
            i => i,
        };
        Ok(values[index].clone())
    }
}

/// Validates `weights` against `len` and returns their running sum.
fn cumulative_weights(len: usize, weights: &[f64]) -> Result<Vec<f64>> {
    if len == 0 {
        return Err(EngineError::invalid("values", "must not be empty"));
    }
    if weights.len() != len {
        return Err(EngineError::invalid(
            "weights",
            format!("expected {} weights, got {}", len, weights.len()),
        ));
    }
    if let Some((i, w)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(EngineError::invalid(
            "weights",
            format!("weight {} at index {} must be finite and non-negative", w, i),
        ));
    }

    let cdf: Vec<f64> = weights
        .iter()
        .scan(0.0, |acc, &w| {
            *acc += w;
            Some(*acc)
        })
        .collect();

    let total = cdf[len - 1];
    if !(total > 0.0 && total.is_finite()) {
        return Err(EngineError::invalid(
            "weights",
            format!("total weight must be positive and finite, got {}", total),
        ));
    }
    Ok(cdf)
}
