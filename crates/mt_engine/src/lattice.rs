//! Integer draws and lattice point sampling in one, two and three dimensions.
//!
//! Sampling without repetition takes the first `count` entries of a uniform
//! random permutation of the flattened index domain (a partial Fisher-Yates),
//! then decodes each flat index into coordinates. Domains too large to index
//! with `usize` fall back to rejection against the values already drawn,
//! which stays cheap because `count` is then tiny next to the domain. A
//! `count` larger than the domain is refused up front.

use std::collections::HashSet;

use rand::distributions::Uniform;
use rand::seq::index;
use rand::Rng;
use rand_distr::Distribution;

use crate::engine::MtEngine;
use crate::error::{EngineError, Result};

/// A point on a two-dimensional integer lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point2 {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
}

/// A point on a three-dimensional integer lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point3 {
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
    /// Z coordinate.
    pub z: i64,
}

impl From<Point2> for [i64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

impl From<Point3> for [i64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

impl MtEngine {
    /// Draws one integer uniformly from the inclusive range `[a, b]`.
    ///
    /// # Errors
    ///
    /// `Range` if `a > b`.
    pub fn random_int(&mut self, a: i64, b: i64) -> Result<i64> {
        EngineError::check_range("random_int", a, b)?;
        Ok(self.gen_range(a..=b))
    }

    /// Draws `count` integers from `[a, b]`.
    ///
    /// With `allow_repeats` the draws are independent. Without it the result
    /// holds `count` distinct values in random order.
    ///
    /// # Errors
    ///
    /// - `Range` if `a > b`
    /// - `InvalidArgument` if `!allow_repeats` and `count > b - a + 1`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mt_engine::MtEngine;
    ///
    /// let mut engine = MtEngine::from_seed(1);
    /// let mut digits = engine.random_ints(0, 9, 10, false).unwrap();
    /// digits.sort();
    /// assert_eq!(digits, (0..10).collect::<Vec<i64>>());
    ///
    /// assert!(engine.random_ints(0, 9, 11, false).is_err());
    /// ```
    pub fn random_ints(
        &mut self,
        a: i64,
        b: i64,
        count: usize,
        allow_repeats: bool,
    ) -> Result<Vec<i64>> {
        let span = axis_len("random_ints", a, b)?;

        if allow_repeats {
            let dist = Uniform::new_inclusive(a, b);
            return Ok((0..count).map(|_| dist.sample(self)).collect());
        }

        let picks = self.unique_indices(span, count)?;
        Ok(picks.into_iter().map(|i| offset(a, i)).collect())
    }

    /// Draws `count` points from the grid `[xmin, xmax] x [ymin, ymax]`.
    ///
    /// Without `allow_repeats` every returned point is a distinct cell.
    ///
    /// # Errors
    ///
    /// - `Range` if either axis is reversed
    /// - `InvalidArgument` if `!allow_repeats` and `count` exceeds the
    ///   number of cells
    pub fn random_points_2d(
        &mut self,
        xmin: i64,
        xmax: i64,
        ymin: i64,
        ymax: i64,
        count: usize,
        allow_repeats: bool,
    ) -> Result<Vec<Point2>> {
        let nx = axis_len("x", xmin, xmax)?;
        let ny = axis_len("y", ymin, ymax)?;

        if allow_repeats {
            let ux = Uniform::new_inclusive(xmin, xmax);
            let uy = Uniform::new_inclusive(ymin, ymax);
            return Ok((0..count)
                .map(|_| Point2 {
                    x: ux.sample(self),
                    y: uy.sample(self),
                })
                .collect());
        }

        let cells = grid_cells(&[nx, ny])?;
        let picks = self.unique_indices(cells, count)?;
        Ok(picks
            .into_iter()
            .map(|flat| Point2 {
                x: offset(xmin, flat % nx),
                y: offset(ymin, flat / nx),
            })
            .collect())
    }

    /// Draws `count` points from the box
    /// `[xmin, xmax] x [ymin, ymax] x [zmin, zmax]`.
    ///
    /// Without `allow_repeats` every returned point is a distinct cell; a
    /// `count` equal to the number of cells returns the whole box in random
    /// order.
    ///
    /// # Errors
    ///
    /// - `Range` if any axis is reversed
    /// - `InvalidArgument` if `!allow_repeats` and `count` exceeds the
    ///   number of cells
    #[allow(clippy::too_many_arguments)]
    pub fn random_points_3d(
        &mut self,
        xmin: i64,
        xmax: i64,
        ymin: i64,
        ymax: i64,
        zmin: i64,
        zmax: i64,
        count: usize,
        allow_repeats: bool,
    ) -> Result<Vec<Point3>> {
        let nx = axis_len("x", xmin, xmax)?;
        let ny = axis_len("y", ymin, ymax)?;
        let nz = axis_len("z", zmin, zmax)?;

        if allow_repeats {
            let ux = Uniform::new_inclusive(xmin, xmax);
            let uy = Uniform::new_inclusive(ymin, ymax);
            let uz = Uniform::new_inclusive(zmin, zmax);
            return Ok((0..count)
                .map(|_| Point3 {
                    x: ux.sample(self),
                    y: uy.sample(self),
                    z: uz.sample(self),
                })
                .collect());
        }

        let cells = grid_cells(&[nx, ny, nz])?;
        let picks = self.unique_indices(cells, count)?;
        let layer = nx * ny;
        Ok(picks
            .into_iter()
            .map(|flat| {
                let zo = flat / layer;
                let rem = flat - zo * layer;
                let yo = rem / nx;
                let xo = rem - yo * nx;
                Point3 {
                    x: offset(xmin, xo),
                    y: offset(ymin, yo),
                    z: offset(zmin, zo),
                }
            })
            .collect())
    }

    /// First `count` entries of a uniform random permutation of
    /// `[0, domain)`.
    fn unique_indices(&mut self, domain: u128, count: usize) -> Result<Vec<u128>> {
        if count as u128 > domain {
            return Err(EngineError::invalid(
                "count",
                format!(
                    "cannot draw {} distinct values from a domain of {}",
                    count, domain
                ),
            ));
        }
        match usize::try_from(domain) {
            Ok(length) => Ok(index::sample(self, length, count)
                .into_iter()
                .map(|i| i as u128)
                .collect()),
            Err(_) => Ok(self.sparse_unique_indices(domain, count)),
        }
    }

    /// Distinct draws from `[0, domain)` by rejection, in draw order.
    ///
    /// Only used when `domain` exceeds `usize::MAX`, so `count` is at most a
    /// vanishing fraction of it and a repeat is rare.
    fn sparse_unique_indices(&mut self, domain: u128, count: usize) -> Vec<u128> {
        tracing::trace!(domain, count, "sampling distinct indices by rejection");
        let mut seen = HashSet::with_capacity(count);
        let mut picks = Vec::with_capacity(count);
        while picks.len() < count {
            let flat = self.gen_range(0..domain);
            if seen.insert(flat) {
                picks.push(flat);
            }
        }
        picks
    }
}

/// Number of integers in `[low, high]`.
fn axis_len(name: &'static str, low: i64, high: i64) -> Result<u128> {
    EngineError::check_range(name, low, high)?;
    Ok((high as i128 - low as i128 + 1) as u128)
}

/// Product of axis lengths, refusing products beyond `u128`.
fn grid_cells(axes: &[u128]) -> Result<u128> {
    axes.iter().try_fold(1u128, |acc, &n| {
        acc.checked_mul(n)
            .ok_or_else(|| EngineError::invalid("count", "lattice has too many cells"))
    })
}

/// `base + step` for a step that is known to stay inside the sampled range.
#[inline]
fn offset(base: i64, step: u128) -> i64 {
    (base as i128 + step as i128) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_int_bounds() {
        let mut engine = MtEngine::from_seed(42);
        let mut seen = HashSet::new();
        for _ in 0..5_000 {
            let v = engine.random_int(-3, 3).unwrap();
            assert!((-3..=3).contains(&v));
            seen.insert(v);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_random_int_degenerate_and_reversed() {
        let mut engine = MtEngine::from_seed(42);
        assert_eq!(engine.random_int(5, 5).unwrap(), 5);
        assert_eq!(
            engine.random_int(6, 5),
            Err(EngineError::Range {
                name: "random_int",
                low: 6,
                high: 5
            })
        );
    }

    #[test]
    fn test_random_int_full_range() {
        let mut engine = MtEngine::from_seed(42);
        assert!(engine.random_int(i64::MIN, i64::MAX).is_ok());
    }

    #[test]
    fn test_random_ints_with_repeats() {
        let mut engine = MtEngine::from_seed(42);
        let values = engine.random_ints(0, 2, 100, true).unwrap();
        assert_eq!(values.len(), 100);
        assert!(values.iter().all(|v| (0..=2).contains(v)));
    }

    #[test]
    fn test_random_ints_unique_full_domain() {
        let mut engine = MtEngine::from_seed(42);
        for _ in 0..100 {
            let mut values = engine.random_ints(0, 9, 10, false).unwrap();
            values.sort_unstable();
            assert_eq!(values, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_random_ints_unique_offset_range() {
        let mut engine = MtEngine::from_seed(3);
        let values = engine.random_ints(-50, -41, 4, false).unwrap();
        let distinct: HashSet<_> = values.iter().collect();
        assert_eq!(distinct.len(), 4);
        assert!(values.iter().all(|v| (-50..=-41).contains(v)));
    }

    #[test]
    fn test_random_ints_unique_too_many() {
        let mut engine = MtEngine::from_seed(42);
        assert!(matches!(
            engine.random_ints(0, 9, 11, false),
            Err(EngineError::InvalidArgument { name: "count", .. })
        ));
        // with repeats the same request is fine
        assert_eq!(engine.random_ints(0, 9, 11, true).unwrap().len(), 11);
    }

    #[test]
    fn test_random_ints_unique_large_sparse_domain() {
        let mut engine = MtEngine::from_seed(42);
        let values = engine.random_ints(0, 1_000_000_000, 1_000, false).unwrap();
        let distinct: HashSet<_> = values.iter().collect();
        assert_eq!(distinct.len(), 1_000);
    }

    #[test]
    fn test_random_ints_unique_full_i64_domain() {
        let mut engine = MtEngine::from_seed(42);
        let values = engine.random_ints(i64::MIN, i64::MAX, 64, false).unwrap();
        assert_eq!(values.len(), 64);
        let distinct: HashSet<_> = values.iter().collect();
        assert_eq!(distinct.len(), 64);

        assert_eq!(engine.random_ints(i64::MIN, i64::MAX, 1, false).unwrap().len(), 1);
        assert!(engine.random_ints(i64::MIN, i64::MAX, 0, false).unwrap().is_empty());
    }

    #[test]
    fn test_random_ints_unique_full_domain_replays() {
        let mut a = MtEngine::from_seed(5);
        let mut b = MtEngine::from_seed(5);
        assert_eq!(
            a.random_ints(i64::MIN, i64::MAX, 10, false).unwrap(),
            b.random_ints(i64::MIN, i64::MAX, 10, false).unwrap()
        );
    }

    /// A 2D grid of 2^64 x 4 cells is beyond `usize` but still sampled.
    #[test]
    fn test_random_points_2d_unique_huge_grid() {
        let mut engine = MtEngine::from_seed(8);
        let points = engine
            .random_points_2d(i64::MIN, i64::MAX, -2, 1, 100, false)
            .unwrap();
        let cells: HashSet<_> = points.iter().copied().collect();
        assert_eq!(cells.len(), 100);
        assert!(points.iter().all(|p| (-2..=1).contains(&p.y)));
    }

    #[test]
    fn test_random_points_2d_unique_full_grid() {
        let mut engine = MtEngine::from_seed(42);
        let points = engine.random_points_2d(1, 3, -1, 2, 12, false).unwrap();
        let cells: HashSet<_> = points.iter().copied().collect();
        assert_eq!(cells.len(), 12);
        for x in 1..=3 {
            for y in -1..=2 {
                assert!(cells.contains(&Point2 { x, y }));
            }
        }
        assert!(engine.random_points_2d(1, 3, -1, 2, 13, false).is_err());
    }

    /// Repeated 2D draws use each axis' own range.
    #[test]
    fn test_random_points_2d_repeats_axes() {
        let mut engine = MtEngine::from_seed(42);
        let points = engine.random_points_2d(0, 1, 100, 200, 1_000, true).unwrap();
        assert!(points.iter().all(|p| (0..=1).contains(&p.x)));
        assert!(points.iter().all(|p| (100..=200).contains(&p.y)));
    }

    #[test]
    fn test_random_points_2d_reversed_axis() {
        let mut engine = MtEngine::from_seed(42);
        assert!(matches!(
            engine.random_points_2d(0, 1, 5, 4, 1, true),
            Err(EngineError::Range { name: "y", .. })
        ));
    }

    #[test]
    fn test_random_points_3d_unique_full_grid() {
        let mut engine = MtEngine::from_seed(42);
        let points = engine
            .random_points_3d(0, 2, 10, 11, -2, 1, 24, false)
            .unwrap();
        assert_eq!(points.len(), 24);
        let cells: HashSet<_> = points.iter().copied().collect();
        assert_eq!(cells.len(), 24);
        for x in 0..=2 {
            for y in 10..=11 {
                for z in -2..=1 {
                    assert!(cells.contains(&Point3 { x, y, z }));
                }
            }
        }
    }

    #[test]
    fn test_random_points_3d_repeats_in_box() {
        let mut engine = MtEngine::from_seed(42);
        let points = engine.random_points_3d(0, 0, 1, 2, 3, 5, 500, true).unwrap();
        assert_eq!(points.len(), 500);
        for p in points {
            assert_eq!(p.x, 0);
            assert!((1..=2).contains(&p.y));
            assert!((3..=5).contains(&p.z));
        }
    }

    #[test]
    fn test_random_points_3d_too_many() {
        let mut engine = MtEngine::from_seed(42);
        assert!(engine.random_points_3d(0, 1, 0, 1, 0, 1, 9, false).is_err());
    }

    #[test]
    fn test_random_points_3d_overflowing_grid() {
        let mut engine = MtEngine::from_seed(42);
        let result = engine.random_points_3d(
            i64::MIN,
            i64::MAX,
            i64::MIN,
            i64::MAX,
            0,
            0,
            1,
            false,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidArgument { name: "count", .. })
        ));
    }

    #[test]
    fn test_point_conversions() {
        let p: [i64; 3] = Point3 { x: 1, y: 2, z: 3 }.into();
        assert_eq!(p, [1, 2, 3]);
        let q: [i64; 2] = Point2 { x: -1, y: 4 }.into();
        assert_eq!(q, [-1, 4]);
    }

    #[test]
    fn test_grid_cells_overflow() {
        assert!(grid_cells(&[u128::MAX, 2]).is_err());
        assert_eq!(grid_cells(&[3, 4, 5]).unwrap(), 60);
    }
}
