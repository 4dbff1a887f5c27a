//! Sampling commands
//!
//! Thin wrappers that draw from the engine and print one result per line.

use std::fmt::Display;

use anyhow::{bail, ensure};
use mt_engine::{MtEngine, ParallelSampler};
use tracing::{debug, info};

fn print_lines<T: Display>(values: impl IntoIterator<Item = T>) {
    for value in values {
        println!("{}", value);
    }
}

/// `count` uniform draws, on [0, 1) or between the given bounds.
pub fn uniform(
    engine: &mut MtEngine,
    count: usize,
    low: Option<f64>,
    high: Option<f64>,
) -> anyhow::Result<()> {
    let values = match (low, high) {
        (Some(a), Some(b)) => engine.uniform_vector_between(a, b, count)?,
        (None, None) => engine.uniform_vector(count),
        _ => bail!("--low and --high must be given together"),
    };
    print_lines(values);
    Ok(())
}

/// `count` normal draws with the given mean and standard deviation.
pub fn normal(engine: &mut MtEngine, count: usize, mean: f64, std_dev: f64) -> anyhow::Result<()> {
    let values = (0..count)
        .map(|_| engine.normal(mean, std_dev))
        .collect::<Result<Vec<_>, _>>()?;
    print_lines(values);
    Ok(())
}

/// One value chosen uniformly from `values`.
pub fn choice(engine: &mut MtEngine, values: &[String]) -> anyhow::Result<()> {
    let picked = engine.choose(values)?;
    println!("{}", picked);
    Ok(())
}

/// `count` weighted choices.
pub fn weighted(
    engine: &mut MtEngine,
    values: &[String],
    weights: &[f64],
    count: usize,
) -> anyhow::Result<()> {
    for _ in 0..count {
        println!("{}", engine.choice_weighted(values, weights)?);
    }
    Ok(())
}

/// Integer draws from `[min, max]`.
pub fn ints(
    engine: &mut MtEngine,
    min: i64,
    max: i64,
    count: usize,
    unique: bool,
) -> anyhow::Result<()> {
    let values = engine.random_ints(min, max, count, !unique)?;
    print_lines(values);
    Ok(())
}

/// Lattice points in 2 or 3 dimensions; `bounds` holds `min max` per axis.
pub fn points(
    engine: &mut MtEngine,
    bounds: &[i64],
    count: usize,
    unique: bool,
) -> anyhow::Result<()> {
    match *bounds {
        [xmin, xmax, ymin, ymax] => {
            let points = engine.random_points_2d(xmin, xmax, ymin, ymax, count, !unique)?;
            print_lines(points.into_iter().map(|p| format!("{} {}", p.x, p.y)));
        }
        [xmin, xmax, ymin, ymax, zmin, zmax] => {
            let points =
                engine.random_points_3d(xmin, xmax, ymin, ymax, zmin, zmax, count, !unique)?;
            print_lines(
                points
                    .into_iter()
                    .map(|p| format!("{} {} {}", p.x, p.y, p.z)),
            );
        }
        _ => bail!(
            "expected 4 or 6 bounds (min max per axis), got {}",
            bounds.len()
        ),
    }
    Ok(())
}

/// Shuffles `values` and prints them on one line.
pub fn shuffle(engine: &mut MtEngine, values: Vec<String>) -> anyhow::Result<()> {
    let values = engine.shuffled(values);
    println!("{}", values.join(" "));
    Ok(())
}

/// Bulk normal draws with the parallel sampler; prints summary moments.
pub fn bulk(sampler: &ParallelSampler, count: usize) -> anyhow::Result<()> {
    ensure!(count > 0, "count must be positive");
    info!(
        base_seed = sampler.base_seed(),
        chunk_size = sampler.chunk_size(),
        count,
        "Sampling in parallel"
    );

    let values = sampler.normal_vector(count);
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    debug!(mean, variance, "bulk sample moments");

    println!("count    {}", count);
    println!("mean     {:.6}", mean);
    println!("variance {:.6}", variance);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_needs_both_bounds() {
        let mut engine = MtEngine::from_seed(1);
        let err = uniform(&mut engine, 3, Some(0.0), None).unwrap_err();
        assert!(err.to_string().contains("--low and --high"));
        assert!(uniform(&mut engine, 3, None, Some(1.0)).is_err());

        assert!(uniform(&mut engine, 3, None, None).is_ok());
        assert!(uniform(&mut engine, 3, Some(2.0), Some(-2.0)).is_ok());
    }

    #[test]
    fn test_points_dispatch_on_bound_count() {
        let mut engine = MtEngine::from_seed(1);
        assert!(points(&mut engine, &[0, 3, 0, 3], 4, true).is_ok());
        assert!(points(&mut engine, &[0, 1, 0, 1, 0, 1], 8, true).is_ok());

        let err = points(&mut engine, &[0, 1, 0, 1, 0], 1, false).unwrap_err();
        assert!(err.to_string().contains("got 5"));
    }

    #[test]
    fn test_points_reports_engine_errors() {
        let mut engine = MtEngine::from_seed(1);
        // 2x2 grid has only 4 distinct cells
        assert!(points(&mut engine, &[0, 1, 0, 1], 5, true).is_err());
        assert!(points(&mut engine, &[1, 0, 0, 1], 1, false).is_err());
    }

    #[test]
    fn test_engine_errors_propagate() {
        let mut engine = MtEngine::from_seed(1);
        assert!(normal(&mut engine, 1, 0.0, -1.0).is_err());
        assert!(choice(&mut engine, &[]).is_err());
        let values = vec!["a".to_string(), "b".to_string()];
        assert!(weighted(&mut engine, &values, &[1.0], 1).is_err());
        assert!(ints(&mut engine, 0, 3, 5, true).is_err());
        assert!(ints(&mut engine, 0, 3, 4, true).is_ok());
    }

    #[test]
    fn test_bulk_rejects_empty_request() {
        let sampler = ParallelSampler::new(1, 16).unwrap();
        let err = bulk(&sampler, 0).unwrap_err();
        assert!(err.to_string().contains("count must be positive"));
        assert!(bulk(&sampler, 100).is_ok());
    }
}
