//! Demo command: the smallest end-to-end use of the engine.
//!
//! Draws one uniform value, picks one of `1, 2, 3` and shuffles
//! `[1, 2, 3, 4, 5]`.

use mt_engine::MtEngine;
use tracing::info;

/// Runs the demonstration against `engine`.
pub fn run(engine: &mut MtEngine) -> anyhow::Result<()> {
    info!(seed = engine.seeded_with(), "Running demo");

    println!("{}", engine.uniform01());
    println!("{}", engine.choice_ternary(1, 2, 3));

    let mut values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    engine.shuffle(&mut values);
    println!("{:?}", values);

    Ok(())
}
