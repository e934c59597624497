//! Greedy coordinate-descent search over the PID gain vector.

use lv_core::numeric::Real;
use lv_sim::Settings;
use rayon::prelude::*;
use tracing::info;

use crate::error::TuneResult;
use crate::score::benchmark;

/// Gains never go below this. A non-positive gain could drive the command
/// floor permanently and makes no sense for this plant.
const GAIN_FLOOR: Real = 0.001;

/// A candidate PID gain vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gains {
    pub p: Real,
    pub i: Real,
    pub d: Real,
}

impl Gains {
    /// Starting point of the search: the settings gains, floored.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            p: settings.p.max(GAIN_FLOOR),
            i: settings.i.max(GAIN_FLOOR),
            d: settings.d.max(GAIN_FLOOR),
        }
    }
}

/// Per-generation observability record.
#[derive(Clone, Copy, Debug)]
pub struct GenerationRecord {
    /// Best score seen so far, including earlier generations.
    pub best_score_ever: Real,
    /// Best score among this generation's six candidates.
    pub best_score: Real,
    /// The candidate that produced `best_score`, accepted or not.
    pub gains: Gains,
}

/// Outcome of a full autotune run.
#[derive(Clone, Debug)]
pub struct TuneOutcome {
    /// Final incumbent gains.
    pub gains: Gains,
    /// Best score ever observed.
    pub best_score: Real,
    /// One record per generation, in evaluation order.
    pub trace: Vec<GenerationRecord>,
}

/// The six neighbors of a gain vector at the given step size: each gain
/// dimension stepped up and stepped down, the downward step floored at
/// [`GAIN_FLOOR`]. Pure; the search keeps no hidden state.
pub fn neighbors(gains: Gains, step: Real) -> [Gains; 6] {
    let up = |g: Real| g + step;
    let down = |g: Real| (g - step).max(GAIN_FLOOR);
    [
        Gains { p: up(gains.p), ..gains },
        Gains { p: down(gains.p), ..gains },
        Gains { i: up(gains.i), ..gains },
        Gains { i: down(gains.i), ..gains },
        Gains { d: up(gains.d), ..gains },
        Gains { d: down(gains.d), ..gains },
    ]
}

/// Search the gain space for `at_generations` generations, six neighbor
/// candidates per generation, replacing the incumbent only on a strictly
/// better benchmark score.
///
/// The step size for a generation with remaining count `remaining` is
/// `remaining * learning_rate` with `learning_rate = 1 / (gens²)^(1/root)` fixed
/// for the whole run, so steps shrink linearly as generations count down.
///
/// Candidate evaluations within a generation are independent and run in
/// parallel; every evaluation constructs fresh simulation state, so the
/// result is deterministic under the seeded generator.
pub fn autotune(settings: &Settings) -> TuneResult<TuneOutcome> {
    settings.validate()?;

    let generations = settings.at_generations;
    let learning_rate =
        1.0 / ((generations as Real).powi(2)).powf(1.0 / settings.at_training_root);

    let mut incumbent = Gains::from_settings(settings);
    let mut best_score = Real::INFINITY;
    let mut trace = Vec::with_capacity(generations);

    for remaining in (1..=generations).rev() {
        let step = remaining as Real * learning_rate;
        let candidates = neighbors(incumbent, step);

        let scored: Vec<Real> = candidates
            .par_iter()
            .map(|c| benchmark(&settings.with_gains(c.p, c.i, c.d)))
            .collect();

        // Earliest strict minimum, matching sequential evaluation order.
        let (mut winner, mut winner_score) = (candidates[0], scored[0]);
        for (c, &s) in candidates.iter().zip(&scored).skip(1) {
            if s < winner_score {
                winner = *c;
                winner_score = s;
            }
        }

        if winner_score < best_score {
            info!(
                generation = remaining,
                score = winner_score,
                previous = best_score,
                p = winner.p,
                i = winner.i,
                d = winner.d,
                "incumbent replaced"
            );
            best_score = winner_score;
            incumbent = winner;
        }

        trace.push(GenerationRecord {
            best_score_ever: best_score,
            best_score: winner_score,
            gains: winner,
        });
    }

    Ok(TuneOutcome {
        gains: incumbent,
        best_score,
        trace,
    })
}
