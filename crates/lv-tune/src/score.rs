//! Tracking-error scoring for candidate gain sets.

use lv_core::numeric::Real;
use lv_sim::{run_simulation, Settings};

/// Sub-linear penalty exponent. Discounts large transient excursions
/// relative to linear error while still penalizing sustained small error.
/// Empirical domain constant, not tunable.
const SCORE_EXPONENT: Real = 1.0 / 1.7;

/// Per-tick deviation between the level series and the setpoint series:
/// `|setpoint[t] - level[t]| ^ (1/1.7)`.
pub fn score_series(level: &[Real], setpoint: &[Real]) -> Vec<Real> {
    level
        .iter()
        .zip(setpoint)
        .map(|(&l, &sp)| (sp - l).abs().powf(SCORE_EXPONENT))
        .collect()
}

/// Mean per-tick score over one or more fresh simulation runs. Lower is
/// better.
///
/// When the drain is stochastic and the seeded generator is not in use,
/// the run is repeated `at_stability_factor` times and the scores of every
/// tick of every repeat are averaged together, damping disturbance noise.
/// Otherwise repeats would be identical and a single run is scored.
pub fn benchmark(settings: &Settings) -> Real {
    let repeats = if settings.variable_drain && !settings.use_prng {
        settings.at_stability_factor.max(1)
    } else {
        1
    };

    let mut sum = 0.0;
    let mut count = 0usize;
    for _ in 0..repeats {
        let out = run_simulation(settings);
        let scores = score_series(&out.level, &out.setpoint);
        count += scores.len();
        sum += scores.iter().sum::<Real>();
    }
    sum / count as Real
}
