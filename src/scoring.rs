//! # Exoplanet target scoring
//!
//! Rank-based score used to prioritize exoplanet targets: planets with few follow-up
//! observations, few recent ones, many nearby targets of opportunity and short periods or
//! durations score higher.
//!
//! ## Method
//!
//! Each metric is turned into a normalized rank `(r + 1) / n`, where `r` is the 0-based
//! position of the value in ascending order (ties keep input order):
//!
//! | rank       | metric sorted ascending                                  |
//! |------------|----------------------------------------------------------|
//! | `r_obs`    | `−observations`                                          |
//! | `r_recent` | `1 − recent / observations` (zeros replaced by `1`)      |
//! | `r_tofo`   | number of targets of opportunity in the field           |
//! | `r_period` | `−min_period`                                            |
//! | `r_dur`    | `−min_duration`                                          |
//!
//! and combined by the weighted geometric mean
//!
//! ```text
//! score = (r_obs · r_recent³ · r_tofo³ · r_period² · r_dur)^(1/10)
//! ```
//!
//! Missing (NaN) metrics count as `0`. Scores lie in `(0, 1]` and can be fed directly to
//! [`Target::with_priority`](crate::targets::Target::with_priority).

use std::collections::HashMap;

use itertools::Itertools;

use crate::targets::Target;

/// Input metrics of one exoplanet.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetStats {
    pub target: String,
    /// Catalogue priority label, carried through untouched.
    pub priority: String,
    pub observations: f64,
    pub recent_observations: f64,
    /// Number of variable stars (targets of opportunity) in the field.
    pub num_tofo: usize,
    /// Shortest period of those targets, days.
    pub min_period: f64,
    /// Shortest event duration of those targets, hours.
    pub min_duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetScore {
    pub target: String,
    pub priority: String,
    pub score: f64,
}

/// Compute every score, returned in ascending score order.
pub fn score_targets(stats: &[TargetStats]) -> Vec<TargetScore> {
    let n = stats.len();
    if n == 0 {
        return Vec::new();
    }
    let clean = |v: f64| if v.is_nan() { 0.0 } else { v };

    let obs: Vec<f64> = stats.iter().map(|s| clean(s.observations)).collect();
    let recent: Vec<f64> = stats.iter().map(|s| clean(s.recent_observations)).collect();

    let r_obs = normalized_ranks(&obs.iter().map(|o| -o).collect_vec());
    let r_recent = normalized_ranks(
        &recent
            .iter()
            .zip(&obs)
            .map(|(r, o)| odiv(*r, *o))
            .collect_vec(),
    );
    let r_tofo = normalized_ranks(&stats.iter().map(|s| s.num_tofo as f64).collect_vec());
    let r_period = normalized_ranks(&stats.iter().map(|s| -clean(s.min_period)).collect_vec());
    let r_duration =
        normalized_ranks(&stats.iter().map(|s| -clean(s.min_duration)).collect_vec());

    let mut scores: Vec<TargetScore> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let product = r_obs[i]
                * r_recent[i].powi(3)
                * r_tofo[i].powi(3)
                * r_period[i].powi(2)
                * r_duration[i];
            TargetScore {
                target: s.target.clone(),
                priority: s.priority.clone(),
                score: product.powf(0.1),
            }
        })
        .collect();
    scores.sort_by(|a, b| a.score.total_cmp(&b.score));
    scores
}

/// `1 − a/b`, with zeros on either side replaced by `1`.
fn odiv(a: f64, b: f64) -> f64 {
    let a = if a == 0.0 { 1.0 } else { a };
    let b = if b == 0.0 { 1.0 } else { b };
    1.0 - a / b
}

/// `(position in ascending order + 1) / n` for every value.
fn normalized_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mut ranks = vec![0.0; values.len()];
    for (rank, idx) in (0..values.len())
        .sorted_by(|&i, &j| values[i].total_cmp(&values[j]))
        .enumerate()
    {
        ranks[idx] = (rank as f64 + 1.0) / n;
    }
    ranks
}

/// Scores indexed by target name.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    scores: HashMap<String, TargetScore>,
}

impl ScoreTable {
    pub fn from_stats(stats: &[TargetStats]) -> Self {
        ScoreTable {
            scores: score_targets(stats)
                .into_iter()
                .map(|s| (s.target.clone(), s))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TargetScore> {
        self.scores.get(name)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Use each target's score as its priority weight. Unscored targets are left unchanged.
    pub fn prioritize(&self, targets: Vec<Target>) -> Vec<Target> {
        targets
            .into_iter()
            .map(|t| match self.get(t.name()) {
                Some(s) => t.with_priority(s.score),
                None => t,
            })
            .collect()
    }
}
