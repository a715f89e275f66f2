//! # Sequence selection
//!
//! Ranking of enumerated sequences. A ranker is a pure function of its input: it keeps no
//! state between calls and never alters the sequences, it only returns them in preference
//! order. All provided policies use a stable sort, so equally ranked sequences keep their
//! enumeration order.

use std::cmp::Ordering;

use crate::scheduler::sequence::Sequence;

pub trait SequenceRanker {
    /// Return `sequences` from most to least preferred.
    fn rank<'s>(&self, sequences: &'s [Sequence]) -> Vec<&'s Sequence>;

    /// The `limit` most preferred sequences.
    fn top<'s>(&self, sequences: &'s [Sequence], limit: usize) -> Vec<&'s Sequence> {
        let mut ranked = self.rank(sequences);
        ranked.truncate(limit);
        ranked
    }
}

/// Built-in ranking policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingPolicy {
    /// Most nodes first.
    MostObservations,
    /// Highest summed node weight first.
    HighestTotalWeight,
    /// Longest time from first start to last end first.
    LongestSpan,
    /// Most nodes first, ties broken by highest summed weight.
    #[default]
    MostObservationsThenWeight,
}

impl RankingPolicy {
    fn compare(&self, a: &Sequence, b: &Sequence) -> Ordering {
        let by_len = || b.len().cmp(&a.len());
        let by_weight = || {
            b.total_weight()
                .partial_cmp(&a.total_weight())
                .unwrap_or(Ordering::Equal)
        };
        match self {
            RankingPolicy::MostObservations => by_len(),
            RankingPolicy::HighestTotalWeight => by_weight(),
            RankingPolicy::LongestSpan => b
                .span()
                .partial_cmp(&a.span())
                .unwrap_or(Ordering::Equal),
            RankingPolicy::MostObservationsThenWeight => by_len().then_with(by_weight),
        }
    }
}

impl SequenceRanker for RankingPolicy {
    fn rank<'s>(&self, sequences: &'s [Sequence]) -> Vec<&'s Sequence> {
        let mut ranked: Vec<&Sequence> = sequences.iter().collect();
        ranked.sort_by(|a, b| self.compare(a, b));
        ranked
    }
}
