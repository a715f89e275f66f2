//! # Sequences
//!
//! A [`Sequence`] is one viable observing program: at least two [`ScheduleNode`]s in time
//! order, each one compatible with the next, no target repeated. Sequences are produced by the
//! [`SequenceEnumerator`](crate::scheduler::enumerate::SequenceEnumerator) and never modified
//! afterwards.
//!
//! [`Sequence::timeline`] expands a sequence into a gap-free list of slots (observation,
//! transition, idle) covering `[start, end]`, ready for display or export.

use hifitime::{Duration, Epoch};

use crate::constants::TargetId;
use crate::scheduler::transition::TransitionOverhead;
use crate::scheduler::{NodeKey, ScheduleNode};
use crate::site::SiteConfig;
use crate::tofo_errors::TofoError;

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    nodes: Vec<ScheduleNode>,
}

/// One block of a materialized timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineSlot {
    Observation {
        key: NodeKey,
        start: Epoch,
        end: Epoch,
    },
    Transition {
        from: NodeKey,
        to: NodeKey,
        start: Epoch,
        end: Epoch,
    },
    Idle {
        start: Epoch,
        end: Epoch,
    },
}

impl TimelineSlot {
    pub fn start(&self) -> Epoch {
        match self {
            TimelineSlot::Observation { start, .. }
            | TimelineSlot::Transition { start, .. }
            | TimelineSlot::Idle { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Epoch {
        match self {
            TimelineSlot::Observation { end, .. }
            | TimelineSlot::Transition { end, .. }
            | TimelineSlot::Idle { end, .. } => *end,
        }
    }
}

impl Sequence {
    /// Wrap already validated nodes. Callers guarantee at least two nodes.
    pub(crate) fn from_nodes(nodes: Vec<ScheduleNode>) -> Self {
        debug_assert!(nodes.len() >= 2);
        Sequence { nodes }
    }

    pub fn nodes(&self) -> &[ScheduleNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for enumerated sequences.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter().map(|n| n.key())
    }

    pub fn target_ids(&self) -> Vec<TargetId> {
        self.nodes.iter().map(|n| n.target_id().to_owned()).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.nodes.iter().map(|n| n.weight()).sum()
    }

    /// Start of the first observation.
    pub fn start(&self) -> Option<Epoch> {
        self.nodes.first().map(|n| n.start_time())
    }

    /// End of the last observation.
    pub fn end(&self) -> Option<Epoch> {
        self.nodes.last().map(|n| n.end_time())
    }

    /// Time from the first start to the last end.
    pub fn span(&self) -> Duration {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => end - start,
            _ => Duration::ZERO,
        }
    }

    /// Lay the sequence out as consecutive slots.
    ///
    /// Arguments
    /// -----------------
    /// * `overhead`: the transition model used to build the sequence.
    /// * `site`: forwarded to the overhead model.
    ///
    /// Return
    /// ----------
    /// * Observation slots interleaved with a transition slot (when the overhead is non-zero)
    ///   and an idle slot (when time is left before the next start). Each slot starts where the
    ///   previous one ends.
    /// * [`TofoError::SchedulingError`] when the overhead fails or no longer fits between two
    ///   consecutive nodes.
    pub fn timeline(
        &self,
        overhead: &dyn TransitionOverhead,
        site: &SiteConfig,
    ) -> Result<Vec<TimelineSlot>, TofoError> {
        let mut slots = Vec::with_capacity(self.nodes.len() * 3);
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(prev) = i.checked_sub(1).map(|p| &self.nodes[p]) {
                let cost = overhead.overhead(prev, node, site).map_err(|err| {
                    TofoError::SchedulingError(format!(
                        "transition overhead {} -> {} failed: {err}",
                        prev.key(),
                        node.key()
                    ))
                })?;
                let ready = prev.end_time() + cost;
                if cost < Duration::ZERO || ready > node.start_time() {
                    return Err(TofoError::SchedulingError(format!(
                        "transition {} -> {} does not fit ({cost})",
                        prev.key(),
                        node.key()
                    )));
                }
                if cost > Duration::ZERO {
                    slots.push(TimelineSlot::Transition {
                        from: prev.key().clone(),
                        to: node.key().clone(),
                        start: prev.end_time(),
                        end: ready,
                    });
                }
                if ready < node.start_time() {
                    slots.push(TimelineSlot::Idle {
                        start: ready,
                        end: node.start_time(),
                    });
                }
            }
            slots.push(TimelineSlot::Observation {
                key: node.key().clone(),
                start: node.start_time(),
                end: node.end_time(),
            });
        }
        Ok(slots)
    }
}
