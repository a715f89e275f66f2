//! # Fixed-interval scheduler
//!
//! Turns the observable occurrences of many targets into every viable observing program.
//!
//! Each occurrence becomes a [`ScheduleNode`]: an immovable interval `[start, end]` (the padded
//! event window) tagged with its [`NodeKey`], a priority weight and the target coordinate.
//! Nodes are sorted by start time; `B` may follow `A` when
//!
//! ```text
//! A.target_id ≠ B.target_id  ∧  A.end + overhead(A, B) ≤ B.start
//! ```
//!
//! With non-negative overheads this relation only points forward in time, so the
//! compatibility graph is a DAG and every path through it is an ordered [`Sequence`].
//!
//! ## Submodules
//!
//! - [`transition`] – overhead models between two nodes.
//! - [`enumerate`] – exhaustive enumeration of compatible chains.
//! - [`sequence`] – the immutable output type and its timeline.
//! - [`selection`] – pure ranking policies over enumerated sequences.
//! - [`transit_scheduler`] – end-to-end façade from targets to ranked sequences.

pub mod enumerate;
pub mod selection;
pub mod sequence;
pub mod transit_scheduler;
pub mod transition;

use std::fmt;

use hifitime::{Duration, Epoch};
use tracing::debug;

use crate::constants::{OccurrenceIndex, TargetId};
use crate::coordinates::EquatorialCoord;
use crate::scheduler::transition::TransitionOverhead;
use crate::site::SiteConfig;
use crate::targets::{Target, Visibility};
use crate::tofo_errors::TofoError;

pub use crate::scheduler::enumerate::{EnumerationMode, SequenceEnumerator};
pub use crate::scheduler::sequence::{Sequence, TimelineSlot};

/// Identity of one occurrence of one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub target_id: TargetId,
    pub occurrence_index: OccurrenceIndex,
}

impl NodeKey {
    pub fn new(target_id: impl Into<TargetId>, occurrence_index: OccurrenceIndex) -> Self {
        NodeKey {
            target_id: target_id.into(),
            occurrence_index,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.target_id, self.occurrence_index)
    }
}

/// One schedulable, immovable observation.
///
/// Nodes own a copy of the timing taken from the occurrence, so they stay valid after the
/// originating target is mutated or dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleNode {
    key: NodeKey,
    start_time: Epoch,
    end_time: Epoch,
    weight: f64,
    coord: EquatorialCoord,
}

impl ScheduleNode {
    /// Arguments
    /// -----------------
    /// * `key`: target and occurrence identity.
    /// * `start_time`, `end_time`: observation interval, `start_time < end_time`.
    /// * `weight`: finite priority weight.
    /// * `coord`: target position, used by slew-aware overheads.
    ///
    /// Return
    /// ----------
    /// * The node, or [`TofoError::SchedulingError`] for an empty interval or a non-finite weight.
    pub fn new(
        key: NodeKey,
        start_time: Epoch,
        end_time: Epoch,
        weight: f64,
        coord: EquatorialCoord,
    ) -> Result<Self, TofoError> {
        if end_time <= start_time {
            return Err(TofoError::SchedulingError(format!(
                "node {key} ends ({end_time}) before it starts ({start_time})"
            )));
        }
        if !weight.is_finite() {
            return Err(TofoError::SchedulingError(format!(
                "node {key} has a non-finite weight ({weight})"
            )));
        }
        Ok(ScheduleNode {
            key,
            start_time,
            end_time,
            weight,
            coord,
        })
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn target_id(&self) -> &str {
        &self.key.target_id
    }

    pub fn occurrence_index(&self) -> OccurrenceIndex {
        self.key.occurrence_index
    }

    pub fn start_time(&self) -> Epoch {
        self.start_time
    }

    pub fn end_time(&self) -> Epoch {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn coord(&self) -> EquatorialCoord {
        self.coord
    }
}

/// Flatten the occurrences of `targets` into nodes sorted by start time.
///
/// Arguments
/// -----------------
/// * `targets`: targets whose occurrences are already computed.
/// * `visibility`: which occurrence list to read from each target.
///
/// Return
/// ----------
/// * One node per occurrence, spanning the padded event window and weighted by the target
///   priority. The sort is stable: equal start times keep target order, then occurrence order.
pub fn build_nodes(
    targets: &[Target],
    visibility: Visibility,
) -> Result<Vec<ScheduleNode>, TofoError> {
    let mut nodes = Vec::new();
    for target in targets {
        let Some(coord) = target.coord() else {
            continue;
        };
        for occurrence in target.occurrences(visibility) {
            let times = occurrence.times();
            nodes.push(ScheduleNode::new(
                NodeKey::new(target.name(), occurrence.index()),
                times.window_start,
                times.window_end,
                target.priority(),
                coord,
            )?);
        }
    }
    nodes.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    debug!(
        targets = targets.len(),
        nodes = nodes.len(),
        ?visibility,
        "schedule nodes built"
    );
    Ok(nodes)
}

/// Can `to` be observed right after `from`?
///
/// Return
/// ----------
/// * `Ok(false)` for two nodes of the same target (the overhead is not evaluated),
///   `Ok(from.end + overhead ≤ to.start)` otherwise.
/// * [`TofoError::SchedulingError`] if the overhead fails or is negative.
pub fn compatible(
    from: &ScheduleNode,
    to: &ScheduleNode,
    overhead: &dyn TransitionOverhead,
    site: &SiteConfig,
) -> Result<bool, TofoError> {
    if from.target_id() == to.target_id() {
        return Ok(false);
    }
    let cost = overhead.overhead(from, to, site).map_err(|err| {
        TofoError::SchedulingError(format!(
            "transition overhead {} -> {} failed: {err}",
            from.key, to.key
        ))
    })?;
    if cost < Duration::ZERO {
        return Err(TofoError::SchedulingError(format!(
            "negative transition overhead {} -> {} ({cost})",
            from.key, to.key
        )));
    }
    Ok(from.end_time + cost <= to.start_time)
}
