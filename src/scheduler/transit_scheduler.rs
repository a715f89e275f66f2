//! # Transit scheduler façade
//!
//! [`TransitScheduler`] runs the whole pipeline for one session:
//!
//! 1. assign the session bracket to every target that has none,
//! 2. compute occurrences through the [`EventWindowModel`], isolating per-target failures,
//! 3. flatten the requested occurrence list into [`ScheduleNode`]s,
//! 4. enumerate every compatible [`Sequence`],
//!
//! and returns a [`ScheduleReport`] holding every intermediate product. The transition model
//! is the site's configured one unless another is supplied with
//! [`TransitScheduler::with_overhead`].
//!
//! ## Example
//!
//! ```rust,ignore
//! let scheduler = TransitScheduler::new(&oracle, &site).with_visibility(Visibility::Partial);
//! let report = scheduler.run(targets, session)?;
//! for sequence in report.best_sequences(5) {
//!     println!("{:?}", sequence.target_ids());
//! }
//! ```

use tracing::info;

use crate::oracle::EphemerisOracle;
use crate::scheduler::enumerate::{EnumerationMode, SequenceEnumerator};
use crate::scheduler::selection::{RankingPolicy, SequenceRanker};
use crate::scheduler::sequence::Sequence;
use crate::scheduler::transition::TransitionOverhead;
use crate::scheduler::{build_nodes, ScheduleNode};
use crate::site::SiteConfig;
use crate::targets::event_window::EventWindowModel;
use crate::targets::{Target, Visibility};
use crate::time::ObservationBracket;
use crate::tofo_errors::TofoError;

pub struct TransitScheduler<'a, O: EphemerisOracle + ?Sized> {
    model: EventWindowModel<'a, O>,
    overhead: Option<&'a dyn TransitionOverhead>,
    visibility: Visibility,
    mode: EnumerationMode,
    max_nodes: Option<usize>,
}

/// Everything produced by one [`TransitScheduler::run`].
#[derive(Debug)]
pub struct ScheduleReport {
    /// Targets whose occurrences were computed, in input order.
    pub targets: Vec<Target>,
    /// Targets whose occurrence computation failed.
    pub failures: Vec<(Target, TofoError)>,
    /// Nodes, sorted by start time.
    pub nodes: Vec<ScheduleNode>,
    /// Every compatible sequence, in enumeration order.
    pub sequences: Vec<Sequence>,
}

impl ScheduleReport {
    /// The `limit` best sequences: most observations first, then highest total weight.
    pub fn best_sequences(&self, limit: usize) -> Vec<&Sequence> {
        RankingPolicy::MostObservationsThenWeight.top(&self.sequences, limit)
    }

    /// Rank the sequences with any policy.
    pub fn ranked(&self, ranker: &dyn SequenceRanker) -> Vec<&Sequence> {
        ranker.rank(&self.sequences)
    }
}

impl<'a, O: EphemerisOracle + ?Sized> TransitScheduler<'a, O> {
    pub fn new(oracle: &'a O, site: &'a SiteConfig) -> Self {
        TransitScheduler {
            model: EventWindowModel::new(oracle, site),
            overhead: None,
            visibility: Visibility::Full,
            mode: EnumerationMode::AllPrefixes,
            max_nodes: None,
        }
    }

    /// Use `overhead` instead of the site transition model.
    pub fn with_overhead(mut self, overhead: &'a dyn TransitionOverhead) -> Self {
        self.overhead = Some(overhead);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_mode(mut self, mode: EnumerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn model(&self) -> &EventWindowModel<'a, O> {
        &self.model
    }

    /// Schedule `targets` inside `session`.
    ///
    /// Arguments
    /// -----------------
    /// * `targets`: candidate targets, consumed. A target with its own bracket keeps it.
    /// * `session`: bracket given to the targets that have none.
    ///
    /// Return
    /// ----------
    /// * The [`ScheduleReport`]. Failing targets are reported in it, not as an error.
    /// * [`TofoError::SchedulingError`] when node building or enumeration fails.
    pub fn run(
        &self,
        targets: Vec<Target>,
        session: ObservationBracket,
    ) -> Result<ScheduleReport, TofoError> {
        let mut targets: Vec<Target> = targets
            .into_iter()
            .map(|t| match t.bracket() {
                Some(_) => t,
                None => t.with_bracket(session),
            })
            .collect();

        let results = self.model.recompute_all(&mut targets);
        let mut computed = Vec::with_capacity(targets.len());
        let mut failures = Vec::new();
        for (target, result) in targets.into_iter().zip(results) {
            match result {
                Ok(()) => computed.push(target),
                Err(err) => failures.push((target, err)),
            }
        }

        let nodes = build_nodes(&computed, self.visibility)?;

        let site = self.model.site();
        let overhead: &dyn TransitionOverhead = match self.overhead {
            Some(overhead) => overhead,
            None => site.transition(),
        };
        let mut enumerator = SequenceEnumerator::new(overhead, site).with_mode(self.mode);
        if let Some(max) = self.max_nodes {
            enumerator = enumerator.with_max_nodes(max);
        }
        let sequences = enumerator.enumerate_sequences(&nodes)?;

        info!(
            site = site.name(),
            targets = computed.len(),
            failed = failures.len(),
            nodes = nodes.len(),
            sequences = sequences.len(),
            "schedule computed"
        );

        Ok(ScheduleReport {
            targets: computed,
            failures,
            nodes,
            sequences,
        })
    }
}
