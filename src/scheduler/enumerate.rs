//! # Sequence enumeration
//!
//! Exhaustive enumeration of every compatible chain of [`ScheduleNode`]s.
//!
//! ## Algorithm
//!
//! 1. Order the nodes by start time (stable).
//! 2. Build the forward adjacency list: `j` is a successor of `i` when `i < j` and
//!    [`compatible`](crate::scheduler::compatible)`(nodes[i], nodes[j])`. Each pair is evaluated
//!    once, so a costly overhead model is called at most `n(n−1)/2` times.
//! 3. Start a depth-first walk from every node. A successor extends the current chain when
//!    its target is not already in the chain. Each extension yields a chain of length ≥ 2:
//!    - [`EnumerationMode::AllPrefixes`] emits it immediately, then keeps extending, so
//!      every prefix of a long chain is also reported;
//!    - [`EnumerationMode::MaximalOnly`] only emits chains that no successor can extend.
//!
//! Chains are index lists into the sorted array while walking; nodes are copied only into the
//! emitted [`Sequence`]s.
//!
//! ## Complexity
//!
//! Output size is exponential in the worst case (every node compatible with every later
//! one). Callers bound the input with [`SequenceEnumerator::with_max_nodes`].
//!
//! ## Example
//!
//! ```rust
//! use hifitime::Epoch;
//! use tofo::coordinates::EquatorialCoord;
//! use tofo::scheduler::transition::ZeroOverhead;
//! use tofo::scheduler::{NodeKey, ScheduleNode, SequenceEnumerator};
//! use tofo::site::SiteConfig;
//!
//! let coord = EquatorialCoord::new(0.0, 0.0)?;
//! let at = |h, m| Epoch::from_gregorian_utc_hms(2024, 1, 1, h, m, 0);
//! let nodes = vec![
//!     ScheduleNode::new(NodeKey::new("A", 0), at(10, 0), at(10, 30), 1.0, coord)?,
//!     ScheduleNode::new(NodeKey::new("B", 0), at(10, 35), at(11, 0), 1.0, coord)?,
//! ];
//!
//! let site = SiteConfig::builder("demo").build()?;
//! let sequences = SequenceEnumerator::new(&ZeroOverhead, &site).enumerate_sequences(&nodes)?;
//! assert_eq!(sequences.len(), 1);
//! assert_eq!(sequences[0].target_ids(), vec!["A", "B"]);
//! # Ok::<(), tofo::tofo_errors::TofoError>(())
//! ```

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::constants::NodeChain;
use crate::scheduler::sequence::Sequence;
use crate::scheduler::transition::TransitionOverhead;
use crate::scheduler::{compatible, ScheduleNode};
use crate::site::SiteConfig;
use crate::tofo_errors::TofoError;

/// Which chains the enumerator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumerationMode {
    /// Every chain of length ≥ 2, prefixes of longer chains included.
    #[default]
    AllPrefixes,
    /// Only chains that cannot be extended at their tail.
    MaximalOnly,
}

/// Enumerates compatible chains under one overhead model and one site.
pub struct SequenceEnumerator<'a> {
    overhead: &'a dyn TransitionOverhead,
    site: &'a SiteConfig,
    mode: EnumerationMode,
    max_nodes: Option<usize>,
}

impl<'a> SequenceEnumerator<'a> {
    pub fn new(overhead: &'a dyn TransitionOverhead, site: &'a SiteConfig) -> Self {
        SequenceEnumerator {
            overhead,
            site,
            mode: EnumerationMode::default(),
            max_nodes: None,
        }
    }

    pub fn with_mode(mut self, mode: EnumerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Refuse inputs larger than `max_nodes`.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn mode(&self) -> EnumerationMode {
        self.mode
    }

    /// Enumerate every compatible chain of `nodes`.
    ///
    /// Arguments
    /// -----------------
    /// * `nodes`: candidate observations, in any order (they are ordered by start time).
    ///
    /// Return
    /// ----------
    /// * The sequences in depth-first order: grouped by head node (earliest first), each
    ///   group listing a chain before its extensions. Empty input gives an empty output.
    /// * [`TofoError::SchedulingError`] when the input exceeds the node cap, or an overhead
    ///   evaluation fails or is negative.
    pub fn enumerate_sequences(&self, nodes: &[ScheduleNode]) -> Result<Vec<Sequence>, TofoError> {
        if let Some(max) = self.max_nodes {
            if nodes.len() > max {
                return Err(TofoError::SchedulingError(format!(
                    "{} nodes exceed the enumeration limit of {max}",
                    nodes.len()
                )));
            }
        }

        let mut sorted: Vec<&ScheduleNode> = nodes.iter().collect();
        sorted.sort_by(|a, b| {
            a.start_time()
                .partial_cmp(&b.start_time())
                .unwrap_or(Ordering::Equal)
        });

        let successors = self.successors(&sorted)?;
        trace!(
            edges = successors.iter().map(Vec::len).sum::<usize>(),
            "compatibility graph built"
        );

        let mut out = Vec::new();
        let mut chain = NodeChain::new();
        for head in 0..sorted.len() {
            chain.push(head);
            self.extend(&sorted, &successors, &mut chain, &mut out);
            chain.pop();
        }

        debug!(
            nodes = nodes.len(),
            sequences = out.len(),
            mode = ?self.mode,
            "sequences enumerated"
        );
        Ok(out)
    }

    fn successors(&self, sorted: &[&ScheduleNode]) -> Result<Vec<Vec<usize>>, TofoError> {
        let mut successors = vec![Vec::new(); sorted.len()];
        for (i, from) in sorted.iter().enumerate() {
            for (j, to) in sorted.iter().enumerate().skip(i + 1) {
                if compatible(from, to, self.overhead, self.site)? {
                    successors[i].push(j);
                }
            }
        }
        Ok(successors)
    }

    fn extend(
        &self,
        sorted: &[&ScheduleNode],
        successors: &[Vec<usize>],
        chain: &mut NodeChain,
        out: &mut Vec<Sequence>,
    ) {
        let Some(&tail) = chain.last() else {
            return;
        };
        let mut extended = false;
        for &next in &successors[tail] {
            let target = sorted[next].target_id();
            if chain.iter().any(|&i| sorted[i].target_id() == target) {
                continue;
            }
            extended = true;
            chain.push(next);
            if self.mode == EnumerationMode::AllPrefixes {
                out.push(materialize(sorted, chain));
            }
            self.extend(sorted, successors, chain, out);
            chain.pop();
        }
        if !extended && self.mode == EnumerationMode::MaximalOnly && chain.len() >= 2 {
            out.push(materialize(sorted, chain));
        }
    }
}

fn materialize(sorted: &[&ScheduleNode], chain: &NodeChain) -> Sequence {
    Sequence::from_nodes(chain.iter().map(|&i| sorted[i].clone()).collect())
}
