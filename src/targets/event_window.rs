//! # Event window model
//!
//! Derives, for each [`Target`], the event occurrences whose mid time falls inside the
//! observation bracket and flags each of them as fully and/or partially observable.
//!
//! ## Algorithm
//!
//! For one target with bracket `[start, end]` of length `L`:
//!
//! 1. **Mid times**
//!    - periodic target: ask the oracle for `⌈L / P⌉` occurrences at or after `start`, in one
//!      batch;
//!    - fixed target: the bracket midpoint.
//! 2. **Bracket filter**: keep the mids in the closed interval `[start, end]`.
//! 3. **Windows**: build the five-point [`EventTimes`] with the site margins.
//! 4. **Observability**: evaluate every sample of every retained window in a single
//!    [`EphemerisOracle::observable`] call, against `TimeWindow(start, end)` followed by the
//!    site constraints. A window is *fully* observable when all its samples pass and
//!    *partially* observable when at least one does.
//! 5. **Correction**: light-travel-time correct all window points in a single
//!    [`EphemerisOracle::light_travel_correct`] call.
//!
//! The result is stored inside the target. Recomputing with unchanged inputs yields the same
//! lists.
//!
//! ## Failures
//!
//! - No bracket: nothing to compute, the lists stay empty.
//! - Empty bracket (`end <= start`): [`TofoError::InvalidBracket`].
//! - No coordinate: the target is unresolved, logged and left without occurrences.
//! - Non-positive period: [`TofoError::InvalidPeriod`].
//! - Oracle answers of the wrong length: [`TofoError::OracleError`].
//!
//! In every case the previous lists are cleared first, so a failed recompute never leaves stale
//! occurrences behind.

use hifitime::{Duration, Epoch};
use tracing::{debug, warn};

use crate::constraints::Constraint;
use crate::oracle::EphemerisOracle;
use crate::site::SiteConfig;
use crate::targets::occurrence::{EventTimes, Occurrence};
use crate::targets::{EventWindows, Target, Visibility};
use crate::time::ObservationBracket;
use crate::tofo_errors::TofoError;

/// Occurrence computation bound to one oracle and one site.
pub struct EventWindowModel<'a, O: EphemerisOracle + ?Sized> {
    oracle: &'a O,
    site: &'a SiteConfig,
}

/// Outcome of [`EventWindowModel::targets_with_events`].
#[derive(Debug, Default)]
pub struct TargetSelection {
    /// Targets holding at least one occurrence of the requested visibility.
    pub selected: Vec<Target>,
    /// Targets whose computation failed, with the reason.
    pub failures: Vec<(Target, TofoError)>,
}

impl<'a, O: EphemerisOracle + ?Sized> EventWindowModel<'a, O> {
    pub fn new(oracle: &'a O, site: &'a SiteConfig) -> Self {
        EventWindowModel { oracle, site }
    }

    pub fn site(&self) -> &SiteConfig {
        self.site
    }

    /// Recompute and store the occurrences of `target`.
    ///
    /// Arguments
    /// -----------------
    /// * `target`: the target to update in place.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` once both occurrence lists are stored (possibly empty), or the first error
    ///   met, in which case both lists are left empty.
    ///
    /// See also
    /// ------------
    /// * [`Target::occurrences`] – Read back the stored lists.
    pub fn recompute_occurrences(&self, target: &mut Target) -> Result<(), TofoError> {
        target.windows = EventWindows::default();

        let Some(bracket) = target.bracket else {
            return Ok(());
        };
        bracket.ensure_non_empty()?;

        let Some(coord) = target.coord else {
            warn!(
                target_id = %target.name,
                "{}",
                TofoError::UnresolvedTarget(target.name.clone())
            );
            return Ok(());
        };

        let mids = self.mid_times(target, &bracket)?;
        let windows: Vec<EventTimes> = mids
            .into_iter()
            .filter(|mid| bracket.contains(*mid))
            .map(|mid| {
                EventTimes::around(
                    mid,
                    target.duration,
                    self.site.pre_margin(),
                    self.site.post_margin(),
                )
            })
            .collect();

        if windows.is_empty() {
            debug!(target_id = %target.name, "no occurrence inside the bracket");
            return Ok(());
        }

        let extra = self.site.extra_samples();
        let per_window = 5 + extra;
        let samples: Vec<Epoch> = windows.iter().flat_map(|w| w.samples(extra)).collect();

        let mut constraints = Vec::with_capacity(1 + self.site.constraints().len());
        constraints.push(Constraint::time_window(bracket.start(), bracket.end()));
        constraints.extend(self.site.constraints().iter().cloned());

        let flags = self.oracle.observable(&samples, &coord, &constraints)?;
        check_len("observable", samples.len(), flags.len())?;

        let points: Vec<Epoch> = windows.iter().flat_map(|w| w.as_array()).collect();
        let corrected = self.oracle.light_travel_correct(&points, &coord)?;
        check_len("light_travel_correct", points.len(), corrected.len())?;

        let mut fully = Vec::new();
        let mut partially = Vec::new();
        for (index, ((times, window_flags), corrected_points)) in windows
            .iter()
            .zip(flags.chunks(per_window))
            .zip(corrected.chunks_exact(5))
            .enumerate()
        {
            let full = window_flags.iter().all(|ok| *ok);
            let partial = window_flags.iter().any(|ok| *ok);
            let corrected_times = EventTimes::from_array([
                corrected_points[0],
                corrected_points[1],
                corrected_points[2],
                corrected_points[3],
                corrected_points[4],
            ]);
            let occurrence = Occurrence::new(index, *times, corrected_times, full, partial);
            if full {
                fully.push(occurrence.clone());
            }
            if partial {
                partially.push(occurrence);
            }
        }

        debug!(
            target_id = %target.name,
            in_bracket = windows.len(),
            fully = fully.len(),
            partially = partially.len(),
            "occurrences recomputed"
        );
        target.windows = EventWindows { fully, partially };
        Ok(())
    }

    /// Recompute every target, isolating failures.
    ///
    /// Return
    /// ----------
    /// * One result per target, in input order.
    pub fn recompute_all(&self, targets: &mut [Target]) -> Vec<Result<(), TofoError>> {
        targets
            .iter_mut()
            .map(|target| {
                let res = self.recompute_occurrences(target);
                if let Err(err) = &res {
                    warn!(target_id = %target.name, error = %err, "window computation failed");
                }
                res
            })
            .collect()
    }

    /// Apply one bracket to many targets and keep those that have events.
    ///
    /// Arguments
    /// -----------------
    /// * `targets`: candidate targets, consumed.
    /// * `bracket`: observation bracket assigned to every target.
    /// * `visibility`: which occurrence list must be non-empty for a target to be kept.
    ///
    /// Return
    /// ----------
    /// * The kept targets (input order) and the failed ones with their error. Targets that
    ///   computed fine but have no matching event are dropped.
    pub fn targets_with_events(
        &self,
        targets: Vec<Target>,
        bracket: ObservationBracket,
        visibility: Visibility,
    ) -> TargetSelection {
        let mut selection = TargetSelection::default();
        for mut target in targets {
            target.bracket = Some(bracket);
            match self.recompute_occurrences(&mut target) {
                Ok(()) if target.has_events(visibility) => selection.selected.push(target),
                Ok(()) => {}
                Err(err) => {
                    warn!(target_id = %target.name, error = %err, "window computation failed");
                    selection.failures.push((target, err));
                }
            }
        }
        debug!(
            selected = selection.selected.len(),
            failed = selection.failures.len(),
            "targets with events"
        );
        selection
    }

    fn mid_times(
        &self,
        target: &Target,
        bracket: &ObservationBracket,
    ) -> Result<Vec<Epoch>, TofoError> {
        match (target.epoch, target.period) {
            (Some(epoch), Some(period)) => {
                if period <= Duration::ZERO {
                    return Err(TofoError::InvalidPeriod(target.name.clone()));
                }
                let count = (bracket.duration().to_seconds() / period.to_seconds()).ceil() as usize;
                let mut mids = self
                    .oracle
                    .next_occurrences(epoch, period, bracket.start(), count)?;
                mids.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                Ok(mids)
            }
            _ => Ok(vec![bracket.midpoint()]),
        }
    }
}

fn check_len(call: &str, expected: usize, got: usize) -> Result<(), TofoError> {
    if expected != got {
        return Err(TofoError::OracleError(format!(
            "{call} returned {got} values for {expected} timestamps"
        )));
    }
    Ok(())
}
