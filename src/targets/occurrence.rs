//! # Event occurrences
//!
//! One [`Occurrence`] is a single, time-fixed instance of a transit or eclipse. Its timing is a
//! five-point tuple ([`EventTimes`]):
//!
//! ```text
//!   window_start ── pre_margin ── ingress ── d/2 ── mid ── d/2 ── egress ── post_margin ── window_end
//! ```
//!
//! where `d` is the event duration (or a short placeholder when the catalogue has none). The
//! five instants are strictly increasing as long as the margins and the duration are positive.
//!
//! Each occurrence carries two timing tuples: the geometric one, used by the scheduler as the
//! authoritative interval, and a light-travel-time corrected copy kept for precise display.

use hifitime::{Duration, Epoch};

use crate::constants::{placeholder_event_duration, OccurrenceIndex};
use crate::time::half;

/// Five-point timing of one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTimes {
    pub window_start: Epoch,
    pub ingress: Epoch,
    pub mid: Epoch,
    pub egress: Epoch,
    pub window_end: Epoch,
}

impl EventTimes {
    /// Build the five-point tuple around a mid-event time.
    ///
    /// Arguments
    /// -----------------
    /// * `mid`: mid-event time.
    /// * `duration`: event duration, `None` or non-positive values fall back to the placeholder.
    /// * `pre_margin`: padding before ingress.
    /// * `post_margin`: padding after egress.
    ///
    /// Return
    /// ----------
    /// * `(mid − d/2 − pre, mid − d/2, mid, mid + d/2, mid + d/2 + post)`
    pub fn around(
        mid: Epoch,
        duration: Option<Duration>,
        pre_margin: Duration,
        post_margin: Duration,
    ) -> Self {
        let duration = duration
            .filter(|d| *d > Duration::ZERO)
            .unwrap_or_else(placeholder_event_duration);
        let half_duration = half(duration);

        let ingress = mid - half_duration;
        let egress = mid + half_duration;
        EventTimes {
            window_start: ingress - pre_margin,
            ingress,
            mid,
            egress,
            window_end: egress + post_margin,
        }
    }

    pub fn as_array(&self) -> [Epoch; 5] {
        [
            self.window_start,
            self.ingress,
            self.mid,
            self.egress,
            self.window_end,
        ]
    }

    pub fn from_array(points: [Epoch; 5]) -> Self {
        let [window_start, ingress, mid, egress, window_end] = points;
        EventTimes {
            window_start,
            ingress,
            mid,
            egress,
            window_end,
        }
    }

    pub fn is_strictly_increasing(&self) -> bool {
        self.as_array().windows(2).all(|w| w[0] < w[1])
    }

    /// Full padded length of the window.
    pub fn window_duration(&self) -> Duration {
        self.window_end - self.window_start
    }

    /// Timestamps at which observability is evaluated.
    ///
    /// The five characteristic points, plus `extra` instants evenly spaced strictly inside
    /// `(window_start, window_end)`, returned in ascending order.
    pub fn samples(&self, extra: usize) -> Vec<Epoch> {
        let mut samples = self.as_array().to_vec();
        if extra > 0 {
            let step = self.window_duration().to_seconds() / (extra + 1) as f64;
            samples.extend(
                (1..=extra).map(|k| self.window_start + Duration::from_seconds(step * k as f64)),
            );
            samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        }
        samples
    }
}

/// One observable event instance of a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    index: OccurrenceIndex,
    times: EventTimes,
    corrected: EventTimes,
    fully_observable: bool,
    partially_observable: bool,
}

impl Occurrence {
    pub(crate) fn new(
        index: OccurrenceIndex,
        times: EventTimes,
        corrected: EventTimes,
        fully_observable: bool,
        partially_observable: bool,
    ) -> Self {
        Occurrence {
            index,
            times,
            corrected,
            fully_observable,
            partially_observable,
        }
    }

    /// Position of this occurrence among all in-bracket occurrences of its target.
    pub fn index(&self) -> OccurrenceIndex {
        self.index
    }

    /// Geometric timing, the interval the scheduler works with.
    pub fn times(&self) -> &EventTimes {
        &self.times
    }

    /// Light-travel-time corrected timing.
    pub fn corrected_times(&self) -> &EventTimes {
        &self.corrected
    }

    pub fn is_fully_observable(&self) -> bool {
        self.fully_observable
    }

    pub fn is_partially_observable(&self) -> bool {
        self.partially_observable
    }
}

#[cfg(test)]
mod occurrence_test {
    use super::*;
    use approx::assert_relative_eq;

    fn mid() -> Epoch {
        Epoch::from_gregorian_utc_hms(2024, 2, 1, 22, 0, 0)
    }

    #[test]
    fn test_around_with_duration() {
        let t = EventTimes::around(
            mid(),
            Some(Duration::from_seconds(7200.0)),
            Duration::from_seconds(1800.0),
            Duration::from_seconds(900.0),
        );
        assert_eq!(t.ingress, Epoch::from_gregorian_utc_hms(2024, 2, 1, 21, 0, 0));
        assert_eq!(t.egress, Epoch::from_gregorian_utc_hms(2024, 2, 1, 23, 0, 0));
        assert_eq!(
            t.window_start,
            Epoch::from_gregorian_utc_hms(2024, 2, 1, 20, 30, 0)
        );
        assert_eq!(
            t.window_end,
            Epoch::from_gregorian_utc_hms(2024, 2, 1, 23, 15, 0)
        );
        assert!(t.is_strictly_increasing());
    }

    #[test]
    fn test_around_without_duration() {
        let margin = Duration::from_seconds(600.0);
        for duration in [None, Some(Duration::ZERO), Some(Duration::from_seconds(-10.0))] {
            let t = EventTimes::around(mid(), duration, margin, margin);
            assert!(t.is_strictly_increasing());
            assert_relative_eq!((t.egress - t.ingress).to_seconds(), 60.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_samples() {
        let t = EventTimes::around(
            mid(),
            Some(Duration::from_seconds(3600.0)),
            Duration::from_seconds(1800.0),
            Duration::from_seconds(1800.0),
        );
        assert_eq!(t.samples(0), t.as_array().to_vec());

        let dense = t.samples(3);
        assert_eq!(dense.len(), 8);
        assert!(dense.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dense.first(), Some(&t.window_start));
        assert_eq!(dense.last(), Some(&t.window_end));
    }
}
