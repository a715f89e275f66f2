//! # Ephemeris oracle contract
//!
//! The oracle is the astronomical back-end the event window model relies on: it turns a
//! catalogue position into a resolved coordinate, projects an event ephemeris forward, tells
//! which timestamps satisfy a constraint list, and applies the light-travel-time correction.
//!
//! This crate does **not** implement the astronomy; it only fixes the contract. Real
//! implementations wrap a sky-computation library or service, test suites plug in
//! deterministic fakes.
//!
//! ## Batching
//!
//! [`EphemerisOracle::observable`] and [`EphemerisOracle::light_travel_correct`] take slices of
//! timestamps. The window model gathers every sample of one target into a single call, so
//! implementations should vectorize over the slice rather than loop on scalar evaluations.
//!
//! ## Provided methods
//!
//! - [`EphemerisOracle::resolve_position`] validates the angles into an
//!   [`EquatorialCoord`](crate::coordinates::EquatorialCoord).
//! - [`EphemerisOracle::next_occurrences`] is the linear ephemeris `epoch + n·period`,
//!   the same projection used for primary eclipses regardless of eccentricity.

use hifitime::{Duration, Epoch};

use crate::constants::Degree;
use crate::constraints::Constraint;
use crate::coordinates::EquatorialCoord;
use crate::tofo_errors::TofoError;

pub trait EphemerisOracle {
    /// Resolve a catalogue position into a validated coordinate.
    fn resolve_position(&self, ra: Degree, dec: Degree) -> Result<EquatorialCoord, TofoError> {
        EquatorialCoord::new(ra, dec)
    }

    /// Project an event ephemeris forward.
    ///
    /// Arguments
    /// -----------------
    /// * `epoch`: reference mid-event time.
    /// * `period`: event period, strictly positive.
    /// * `after`: first instant of interest.
    /// * `count`: number of successive occurrences to return.
    ///
    /// Return
    /// ----------
    /// * `count` mid-event times, ascending, the first one at or after `after`.
    fn next_occurrences(
        &self,
        epoch: Epoch,
        period: Duration,
        after: Epoch,
        count: usize,
    ) -> Result<Vec<Epoch>, TofoError> {
        let period_s = period.to_seconds();
        if period_s <= 0.0 {
            return Err(TofoError::OracleError(format!(
                "cannot project an ephemeris with period {period}"
            )));
        }
        let first_cycle = ((after - epoch).to_seconds() / period_s).ceil();
        Ok((0..count)
            .map(|k| epoch + Duration::from_seconds((first_cycle + k as f64) * period_s))
            .collect())
    }

    /// Evaluate the conjunction of `constraints` for a target at each timestamp.
    ///
    /// Return
    /// ----------
    /// * One boolean per entry of `times`, in the same order.
    fn observable(
        &self,
        times: &[Epoch],
        coord: &EquatorialCoord,
        constraints: &[Constraint],
    ) -> Result<Vec<bool>, TofoError>;

    /// Apply the barycentric light-travel-time correction to each timestamp.
    ///
    /// Return
    /// ----------
    /// * One corrected time per entry of `times`, in the same order.
    fn light_travel_correct(
        &self,
        times: &[Epoch],
        coord: &EquatorialCoord,
    ) -> Result<Vec<Epoch>, TofoError>;
}

#[cfg(test)]
mod oracle_test {
    use super::*;

    struct Linear;

    impl EphemerisOracle for Linear {
        fn observable(
            &self,
            times: &[Epoch],
            _coord: &EquatorialCoord,
            constraints: &[Constraint],
        ) -> Result<Vec<bool>, TofoError> {
            Ok(times
                .iter()
                .map(|t| constraints.iter().all(|c| c.check_time(*t).unwrap_or(true)))
                .collect())
        }

        fn light_travel_correct(
            &self,
            times: &[Epoch],
            _coord: &EquatorialCoord,
        ) -> Result<Vec<Epoch>, TofoError> {
            Ok(times.to_vec())
        }
    }

    #[test]
    fn test_next_occurrences_after_epoch() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0);
        let period = Duration::from_seconds(86_400.0);
        let after = Epoch::from_gregorian_utc_hms(2024, 1, 10, 12, 0, 0);

        let mids = Linear.next_occurrences(epoch, period, after, 3).unwrap();
        assert_eq!(
            mids,
            vec![
                Epoch::from_gregorian_utc_hms(2024, 1, 11, 0, 0, 0),
                Epoch::from_gregorian_utc_hms(2024, 1, 12, 0, 0, 0),
                Epoch::from_gregorian_utc_hms(2024, 1, 13, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn test_next_occurrences_before_epoch() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 1, 10, 6, 0, 0);
        let period = Duration::from_seconds(43_200.0);
        let after = Epoch::from_gregorian_utc_hms(2024, 1, 9, 0, 0, 0);

        let mids = Linear.next_occurrences(epoch, period, after, 2).unwrap();
        assert_eq!(mids[0], Epoch::from_gregorian_utc_hms(2024, 1, 9, 6, 0, 0));
        assert_eq!(mids[1], Epoch::from_gregorian_utc_hms(2024, 1, 9, 18, 0, 0));
    }

    #[test]
    fn test_next_occurrences_on_epoch() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 1, 10, 6, 0, 0);
        let period = Duration::from_seconds(3_600.0);
        let mids = Linear.next_occurrences(epoch, period, epoch, 1).unwrap();
        assert_eq!(mids, vec![epoch]);
    }

    #[test]
    fn test_next_occurrences_rejects_bad_period() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 1, 10, 6, 0, 0);
        assert!(Linear
            .next_occurrences(epoch, Duration::ZERO, epoch, 1)
            .is_err());
    }

    #[test]
    fn test_resolve_position_default() {
        let c = Linear.resolve_position(15.0, -20.0).unwrap();
        assert_eq!(c, EquatorialCoord::new(15.0, -20.0).unwrap());
        assert!(Linear.resolve_position(15.0, -95.0).is_err());
    }
}
