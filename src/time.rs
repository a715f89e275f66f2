use hifitime::{Duration, Epoch};

use crate::constants::{JD, SECONDS_PER_DAY};
use crate::tofo_errors::TofoError;

/// Build an epoch from a Julian Date expressed in the TDB time scale.
///
/// Catalogue epochs for transits and eclipses are published as BJD/JD in TDB.
///
/// Argument
/// --------
/// * `jd`: Julian date (days, TDB)
///
/// Return
/// ------
/// * the corresponding [`Epoch`]
pub fn epoch_from_jd_tdb(jd: JD) -> Epoch {
    Epoch::from_jde_tdb(jd)
}

/// Transformation from a period in days to a [`Duration`]
pub fn period_from_days(days: f64) -> Duration {
    Duration::from_seconds(days * SECONDS_PER_DAY)
}

/// Half of a duration, as used for ingress/egress offsets around mid-event.
pub fn half(duration: Duration) -> Duration {
    Duration::from_seconds(duration.to_seconds() / 2.0)
}

/// Time span during which a target may be observed: `[start, start + duration]`.
///
/// The bracket is built from a start time and a non-negative duration, so
/// `end() >= start()` holds for every value of this type. A zero-length bracket can be
/// represented but is rejected by occurrence computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationBracket {
    start: Epoch,
    duration: Duration,
}

impl ObservationBracket {
    /// Create a bracket from a start time and a duration.
    ///
    /// Arguments
    /// -----------------
    /// * `start`: first instant of the bracket.
    /// * `duration`: length of the bracket, must not be negative.
    ///
    /// Return
    /// ----------
    /// * The bracket, or [`TofoError::InvalidBracket`] for a negative duration.
    pub fn new(start: Epoch, duration: Duration) -> Result<Self, TofoError> {
        if duration < Duration::ZERO {
            return Err(TofoError::InvalidBracket {
                start: start.to_string(),
                end: (start + duration).to_string(),
            });
        }
        Ok(ObservationBracket { start, duration })
    }

    /// Create a bracket from its two bounds.
    ///
    /// Return
    /// ----------
    /// * The bracket, or [`TofoError::InvalidBracket`] if `end < start`.
    pub fn from_bounds(start: Epoch, end: Epoch) -> Result<Self, TofoError> {
        Self::new(start, end - start)
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.start + self.duration
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Midpoint of the bracket, used as the single occurrence of non-periodic targets.
    pub fn midpoint(&self) -> Epoch {
        self.start + half(self.duration)
    }

    /// Whether `epoch` lies in the closed interval `[start, end]`.
    pub fn contains(&self, epoch: Epoch) -> bool {
        self.start <= epoch && epoch <= self.end()
    }

    /// Check that the bracket has a strictly positive length.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` or [`TofoError::InvalidBracket`] when `end <= start`.
    pub fn ensure_non_empty(&self) -> Result<(), TofoError> {
        if self.duration <= Duration::ZERO {
            return Err(TofoError::InvalidBracket {
                start: self.start.to_string(),
                end: self.end().to_string(),
            });
        }
        Ok(())
    }
}
