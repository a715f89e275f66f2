//! # Observability constraints
//!
//! Constraints are the predicates an [`EphemerisOracle`](crate::oracle::EphemerisOracle)
//! evaluates when deciding whether a target can be observed at a given instant. The event
//! window model never inspects them: it only prepends a [`Constraint::TimeWindow`] matching the
//! observation bracket and forwards the site list untouched.
//!
//! ## Variants
//!
//! - [`Constraint::TimeWindow`] – the instant must lie inside `[min, max]`.
//! - [`Constraint::AtNight`] – the Sun must be below the [`Twilight`] limit.
//! - [`Constraint::Horizon`] – the target must be above the local [`HorizonProfile`].
//!
//! The list is a conjunction: a timestamp is observable only when every constraint holds.

pub mod horizon;

use std::{fmt, str::FromStr, sync::Arc};

use hifitime::Epoch;

pub use crate::constraints::horizon::HorizonProfile;
use crate::constants::Degree;
use crate::tofo_errors::TofoError;

/// Twilight definitions, by Sun altitude below the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Twilight {
    Civil,
    Nautical,
    Astronomical,
}

impl Twilight {
    /// Maximum altitude of the Sun (degrees) for the sky to count as dark.
    pub fn sun_altitude_limit(&self) -> Degree {
        match self {
            Twilight::Civil => -6.0,
            Twilight::Nautical => -12.0,
            Twilight::Astronomical => -18.0,
        }
    }
}

impl FromStr for Twilight {
    type Err = TofoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "civil" => Ok(Twilight::Civil),
            "nautical" => Ok(Twilight::Nautical),
            "astronomical" => Ok(Twilight::Astronomical),
            other => Err(TofoError::InvalidSiteConfig(format!(
                "unrecognised twilight name: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Twilight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Twilight::Civil => "civil",
            Twilight::Nautical => "nautical",
            Twilight::Astronomical => "astronomical",
        };
        write!(f, "{name}")
    }
}

/// One observability predicate, evaluated by the oracle.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Instant must be within `[min, max]`.
    TimeWindow { min: Epoch, max: Epoch },
    /// Sun must be below the twilight limit.
    AtNight(Twilight),
    /// Target altitude must exceed the local horizon at its azimuth.
    Horizon(Arc<HorizonProfile>),
}

impl Constraint {
    /// Time constraint restricting observability to `[min, max]`.
    pub fn time_window(min: Epoch, max: Epoch) -> Self {
        Constraint::TimeWindow { min, max }
    }

    /// Evaluate a [`Constraint::TimeWindow`] without any sky computation.
    ///
    /// Return
    /// ----------
    /// * `Some(bool)` for time windows, `None` for constraints that need the oracle's
    ///   astronomy (twilight, horizon).
    pub fn check_time(&self, t: Epoch) -> Option<bool> {
        match self {
            Constraint::TimeWindow { min, max } => Some(*min <= t && t <= *max),
            _ => None,
        }
    }
}
