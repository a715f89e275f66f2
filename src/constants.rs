//! # Constants and type definitions for tofo
//!
//! This module centralizes the **conversion factors**, **site defaults** and **common type
//! aliases** used throughout the `tofo` crate.
//!
//! ## Overview
//!
//! - Unit conversions (days ↔ seconds, hours ↔ degrees of right ascension)
//! - Defaults applied when an event or a site leaves a value unspecified
//! - Core type aliases and identifiers shared by the window model and the scheduler
//!
//! These definitions are used by every module, most notably [`crate::targets`] and
//! [`crate::scheduler`].

use hifitime::Duration;
use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Degrees of right ascension per hour angle
pub const DEG_PER_HOUR: f64 = 15.0;

// -------------------------------------------------------------------------------------------------
// Defaults
// -------------------------------------------------------------------------------------------------

/// Duration substituted when an event has no known duration (seconds).
///
/// Keeps `ingress < mid < egress` strict for events catalogued without a duration.
pub const PLACEHOLDER_EVENT_DURATION_S: f64 = 60.0;

/// Flat horizon used when a site does not provide one: `(azimuth°, altitude°)` pairs.
pub const FLAT_HORIZON: [(Degree, Degree); 5] = [
    (0.0, 0.0),
    (90.0, 0.0),
    (180.0, 0.0),
    (270.0, 0.0),
    (360.0, 0.0),
];

/// Placeholder event duration as a [`Duration`].
pub fn placeholder_event_duration() -> Duration {
    Duration::from_seconds(PLACEHOLDER_EVENT_DURATION_S)
}

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in meters
pub type Meter = f64;
/// Julian Date (days)
pub type JD = f64;

/// Identifier of a target inside one scheduling session.
///
/// Targets are identified by their catalogue name; two occurrences of the same
/// object share a `TargetId` and can never be scheduled in the same sequence.
pub type TargetId = String;

/// Index of an occurrence inside the observable-occurrence list of its target.
pub type OccurrenceIndex = usize;

/// Chain of indices into the sorted node array, inline for the typical short chains.
pub type NodeChain = SmallVec<[usize; 8]>;
