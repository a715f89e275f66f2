//! # Targets and their event windows
//!
//! A [`Target`] is a named sky object (a variable star, an exoplanet host) with an optional
//! periodic-event ephemeris and an observation bracket. From these the
//! [`EventWindowModel`](crate::targets::event_window::EventWindowModel) derives the list of
//! [`Occurrence`]s that fall inside the bracket, each tagged as fully and/or partially
//! observable from the site.
//!
//! ## Periodic and fixed targets
//!
//! - **Periodic**: both `epoch` and `period` are set. Occurrences are `epoch + n·period`.
//! - **Fixed**: no ephemeris. A single occurrence is synthesized at the bracket midpoint.
//!
//! ## Caching
//!
//! Occurrences are derived data cached inside the target. Builder-style `with_*` methods only
//! set fields; the `set_*` mutators store the new value **and** recompute immediately through
//! the model they are given. Callers changing several parameters at once should use the
//! builders and recompute once.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut target = Target::new("WASP-12 b")
//!     .with_position("06 30 32.79", "+29 40 20.3")?
//!     .with_event(epoch_from_jd_tdb(2_457_010.512_72), period_from_days(1.091_419_1))
//!     .with_duration(Duration::from_seconds(3.0 * 3600.0))
//!     .with_bracket(bracket);
//! model.recompute_occurrences(&mut target)?;
//! for occ in target.occurrences(Visibility::Full) { /* ... */ }
//! ```

pub mod event_window;
pub mod occurrence;

use hifitime::{Duration, Epoch};

pub use crate::targets::occurrence::{EventTimes, Occurrence};
use crate::constants::{Degree, TargetId};
use crate::coordinates::EquatorialCoord;
use crate::oracle::EphemerisOracle;
use crate::targets::event_window::EventWindowModel;
use crate::time::ObservationBracket;
use crate::tofo_errors::TofoError;

/// Which occurrence list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Every sampled instant of the window satisfies the constraints.
    #[default]
    Full,
    /// At least one sampled instant satisfies the constraints.
    Partial,
}

/// Observable occurrences of one target, in ascending time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EventWindows {
    pub(crate) fully: Vec<Occurrence>,
    pub(crate) partially: Vec<Occurrence>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: TargetId,
    star_name: String,
    coord: Option<EquatorialCoord>,
    epoch: Option<Epoch>,
    period: Option<Duration>,
    duration: Option<Duration>,
    eccentricity: f64,
    argument_of_periapsis: Degree,
    priority: f64,
    is_exoplanet: bool,
    bracket: Option<ObservationBracket>,
    pub(crate) windows: EventWindows,
}

impl Target {
    /// A new target with no position, no ephemeris and no bracket.
    ///
    /// The star name defaults to the target name and the priority weight to `1.0`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Target {
            star_name: name.clone(),
            name,
            coord: None,
            epoch: None,
            period: None,
            duration: None,
            eccentricity: 0.0,
            argument_of_periapsis: 0.0,
            priority: 1.0,
            is_exoplanet: false,
            bracket: None,
            windows: EventWindows::default(),
        }
    }

    /// Host star name, when it differs from the target name. An empty name resets it.
    pub fn with_star_name(mut self, star_name: impl Into<String>) -> Self {
        let star_name = star_name.into();
        self.star_name = if star_name.is_empty() {
            self.name.clone()
        } else {
            star_name
        };
        self
    }

    pub fn with_coord(mut self, coord: EquatorialCoord) -> Self {
        self.coord = Some(coord);
        self.invalidate_windows();
        self
    }

    /// Set the position from sexagesimal RA/Dec strings.
    pub fn with_position(self, ra: &str, dec: &str) -> Result<Self, TofoError> {
        Ok(self.with_coord(EquatorialCoord::from_sexagesimal(ra, dec)?))
    }

    /// Set the periodic-event ephemeris: reference mid-event epoch and period.
    pub fn with_event(mut self, epoch: Epoch, period: Duration) -> Self {
        self.epoch = Some(epoch);
        self.period = Some(period);
        self.invalidate_windows();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self.invalidate_windows();
        self
    }

    /// Orbit shape; both default to zero (circular orbit).
    pub fn with_orbit(mut self, eccentricity: f64, argument_of_periapsis: Degree) -> Self {
        self.eccentricity = eccentricity;
        self.argument_of_periapsis = argument_of_periapsis;
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn as_exoplanet(mut self, is_exoplanet: bool) -> Self {
        self.is_exoplanet = is_exoplanet;
        self
    }

    /// Builders touching the timing drop the cached occurrences; recompute them with an
    /// [`EventWindowModel`] or use the `set_*` methods.
    pub fn with_bracket(mut self, bracket: ObservationBracket) -> Self {
        self.bracket = Some(bracket);
        self.invalidate_windows();
        self
    }

    fn invalidate_windows(&mut self) {
        self.windows = EventWindows::default();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn star_name(&self) -> &str {
        &self.star_name
    }

    pub fn coord(&self) -> Option<EquatorialCoord> {
        self.coord
    }

    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn argument_of_periapsis(&self) -> Degree {
        self.argument_of_periapsis
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn is_exoplanet(&self) -> bool {
        self.is_exoplanet
    }

    pub fn bracket(&self) -> Option<ObservationBracket> {
        self.bracket
    }

    /// A target is periodic when both its epoch and its period are known.
    pub fn is_periodic(&self) -> bool {
        self.epoch.is_some() && self.period.is_some()
    }

    /// Cached occurrences for the requested visibility, ascending in time.
    pub fn occurrences(&self, visibility: Visibility) -> &[Occurrence] {
        match visibility {
            Visibility::Full => &self.windows.fully,
            Visibility::Partial => &self.windows.partially,
        }
    }

    /// Does this target have any occurrence with the requested visibility?
    pub fn has_events(&self, visibility: Visibility) -> bool {
        !self.occurrences(visibility).is_empty()
    }

    /// First occurrence with the requested visibility, if any.
    pub fn event_details(&self, visibility: Visibility) -> Option<&Occurrence> {
        self.occurrences(visibility).first()
    }

    pub fn set_epoch<O>(
        &mut self,
        epoch: Option<Epoch>,
        model: &EventWindowModel<'_, O>,
    ) -> Result<(), TofoError>
    where
        O: EphemerisOracle + ?Sized,
    {
        self.epoch = epoch;
        model.recompute_occurrences(self)
    }

    pub fn set_period<O>(
        &mut self,
        period: Option<Duration>,
        model: &EventWindowModel<'_, O>,
    ) -> Result<(), TofoError>
    where
        O: EphemerisOracle + ?Sized,
    {
        self.period = period;
        model.recompute_occurrences(self)
    }

    pub fn set_duration<O>(
        &mut self,
        duration: Option<Duration>,
        model: &EventWindowModel<'_, O>,
    ) -> Result<(), TofoError>
    where
        O: EphemerisOracle + ?Sized,
    {
        self.duration = duration;
        model.recompute_occurrences(self)
    }

    pub fn set_bracket<O>(
        &mut self,
        bracket: Option<ObservationBracket>,
        model: &EventWindowModel<'_, O>,
    ) -> Result<(), TofoError>
    where
        O: EphemerisOracle + ?Sized,
    {
        self.bracket = bracket;
        model.recompute_occurrences(self)
    }
}
