//! # Site configuration
//!
//! [`SiteConfig`] gathers everything a scheduling session needs to know about the observing
//! site, as one **immutable** value passed explicitly to the window model and the scheduler:
//!
//! - geodetic location and a fixed UTC offset for local-time display,
//! - the padding added before ingress (`pre_margin`) and after egress (`post_margin`),
//! - the ordered [`Constraint`] list forwarded to the oracle,
//! - the default [`TransitionModel`] between consecutive targets,
//! - how many extra samples the window model evaluates inside each event window.
//!
//! ## JSON layout
//!
//! ```json
//! {
//!   "observatory": { "name": "Backyard", "lat_deg": 45.5, "lon_deg": -73.6,
//!                    "elevation_m": 50.0, "utc_offset_hours": -5.0,
//!                    "horizon_file": "horizon.csv" },
//!   "observations": { "exo_hours_before": 0.5, "exo_hours_after": 0.5,
//!                     "twilight": "nautical" },
//!   "transition": { "slew_rate_deg_per_s": 2.0, "settle_time_s": 60.0 }
//! }
//! ```
//!
//! Unknown keys are ignored, so a full observatory file (telescope, sensor, sources…) can be
//! read as is. A relative `horizon_file` is resolved against the directory of the JSON file.
//! Without a horizon file the site gets a flat 0° horizon.
//!
//! ## Usage
//!
//! ```rust
//! use hifitime::Duration;
//! use tofo::constraints::{HorizonProfile, Twilight};
//! use tofo::site::SiteConfig;
//!
//! let site = SiteConfig::builder("Backyard")
//!     .location(45.5, -73.6, 50.0)
//!     .margins(Duration::from_seconds(1800.0), Duration::from_seconds(1800.0))
//!     .twilight(Twilight::Nautical)
//!     .horizon(HorizonProfile::flat())
//!     .build()?;
//! assert_eq!(site.constraints().len(), 2);
//! # Ok::<(), tofo::tofo_errors::TofoError>(())
//! ```

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::{Duration, Epoch};
use serde::Deserialize;

use crate::constants::{Degree, Meter, SECONDS_PER_HOUR};
use crate::constraints::{Constraint, HorizonProfile, Twilight};
use crate::scheduler::transition::TransitionModel;
use crate::tofo_errors::TofoError;

/// Geodetic position of the site.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SiteLocation {
    pub latitude: Degree,
    pub longitude: Degree,
    pub elevation: Meter,
}

/// Immutable per-session site description.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    name: String,
    location: SiteLocation,
    utc_offset: Duration,
    pre_margin: Duration,
    post_margin: Duration,
    constraints: Vec<Constraint>,
    transition: TransitionModel,
    extra_samples: usize,
}

impl SiteConfig {
    pub fn builder(name: impl Into<String>) -> SiteConfigBuilder {
        SiteConfigBuilder::new(name)
    }

    /// Load a site from an observatory JSON file.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: JSON file following the layout documented at module level.
    ///
    /// Return
    /// ----------
    /// * The validated [`SiteConfig`], or an I/O, JSON, CSV or
    ///   [`TofoError::InvalidSiteConfig`] error.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, TofoError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, path.parent())
    }

    /// Parse a site from JSON text; `base_dir` resolves a relative horizon file.
    pub fn from_json_str(json: &str, base_dir: Option<&Utf8Path>) -> Result<Self, TofoError> {
        let file: SiteFile = serde_json::from_str(json)?;

        let obs = file.observatory;
        let mut builder = SiteConfig::builder(obs.name)
            .location(obs.lat_deg, obs.lon_deg, obs.elevation_m)
            .utc_offset(Duration::from_seconds(obs.utc_offset_hours * SECONDS_PER_HOUR))
            .margins(
                Duration::from_seconds(file.observations.exo_hours_before * SECONDS_PER_HOUR),
                Duration::from_seconds(file.observations.exo_hours_after * SECONDS_PER_HOUR),
            )
            .extra_samples(file.observations.extra_samples);

        if let Some(twilight) = file.observations.twilight.filter(|t| !t.trim().is_empty()) {
            builder = builder.twilight(twilight.parse()?);
        }

        let horizon = match obs.horizon_file {
            Some(horizon_file) => {
                let horizon_path = Utf8PathBuf::from(horizon_file);
                let horizon_path = match base_dir {
                    Some(dir) if horizon_path.is_relative() => dir.join(horizon_path),
                    _ => horizon_path,
                };
                HorizonProfile::from_csv(&horizon_path)?
            }
            None => HorizonProfile::flat(),
        };
        builder = builder.horizon(horizon);

        if let Some(transition) = file.transition {
            let settle = Duration::from_seconds(transition.settle_time_s);
            builder = builder.transition(match transition.slew_rate_deg_per_s {
                Some(rate) => TransitionModel::slew(rate, settle)?,
                None => TransitionModel::fixed(settle)?,
            });
        }

        builder.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> SiteLocation {
        self.location
    }

    pub fn utc_offset(&self) -> Duration {
        self.utc_offset
    }

    /// Padding before ingress.
    pub fn pre_margin(&self) -> Duration {
        self.pre_margin
    }

    /// Padding after egress.
    pub fn post_margin(&self) -> Duration {
        self.post_margin
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn transition(&self) -> &TransitionModel {
        &self.transition
    }

    /// Additional evenly spaced samples evaluated inside each event window.
    pub fn extra_samples(&self) -> usize {
        self.extra_samples
    }

    /// Shift a UTC epoch to the site's local wall-clock time.
    pub fn to_local(&self, utc: Epoch) -> Epoch {
        utc + self.utc_offset
    }

    /// Shift a local wall-clock epoch back to UTC.
    pub fn to_utc(&self, local: Epoch) -> Epoch {
        local - self.utc_offset
    }
}

/// Step-by-step construction of a [`SiteConfig`].
#[derive(Debug, Clone)]
pub struct SiteConfigBuilder {
    name: String,
    location: SiteLocation,
    utc_offset: Duration,
    pre_margin: Duration,
    post_margin: Duration,
    twilight: Option<Twilight>,
    horizon: Option<HorizonProfile>,
    extra_constraints: Vec<Constraint>,
    transition: TransitionModel,
    extra_samples: usize,
}

impl SiteConfigBuilder {
    fn new(name: impl Into<String>) -> Self {
        let default_margin = Duration::from_seconds(SECONDS_PER_HOUR / 2.0);
        SiteConfigBuilder {
            name: name.into(),
            location: SiteLocation::default(),
            utc_offset: Duration::ZERO,
            pre_margin: default_margin,
            post_margin: default_margin,
            twilight: None,
            horizon: None,
            extra_constraints: Vec::new(),
            transition: TransitionModel::Zero,
            extra_samples: 0,
        }
    }

    pub fn location(mut self, latitude: Degree, longitude: Degree, elevation: Meter) -> Self {
        self.location = SiteLocation {
            latitude,
            longitude,
            elevation,
        };
        self
    }

    pub fn utc_offset(mut self, offset: Duration) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn margins(mut self, pre_margin: Duration, post_margin: Duration) -> Self {
        self.pre_margin = pre_margin;
        self.post_margin = post_margin;
        self
    }

    pub fn twilight(mut self, twilight: Twilight) -> Self {
        self.twilight = Some(twilight);
        self
    }

    pub fn horizon(mut self, horizon: HorizonProfile) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Append a constraint after the twilight and horizon ones.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.extra_constraints.push(constraint);
        self
    }

    pub fn transition(mut self, transition: TransitionModel) -> Self {
        self.transition = transition;
        self
    }

    pub fn extra_samples(mut self, extra_samples: usize) -> Self {
        self.extra_samples = extra_samples;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// Return
    /// ----------
    /// * [`TofoError::InvalidSiteConfig`] when a margin is not strictly positive (the event
    ///   window would collapse onto ingress or egress) or the location is out of range.
    pub fn build(self) -> Result<SiteConfig, TofoError> {
        if self.pre_margin <= Duration::ZERO || self.post_margin <= Duration::ZERO {
            return Err(TofoError::InvalidSiteConfig(format!(
                "margins must be strictly positive (pre={}, post={})",
                self.pre_margin, self.post_margin
            )));
        }
        let loc = self.location;
        if !(-90.0..=90.0).contains(&loc.latitude) || !(-360.0..=360.0).contains(&loc.longitude)
        {
            return Err(TofoError::InvalidSiteConfig(format!(
                "site location out of range (lat={}, lon={})",
                loc.latitude, loc.longitude
            )));
        }

        let mut constraints = Vec::with_capacity(2 + self.extra_constraints.len());
        if let Some(twilight) = self.twilight {
            constraints.push(Constraint::AtNight(twilight));
        }
        if let Some(horizon) = self.horizon {
            constraints.push(Constraint::Horizon(Arc::new(horizon)));
        }
        constraints.extend(self.extra_constraints);

        Ok(SiteConfig {
            name: self.name,
            location: self.location,
            utc_offset: self.utc_offset,
            pre_margin: self.pre_margin,
            post_margin: self.post_margin,
            constraints,
            transition: self.transition,
            extra_samples: self.extra_samples,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SiteFile {
    observatory: ObservatorySection,
    observations: ObservationsSection,
    #[serde(default)]
    transition: Option<TransitionSection>,
}

#[derive(Debug, Deserialize)]
struct ObservatorySection {
    name: String,
    lat_deg: f64,
    lon_deg: f64,
    #[serde(default)]
    elevation_m: f64,
    #[serde(default)]
    utc_offset_hours: f64,
    #[serde(default)]
    horizon_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObservationsSection {
    exo_hours_before: f64,
    exo_hours_after: f64,
    #[serde(default)]
    twilight: Option<String>,
    #[serde(default)]
    extra_samples: usize,
}

#[derive(Debug, Deserialize)]
struct TransitionSection {
    #[serde(default)]
    slew_rate_deg_per_s: Option<f64>,
    #[serde(default)]
    settle_time_s: f64,
}
