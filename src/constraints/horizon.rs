//! # Local horizon profile
//!
//! A horizon profile maps azimuth (degrees, from North through East) to the minimum
//! altitude (degrees) at which the sky is visible from the site: trees, roofs, hills.
//! Between the tabulated points the horizon is interpolated linearly, and the profile is
//! closed over the 0°/360° seam so that any azimuth has a value.
//!
//! ## Closing the seam
//!
//! - Profile starts at 0° but stops short of 360°: the 0° altitude is repeated at 360°.
//! - Profile ends at 360° but starts after 0°: the 360° altitude is repeated at 0°.
//! - Neither end is present: the first and last points are joined across the seam and the
//!   value at 0°/360° is taken on that straight line.
//!
//! Profiles are usually read from a headerless `azimuth,altitude` CSV file
//! ([`HorizonProfile::from_csv`]).

use camino::Utf8Path;
use itertools::Itertools;

use crate::constants::{Degree, FLAT_HORIZON};
use crate::tofo_errors::TofoError;

/// Piecewise-linear horizon, sorted by azimuth and spanning `[0, 360]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonProfile {
    points: Vec<(Degree, Degree)>,
    min_altitude: Degree,
}

impl Default for HorizonProfile {
    fn default() -> Self {
        Self::flat()
    }
}

impl HorizonProfile {
    /// A 0° horizon in every direction.
    pub fn flat() -> Self {
        HorizonProfile {
            points: FLAT_HORIZON.to_vec(),
            min_altitude: 0.0,
        }
    }

    /// Build a profile from `(azimuth°, altitude°)` pairs.
    ///
    /// Arguments
    /// -----------------
    /// * `points`: at least one pair, azimuths in `[0, 360]`, finite altitudes. Order does not
    ///   matter.
    ///
    /// Return
    /// ----------
    /// * The closed profile, or [`TofoError::InvalidSiteConfig`] for empty or out-of-range input.
    pub fn new(points: Vec<(Degree, Degree)>) -> Result<Self, TofoError> {
        if points.is_empty() {
            return Err(TofoError::InvalidSiteConfig(
                "horizon profile needs at least one point".into(),
            ));
        }
        if let Some((az, alt)) = points
            .iter()
            .find(|(az, alt)| !(0.0..=360.0).contains(az) || !alt.is_finite())
        {
            return Err(TofoError::InvalidSiteConfig(format!(
                "invalid horizon point (azimuth={az}, altitude={alt})"
            )));
        }

        let mut h: Vec<(Degree, Degree)> = points
            .into_iter()
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .dedup_by(|a, b| a.0 == b.0)
            .collect();
        let min_altitude = h.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);

        let (first, last) = (h[0], h[h.len() - 1]);
        match (first.0 == 0.0, last.0 == 360.0) {
            (true, true) => {}
            (true, false) => h.push((360.0, first.1)),
            (false, true) => h.insert(0, (0.0, last.1)),
            (false, false) => {
                // straight line from the last point, shifted one turn back, to the first one
                let (x0, y0) = first;
                let (x1, y1) = (last.0 - 360.0, last.1);
                let y = (y0 * x1 - y1 * x0) / (x1 - x0);
                h.insert(0, (0.0, y));
                h.push((360.0, y));
            }
        }

        Ok(HorizonProfile {
            points: h,
            min_altitude,
        })
    }

    /// Read a profile from a headerless `azimuth,altitude` CSV file.
    pub fn from_csv(path: &Utf8Path) -> Result<Self, TofoError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut points = Vec::new();
        for record in reader.deserialize::<(Degree, Degree)>() {
            points.push(record?);
        }
        Self::new(points)
    }

    /// Tabulated points after seam closure.
    pub fn points(&self) -> &[(Degree, Degree)] {
        &self.points
    }

    /// Lowest altitude of the input profile.
    pub fn min_altitude(&self) -> Degree {
        self.min_altitude
    }

    /// Interpolated horizon altitude at `azimuth` (wrapped into `[0, 360)`).
    pub fn altitude_at(&self, azimuth: Degree) -> Degree {
        let az = azimuth.rem_euclid(360.0);
        let idx = self.points.partition_point(|p| p.0 <= az);
        if idx == 0 {
            return self.points[0].1;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].1;
        }
        let (x0, y0) = self.points[idx - 1];
        let (x1, y1) = self.points[idx];
        y0 + (y1 - y0) * (az - x0) / (x1 - x0)
    }

    /// Whether a target at `(azimuth, altitude)` is strictly above the horizon.
    pub fn is_visible(&self, azimuth: Degree, altitude: Degree) -> bool {
        self.altitude_at(azimuth) < altitude
    }

    /// Altitude rescaled to `[0, 1]` between the lowest horizon point and the zenith,
    /// `0` when the target is hidden.
    pub fn altitude_score(&self, azimuth: Degree, altitude: Degree) -> f64 {
        if !self.is_visible(azimuth, altitude) {
            return 0.0;
        }
        let span = 90.0 - self.min_altitude;
        if span <= 0.0 {
            return 1.0;
        }
        ((altitude - self.min_altitude) / span).clamp(0.0, 1.0)
    }
}
