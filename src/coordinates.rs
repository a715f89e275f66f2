//! # Equatorial sky coordinates
//!
//! [`EquatorialCoord`] is the resolved position carried by every [`crate::targets::Target`]
//! and copied into every [`crate::scheduler::ScheduleNode`]. Angles are stored in **degrees**
//! as [`NotNan`] values so that coordinates can be hashed and compared exactly.
//!
//! ## Conventions
//!
//! - Right ascension is normalized to `[0, 360)`.
//! - Declination must lie in `[-90, 90]`.
//! - The frame is the catalogue frame (J2000/ICRS); precession is the oracle's business.
//!
//! ## See also
//! ------------
//! * [`parse_ra_to_deg`](crate::conversion::parse_ra_to_deg), [`parse_dec_to_deg`](crate::conversion::parse_dec_to_deg) – Sexagesimal input.
//! * [`SlewOverhead`](crate::scheduler::transition::SlewOverhead) – Uses [`EquatorialCoord::angular_separation`].

use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::constants::Degree;
use crate::conversion::{parse_dec_to_deg, parse_ra_to_deg};
use crate::tofo_errors::TofoError;

/// Resolved equatorial position of a target, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EquatorialCoord {
    /// Right ascension in **degrees**, `[0, 360)`.
    ra: NotNan<f64>,
    /// Declination in **degrees**, `[-90, 90]`.
    dec: NotNan<f64>,
}

impl EquatorialCoord {
    /// Build a coordinate from decimal degrees.
    ///
    /// Arguments
    /// -----------------
    /// * `ra`: right ascension in degrees, any finite value (wrapped into `[0, 360)`).
    /// * `dec`: declination in degrees, `[-90, 90]`.
    ///
    /// Return
    /// ----------
    /// * The coordinate, or [`TofoError::InvalidCoordinate`] for NaN, infinite or
    ///   out-of-range inputs.
    pub fn new(ra: Degree, dec: Degree) -> Result<Self, TofoError> {
        if !ra.is_finite() || !dec.is_finite() {
            return Err(TofoError::InvalidCoordinate(format!(
                "non-finite angle (ra={ra}, dec={dec})"
            )));
        }
        if !(-90.0..=90.0).contains(&dec) {
            return Err(TofoError::InvalidCoordinate(format!(
                "declination {dec} outside [-90, 90]"
            )));
        }
        Ok(EquatorialCoord {
            ra: NotNan::new(ra.rem_euclid(360.0))?,
            dec: NotNan::new(dec)?,
        })
    }

    /// Build a coordinate from sexagesimal strings (`HH MM SS.s`, `±DD MM SS.s`).
    pub fn from_sexagesimal(ra: &str, dec: &str) -> Result<Self, TofoError> {
        Self::new(parse_ra_to_deg(ra)?, parse_dec_to_deg(dec)?)
    }

    pub fn ra(&self) -> Degree {
        self.ra.into_inner()
    }

    pub fn dec(&self) -> Degree {
        self.dec.into_inner()
    }

    /// Unit direction vector in the equatorial frame.
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (ra, dec) = (self.ra().to_radians(), self.dec().to_radians());
        Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
    }

    /// Great-circle separation with another coordinate, in degrees.
    ///
    /// Uses `atan2(|a × b|, a · b)`, which stays accurate for both tiny and
    /// near-antipodal separations.
    pub fn angular_separation(&self, other: &EquatorialCoord) -> Degree {
        let a = self.unit_vector();
        let b = other.unit_vector();
        a.cross(&b).norm().atan2(a.dot(&b)).to_degrees()
    }
}

#[cfg(test)]
mod coordinates_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_wraps_ra() {
        let c = EquatorialCoord::new(370.0, 10.0).unwrap();
        assert_relative_eq!(c.ra(), 10.0);
        let c = EquatorialCoord::new(-30.0, 10.0).unwrap();
        assert_relative_eq!(c.ra(), 330.0);
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(EquatorialCoord::new(10.0, 91.0).is_err());
        assert!(EquatorialCoord::new(f64::NAN, 0.0).is_err());
        assert!(EquatorialCoord::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_sexagesimal() {
        let c = EquatorialCoord::from_sexagesimal("22 52 23.37", "-00 30 14.2").unwrap();
        assert_relative_eq!(c.ra(), 343.097375, epsilon = 1e-9);
        assert_relative_eq!(c.dec(), -0.5039444444444444, epsilon = 1e-9);
    }

    #[test]
    fn test_angular_separation() {
        let a = EquatorialCoord::new(0.0, 0.0).unwrap();
        let b = EquatorialCoord::new(90.0, 0.0).unwrap();
        let pole = EquatorialCoord::new(123.0, 90.0).unwrap();

        assert_relative_eq!(a.angular_separation(&b), 90.0, epsilon = 1e-9);
        assert_relative_eq!(a.angular_separation(&pole), 90.0, epsilon = 1e-9);
        assert_relative_eq!(a.angular_separation(&a), 0.0, epsilon = 1e-9);

        let c = EquatorialCoord::new(180.0, 0.0).unwrap();
        assert_relative_eq!(a.angular_separation(&c), 180.0, epsilon = 1e-9);
    }
}
