//! Sexagesimal angle parsing for catalogue coordinates.
//!
//! Catalogues hand out right ascension as `HH MM SS.ss` (or `HH:MM:SS.ss`, or `12h34m56.7s`)
//! and declination as `±DD MM SS.s` (or `±DD:MM:SS.s`, `±DDdMMmSSs`). Both helpers return
//! decimal degrees.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{Degree, DEG_PER_HOUR};
use crate::tofo_errors::TofoError;

static SEXAGESIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*([+-]?)(\d{1,3})\s*[\s:hHdD°]\s*(\d{1,2})\s*[\s:mM']\s*(\d{1,2}(?:\.\d*)?)\s*[sS″]?\s*$",
    )
    .expect("sexagesimal pattern is valid")
});

/// Split a sexagesimal string into `(sign, major, minutes, seconds)`.
fn split_sexagesimal(angle: &str) -> Result<(f64, f64, f64, f64), TofoError> {
    let caps = SEXAGESIMAL
        .captures(angle)
        .ok_or_else(|| TofoError::InvalidSexagesimal(angle.to_string()))?;

    let parse = |i: usize| -> Result<f64, TofoError> {
        caps[i]
            .parse::<f64>()
            .map_err(|_| TofoError::InvalidSexagesimal(angle.to_string()))
    };

    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    let (major, minutes, seconds) = (parse(2)?, parse(3)?, parse(4)?);
    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(TofoError::InvalidSexagesimal(angle.to_string()));
    }
    Ok((sign, major, minutes, seconds))
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `ra`: a string representing the right ascension in the format `HH MM SS.SS`
///   (colons or `h`/`m`/`s` markers are accepted as separators)
///
/// Returns
/// -------
/// * the right ascension in degrees, in `[0, 360)`
/// * [`TofoError::InvalidSexagesimal`] on malformed input, a sign, or hours ≥ 24
pub fn parse_ra_to_deg(ra: &str) -> Result<Degree, TofoError> {
    let (sign, h, m, s) = split_sexagesimal(ra)?;
    if sign < 0.0 || ra.trim_start().starts_with('+') || h >= 24.0 {
        return Err(TofoError::InvalidSexagesimal(ra.to_string()));
    }
    Ok((h + m / 60.0 + s / 3600.0) * DEG_PER_HOUR)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: a string representing the declination in the format `±DD MM SS.SS`
///
/// Returns
/// -------
/// * the declination in degrees, in `[-90, 90]`
/// * [`TofoError::InvalidSexagesimal`] on malformed input or |dec| > 90°
pub fn parse_dec_to_deg(dec: &str) -> Result<Degree, TofoError> {
    let (sign, d, m, s) = split_sexagesimal(dec)?;
    let value = d + m / 60.0 + s / 3600.0;
    if value > 90.0 {
        return Err(TofoError::InvalidSexagesimal(dec.to_string()));
    }
    Ok(sign * value)
}
