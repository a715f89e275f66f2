//! # Catalogue sources
//!
//! Contract for the catalogues targets come from (variable-star indexes, exoplanet follow-up
//! programs). Network clients and their on-disk caches live outside this crate; they implement
//! [`TargetSource`] and hand plain [`Target`]s to the window model.

use tracing::warn;

use crate::constants::Degree;
use crate::coordinates::EquatorialCoord;
use crate::targets::Target;
use crate::tofo_errors::TofoError;

pub trait TargetSource {
    /// Catalogue name, used in log messages.
    fn name(&self) -> &str;

    /// Look one target up by name.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when the catalogue does not know the name.
    fn query_target(&self, name: &str) -> Result<Option<Target>, TofoError>;

    /// Cone search around `center`.
    ///
    /// Arguments
    /// -----------------
    /// * `center`: search center.
    /// * `radius`: search radius, degrees.
    /// * `limiting_mag`: faintest magnitude to return, `None` for no limit.
    ///
    /// Return
    /// ----------
    /// * The targets found. Catalogues without cone search return an empty list.
    fn query_radius(
        &self,
        center: &EquatorialCoord,
        radius: Degree,
        limiting_mag: Option<f64>,
    ) -> Result<Vec<Target>, TofoError> {
        let _ = (center, radius, limiting_mag);
        Ok(Vec::new())
    }
}

/// Look every name up in `source`.
///
/// Return
/// ----------
/// * The targets found, in input order, and the names the catalogue does not know.
pub fn query_targets(
    source: &dyn TargetSource,
    names: &[&str],
) -> Result<(Vec<Target>, Vec<String>), TofoError> {
    let mut found = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        match source.query_target(name)? {
            Some(target) => found.push(target),
            None => {
                warn!(source = source.name(), target_id = %name, "target not found in catalogue");
                missing.push((*name).to_owned());
            }
        }
    }
    Ok((found, missing))
}

#[cfg(test)]
mod sources_test {
    use super::*;

    struct NameOnly;

    impl TargetSource for NameOnly {
        fn name(&self) -> &str {
            "name-only"
        }

        fn query_target(&self, name: &str) -> Result<Option<Target>, TofoError> {
            Ok(name.starts_with("HAT").then(|| Target::new(name).as_exoplanet(true)))
        }
    }

    #[test]
    fn test_query_targets() {
        let (found, missing) =
            query_targets(&NameOnly, &["HAT-P-7 b", "nope", "HAT-P-1 b"]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(Target::is_exoplanet));
        assert_eq!(missing, vec!["nope"]);
    }

    #[test]
    fn test_default_cone_search_is_empty() {
        let center = EquatorialCoord::new(10.0, 10.0).unwrap();
        assert!(NameOnly.query_radius(&center, 1.0, None).unwrap().is_empty());
    }
}
