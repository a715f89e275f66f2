#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use hifitime::{Duration, Epoch};
use tofo::constraints::Constraint;
use tofo::coordinates::EquatorialCoord;
use tofo::oracle::EphemerisOracle;
use tofo::scheduler::{NodeKey, ScheduleNode};
use tofo::site::SiteConfig;
use tofo::sources::TargetSource;
use tofo::targets::Target;
use tofo::tofo_errors::TofoError;

/// Deterministic oracle: time windows are honoured, sky constraints always pass except
/// inside the configured blackouts, light travel adds a constant offset.
pub struct FakeOracle {
    pub blackouts: Vec<(Epoch, Epoch)>,
    pub light_travel: Duration,
    pub observable_calls: AtomicUsize,
    pub occurrence_calls: AtomicUsize,
}

impl Default for FakeOracle {
    fn default() -> Self {
        FakeOracle {
            blackouts: Vec::new(),
            light_travel: Duration::ZERO,
            observable_calls: AtomicUsize::new(0),
            occurrence_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeOracle {
    pub fn with_blackout(mut self, from: Epoch, to: Epoch) -> Self {
        self.blackouts.push((from, to));
        self
    }

    pub fn observable_calls(&self) -> usize {
        self.observable_calls.load(Ordering::Relaxed)
    }

    pub fn occurrence_calls(&self) -> usize {
        self.occurrence_calls.load(Ordering::Relaxed)
    }
}

impl EphemerisOracle for FakeOracle {
    fn next_occurrences(
        &self,
        epoch: Epoch,
        period: Duration,
        after: Epoch,
        count: usize,
    ) -> Result<Vec<Epoch>, TofoError> {
        self.occurrence_calls.fetch_add(1, Ordering::Relaxed);
        let period_s = period.to_seconds();
        let first_cycle = ((after - epoch).to_seconds() / period_s).ceil();
        Ok((0..count)
            .map(|k| epoch + Duration::from_seconds((first_cycle + k as f64) * period_s))
            .collect())
    }

    fn observable(
        &self,
        times: &[Epoch],
        _coord: &EquatorialCoord,
        constraints: &[Constraint],
    ) -> Result<Vec<bool>, TofoError> {
        self.observable_calls.fetch_add(1, Ordering::Relaxed);
        Ok(times
            .iter()
            .map(|t| {
                constraints.iter().all(|c| c.check_time(*t).unwrap_or(true))
                    && !self.blackouts.iter().any(|(from, to)| from <= t && t <= to)
            })
            .collect())
    }

    fn light_travel_correct(
        &self,
        times: &[Epoch],
        _coord: &EquatorialCoord,
    ) -> Result<Vec<Epoch>, TofoError> {
        Ok(times.iter().map(|t| *t + self.light_travel).collect())
    }
}

/// In-memory catalogue.
pub struct MemorySource {
    pub targets: HashMap<String, Target>,
}

impl MemorySource {
    pub fn new(targets: Vec<Target>) -> Self {
        MemorySource {
            targets: targets
                .into_iter()
                .map(|t| (t.name().to_owned(), t))
                .collect(),
        }
    }
}

impl TargetSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn query_target(&self, name: &str) -> Result<Option<Target>, TofoError> {
        Ok(self.targets.get(name).cloned())
    }

    fn query_radius(
        &self,
        center: &EquatorialCoord,
        radius: f64,
        _limiting_mag: Option<f64>,
    ) -> Result<Vec<Target>, TofoError> {
        let mut found: Vec<Target> = self
            .targets
            .values()
            .filter(|t| {
                t.coord()
                    .is_some_and(|c| c.angular_separation(center) <= radius)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }
}

pub fn at(h: u8, m: u8) -> Epoch {
    Epoch::from_gregorian_utc_hms(2024, 8, 12, h, m, 0)
}

pub fn coord(ra: f64, dec: f64) -> EquatorialCoord {
    EquatorialCoord::new(ra, dec).unwrap()
}

pub fn node(name: &str, start: Epoch, end: Epoch) -> ScheduleNode {
    weighted_node(name, 0, start, end, 1.0)
}

pub fn weighted_node(
    name: &str,
    occurrence: usize,
    start: Epoch,
    end: Epoch,
    weight: f64,
) -> ScheduleNode {
    ScheduleNode::new(
        NodeKey::new(name, occurrence),
        start,
        end,
        weight,
        coord(15.0, 20.0),
    )
    .unwrap()
}

pub fn site(margin_s: f64) -> SiteConfig {
    SiteConfig::builder("test site")
        .location(48.0, 2.0, 100.0)
        .margins(
            Duration::from_seconds(margin_s),
            Duration::from_seconds(margin_s),
        )
        .build()
        .unwrap()
}
