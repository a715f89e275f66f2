//! # Transition overhead between consecutive observations
//!
//! Moving from one target to the next costs time: slewing, re-centering, refocusing. The
//! scheduler asks a [`TransitionOverhead`] for that cost for every candidate pair and only
//! accepts `B` after `A` when `A.end + overhead(A, B) <= B.start`.
//!
//! Provided models:
//!
//! - [`ZeroOverhead`] – back-to-back observations are allowed.
//! - [`FixedOverhead`] – a constant cost per transition.
//! - [`SlewOverhead`] – great-circle distance over a slew rate, plus a settle time.
//! - [`TransitionModel`] – the closed set of the above, as configured on a
//!   [`SiteConfig`](crate::site::SiteConfig).
//!
//! Any thread-safe closure
//! `Fn(&ScheduleNode, &ScheduleNode, &SiteConfig) -> Result<Duration, TofoError>` is also a
//! [`TransitionOverhead`].

use hifitime::Duration;

use crate::scheduler::ScheduleNode;
use crate::site::SiteConfig;
use crate::tofo_errors::TofoError;

pub trait TransitionOverhead: Send + Sync {
    /// Time needed between the end of `from` and the start of `to`.
    ///
    /// Implementations may fail; a negative duration is rejected by the scheduler.
    fn overhead(
        &self,
        from: &ScheduleNode,
        to: &ScheduleNode,
        site: &SiteConfig,
    ) -> Result<Duration, TofoError>;
}

impl<F> TransitionOverhead for F
where
    F: Fn(&ScheduleNode, &ScheduleNode, &SiteConfig) -> Result<Duration, TofoError> + Send + Sync,
{
    fn overhead(
        &self,
        from: &ScheduleNode,
        to: &ScheduleNode,
        site: &SiteConfig,
    ) -> Result<Duration, TofoError> {
        self(from, to, site)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZeroOverhead;

impl TransitionOverhead for ZeroOverhead {
    fn overhead(
        &self,
        _from: &ScheduleNode,
        _to: &ScheduleNode,
        _site: &SiteConfig,
    ) -> Result<Duration, TofoError> {
        Ok(Duration::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOverhead(Duration);

impl FixedOverhead {
    pub fn new(duration: Duration) -> Result<Self, TofoError> {
        if duration < Duration::ZERO {
            return Err(TofoError::InvalidSiteConfig(format!(
                "transition overhead cannot be negative ({duration})"
            )));
        }
        Ok(FixedOverhead(duration))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl TransitionOverhead for FixedOverhead {
    fn overhead(
        &self,
        _from: &ScheduleNode,
        _to: &ScheduleNode,
        _site: &SiteConfig,
    ) -> Result<Duration, TofoError> {
        Ok(self.0)
    }
}

/// Slew at a constant angular rate, then wait for the mount to settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlewOverhead {
    /// Degrees per second.
    slew_rate: f64,
    settle_time: Duration,
}

impl SlewOverhead {
    /// Arguments
    /// -----------------
    /// * `slew_rate`: mount slew rate in **degrees per second**, strictly positive.
    /// * `settle_time`: fixed cost added to every transition, non-negative.
    pub fn new(slew_rate: f64, settle_time: Duration) -> Result<Self, TofoError> {
        if !(slew_rate.is_finite() && slew_rate > 0.0) {
            return Err(TofoError::InvalidSiteConfig(format!(
                "slew rate must be strictly positive (got {slew_rate} deg/s)"
            )));
        }
        if settle_time < Duration::ZERO {
            return Err(TofoError::InvalidSiteConfig(format!(
                "settle time cannot be negative ({settle_time})"
            )));
        }
        Ok(SlewOverhead {
            slew_rate,
            settle_time,
        })
    }

    pub fn slew_rate(&self) -> f64 {
        self.slew_rate
    }

    pub fn settle_time(&self) -> Duration {
        self.settle_time
    }
}

impl TransitionOverhead for SlewOverhead {
    fn overhead(
        &self,
        from: &ScheduleNode,
        to: &ScheduleNode,
        _site: &SiteConfig,
    ) -> Result<Duration, TofoError> {
        let separation = from.coord().angular_separation(&to.coord());
        Ok(Duration::from_seconds(separation / self.slew_rate) + self.settle_time)
    }
}

/// Transition model selectable from site configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TransitionModel {
    #[default]
    Zero,
    Fixed(FixedOverhead),
    Slew(SlewOverhead),
}

impl TransitionModel {
    pub fn fixed(duration: Duration) -> Result<Self, TofoError> {
        Ok(TransitionModel::Fixed(FixedOverhead::new(duration)?))
    }

    pub fn slew(slew_rate: f64, settle_time: Duration) -> Result<Self, TofoError> {
        Ok(TransitionModel::Slew(SlewOverhead::new(
            slew_rate,
            settle_time,
        )?))
    }
}

impl TransitionOverhead for TransitionModel {
    fn overhead(
        &self,
        from: &ScheduleNode,
        to: &ScheduleNode,
        site: &SiteConfig,
    ) -> Result<Duration, TofoError> {
        match self {
            TransitionModel::Zero => ZeroOverhead.overhead(from, to, site),
            TransitionModel::Fixed(fixed) => fixed.overhead(from, to, site),
            TransitionModel::Slew(slew) => slew.overhead(from, to, site),
        }
    }
}
