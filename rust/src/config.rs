//! Configuration types for the fixture scheduler.

use chrono::NaiveTime;
use pyo3::prelude::*;

use crate::schedule::{DayPolicy, ScheduleError, TimePolicy};

/// Default node budget for the eight-team fill search.
pub const DEFAULT_MAX_SEARCH_NODES: usize = 100_000;

/// Configuration for pairing generation and day/time policy selection.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Day policy: "standard_gap", "fixed_gap_2" or "daily". None = pick by competitor count
    #[pyo3(get, set)]
    pub day_policy: Option<String>,
    /// Time policy: "alternate" or "all_evening". None = pick by competitor count
    #[pyo3(get, set)]
    pub time_policy: Option<String>,
    /// Maximum search nodes for the eight-team fill before reporting a stall
    #[pyo3(get, set)]
    pub max_search_nodes: usize,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            day_policy: None,
            time_policy: None,
            max_search_nodes: DEFAULT_MAX_SEARCH_NODES,
            verbosity: 0,
        }
    }
}

impl SchedulingConfig {
    /// Resolve the day and time policies for a tournament of `competitors`.
    ///
    /// Explicit selectors win. Unset selectors follow the calling convention:
    /// fewer than 8 competitors play every other day with alternating kick-off
    /// times on weekends, larger fields use the standard gap with evening games.
    pub fn resolve_policies(
        &self,
        competitors: usize,
    ) -> Result<(DayPolicy, TimePolicy), ScheduleError> {
        let (default_day, default_time) = if competitors < 8 {
            (
                DayPolicy::FixedGapOfTwo,
                TimePolicy::AlternateWithWeekendCollapse,
            )
        } else {
            (DayPolicy::StandardGap, TimePolicy::AllEvening)
        };

        let day = match &self.day_policy {
            Some(name) => name.parse()?,
            None => default_day,
        };
        let time = match &self.time_policy {
            Some(name) => name.parse()?,
            None => default_time,
        };
        Ok((day, time))
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (
        day_policy=None,
        time_policy=None,
        max_search_nodes=None,
        verbosity=None
    ))]
    fn new(
        day_policy: Option<String>,
        time_policy: Option<String>,
        max_search_nodes: Option<usize>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            day_policy,
            time_policy,
            max_search_nodes: max_search_nodes.unwrap_or(defaults.max_search_nodes),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(day_policy={:?}, time_policy={:?}, max_search_nodes={})",
            self.day_policy, self.time_policy, self.max_search_nodes
        )
    }
}

/// Configuration for turning day numbers and time codes into display strings.
#[pyclass]
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// ISO weekday that day number 1 maps to (1=Monday ... 7=Sunday)
    #[pyo3(get, set)]
    pub week_start: u8,
    /// Kick-off time for afternoon slots
    #[pyo3(get, set)]
    pub afternoon_time: NaiveTime,
    /// Kick-off time for evening slots
    #[pyo3(get, set)]
    pub evening_time: NaiveTime,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            week_start: 1,
            afternoon_time: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
            evening_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

#[pymethods]
impl RenderConfig {
    #[new]
    #[pyo3(signature = (week_start=None, afternoon_time=None, evening_time=None))]
    fn new(
        week_start: Option<u8>,
        afternoon_time: Option<NaiveTime>,
        evening_time: Option<NaiveTime>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            week_start: week_start.unwrap_or(defaults.week_start),
            afternoon_time: afternoon_time.unwrap_or(defaults.afternoon_time),
            evening_time: evening_time.unwrap_or(defaults.evening_time),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RenderConfig(week_start={}, afternoon_time={}, evening_time={})",
            self.week_start, self.afternoon_time, self.evening_time
        )
    }
}
