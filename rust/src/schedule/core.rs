//! Fixture scheduling pipeline: pairings, then days, then times.

use std::collections::HashMap;
use thiserror::Error;

use crate::config::{RenderConfig, SchedulingConfig};
use crate::coverage::{check_slots, CoverageError};
use crate::models::{DayNumber, Pairing, Slot, TimeCode};
use crate::render::{render, Fixtures, Roster};
use crate::{log_changes, log_debug};

use super::calendar::{day_sequence, time_sequence, DayPolicy, TimePolicy};
use super::fixed_eight::{self, FillSearch};
use super::rotation::round_robin_pairings;

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fill stalled: {filled} slots filled, {remaining} pending after {nodes} nodes")]
    StallDetected {
        filled: usize,
        remaining: usize,
        nodes: usize,
    },
    #[error("Not enough {what}: need {needed}, got {available}")]
    OutOfRange {
        what: &'static str,
        needed: usize,
        available: usize,
    },
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
}

/// Pairing generator chosen for a competitor count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    /// Circle-method rotation for any even count
    Rotation,
    /// Seeded constrained fill for exactly eight competitors
    FixedEight,
}

impl Engine {
    pub fn for_competitors(competitors: usize) -> Self {
        if competitors == fixed_eight::COMPETITORS {
            Self::FixedEight
        } else {
            Self::Rotation
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::FixedEight => "fixed_eight",
        }
    }
}

/// One scheduling request. Built per call; holds no shared state.
#[derive(Clone, Debug)]
pub struct FixtureScheduler {
    competitors: usize,
    start_day: DayNumber,
    day_policy: DayPolicy,
    time_policy: TimePolicy,
    search: FillSearch,
}

impl FixtureScheduler {
    /// Create a scheduler with explicit policies.
    ///
    /// # Errors
    /// * `InvalidInput` if `competitors` is below 2 or odd, or `start_day` is outside 1..=7
    pub fn new(
        competitors: usize,
        start_day: DayNumber,
        day_policy: DayPolicy,
        time_policy: TimePolicy,
        search: FillSearch,
    ) -> Result<Self, ScheduleError> {
        if competitors < 2 || competitors % 2 != 0 {
            return Err(ScheduleError::InvalidInput(format!(
                "competitor count must be an even number >= 2, got {}",
                competitors
            )));
        }
        if !(1..=7).contains(&start_day) {
            return Err(ScheduleError::InvalidInput(format!(
                "start day must be 1..=7, got {}",
                start_day
            )));
        }

        Ok(Self {
            competitors,
            start_day,
            day_policy,
            time_policy,
            search,
        })
    }

    /// Create a scheduler from a config, filling unset policies by competitor count.
    pub fn from_config(
        competitors: usize,
        start_day: DayNumber,
        config: &SchedulingConfig,
    ) -> Result<Self, ScheduleError> {
        let (day_policy, time_policy) = config.resolve_policies(competitors)?;
        let search = FillSearch {
            max_nodes: config.max_search_nodes,
            verbosity: config.verbosity,
        };
        Self::new(competitors, start_day, day_policy, time_policy, search)
    }

    pub fn engine(&self) -> Engine {
        Engine::for_competitors(self.competitors)
    }

    /// Number of slots in the finished schedule.
    pub fn slot_count(&self) -> usize {
        self.competitors * (self.competitors - 1)
    }

    /// Run the pipeline.
    pub fn schedule(&self) -> Result<Schedule, ScheduleError> {
        let verbosity = self.search.verbosity;
        let slot_count = self.slot_count();
        let engine = self.engine();
        let mut slots = vec![Slot::default(); slot_count];
        let mut metadata = HashMap::new();

        log_changes!(
            verbosity,
            "Scheduling {} competitors ({} slots) with {} engine, start day {}",
            self.competitors,
            slot_count,
            engine.as_str(),
            self.start_day
        );

        // Phase 1: pairings. Days are still unset here.
        match engine {
            Engine::Rotation => {
                let pairings = round_robin_pairings(self.competitors)?;
                for (slot, pairing) in slots.iter_mut().zip(pairings) {
                    *slot = Slot::filled(pairing);
                }
            }
            Engine::FixedEight => {
                let outcome = fixed_eight::fill_slots(&mut slots, self.start_day, self.search)?;
                metadata.insert("search_nodes".to_string(), outcome.nodes.to_string());
                metadata.insert("backtracks".to_string(), outcome.backtracks.to_string());
            }
        }

        // Phase 2: days, then times over the same slot indices
        let days = day_sequence(slot_count, self.start_day, self.day_policy)?;
        let times = time_sequence(&days, self.time_policy);
        for ((slot, day), time) in slots.iter_mut().zip(&days).zip(&times) {
            slot.day = Some(*day);
            slot.time = Some(*time);
        }
        log_debug!(verbosity, "Days: {:?}", days);

        metadata.insert("engine".to_string(), engine.as_str().to_string());
        metadata.insert("day_policy".to_string(), self.day_policy.as_str().to_string());
        metadata.insert("time_policy".to_string(), self.time_policy.as_str().to_string());

        Ok(Schedule {
            competitors: self.competitors,
            start_day: self.start_day,
            slots,
            metadata,
        })
    }
}

/// A finished schedule. Immutable once built.
#[derive(Clone, Debug)]
pub struct Schedule {
    competitors: usize,
    start_day: DayNumber,
    slots: Vec<Slot>,
    metadata: HashMap<String, String>,
}

impl Schedule {
    pub fn competitors(&self) -> usize {
        self.competitors
    }

    pub fn start_day(&self) -> DayNumber {
        self.start_day
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Filled pairings in slot order.
    pub fn pairings(&self) -> Vec<Pairing> {
        self.slots.iter().filter_map(|s| s.pairing).collect()
    }

    pub fn days(&self) -> Vec<DayNumber> {
        self.slots.iter().filter_map(|s| s.day).collect()
    }

    pub fn times(&self) -> Vec<TimeCode> {
        self.slots.iter().filter_map(|s| s.time).collect()
    }

    /// Engine, policies and search statistics.
    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Check that every ordered pair appears exactly once.
    pub fn verify(&self) -> Result<(), CoverageError> {
        check_slots(&self.slots, self.competitors)
    }

    /// Render the schedule with the caller's name tables.
    ///
    /// The iterator is lazy; call again to restart it.
    ///
    /// # Errors
    /// * `OutOfRange` if `roster` names fewer teams than there are competitors
    /// * `InvalidInput` if the render config's week start is outside 1..=7
    pub fn fixtures<'a>(
        &'a self,
        roster: &'a Roster,
        config: &RenderConfig,
    ) -> Result<Fixtures<'a>, ScheduleError> {
        render(&self.slots, self.competitors, roster, config)
    }
}
