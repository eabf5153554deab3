//! Fixture scheduling for double round robins.
//!
//! Pairings come from one of two engines (circle-method rotation for any even
//! field, a seeded constrained fill for exactly eight), then a calendar pass
//! stamps day numbers and time codes over the same slot positions.

mod calendar;
mod core;
mod fixed_eight;
mod rotation;

pub use self::core::{Engine, FixtureScheduler, Schedule, ScheduleError};
pub use calendar::{day_sequence, time_sequence, DayPolicy, TimePolicy};
pub use fixed_eight::{eight_team_pairings, seed_pairings, FillOutcome, FillSearch};
pub use rotation::round_robin_pairings;
