//! Round-robin fixture scheduling engine.
//!
//! Generates every home-and-away pairing for a tournament, orders them into
//! slots, stamps each slot with a day and kick-off time, and renders the result
//! with caller-supplied team and venue names.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod coverage;
pub mod logging;
mod models;
pub mod render;
pub mod schedule;

pub use config::{RenderConfig, SchedulingConfig, DEFAULT_MAX_SEARCH_NODES};
pub use coverage::{check_round_robin, CoverageError};
pub use models::{CompetitorId, DayNumber, Fixture, Pairing, ScheduleResult, Slot, TimeCode};
pub use render::{Fixtures, Roster};
pub use schedule::{
    day_sequence, eight_team_pairings, round_robin_pairings, time_sequence, DayPolicy, Engine,
    FillSearch, FixtureScheduler, Schedule, ScheduleError, TimePolicy,
};

fn to_py_err(err: ScheduleError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Build and render a complete fixture list.
///
/// # Arguments
/// * `competitor_count` - Number of competitors (even, >= 2; 8 uses the seeded engine)
/// * `start_day` - Day number of the first fixture (1-7)
/// * `teams` - Team names, competitor k is `teams[k - 1]`
/// * `venues` - Venue names cycled by slot; empty synthesizes "Stadium n"
/// * `config` - Policy selection and search limits (policies default by competitor count)
/// * `render_config` - Week start and kick-off times
///
/// # Returns
/// * ScheduleResult with fixtures in slot order and algorithm metadata
///
/// # Raises
/// * ValueError on invalid input, unknown policy, short team list, or a stalled search
#[pyfunction]
#[pyo3(signature = (competitor_count, start_day, teams, venues=None, config=None, render_config=None))]
fn generate_schedule(
    competitor_count: usize,
    start_day: DayNumber,
    teams: Vec<String>,
    venues: Option<Vec<String>>,
    config: Option<SchedulingConfig>,
    render_config: Option<RenderConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    let render_config = render_config.unwrap_or_default();
    let roster = Roster::new(teams, venues.unwrap_or_default());

    let schedule = FixtureScheduler::from_config(competitor_count, start_day, &config)
        .and_then(|scheduler| scheduler.schedule())
        .map_err(to_py_err)?;
    let fixtures = schedule
        .fixtures(&roster, &render_config)
        .map_err(to_py_err)?
        .collect();

    Ok(ScheduleResult {
        fixtures,
        algorithm_metadata: schedule.metadata().clone(),
    })
}

/// Home-and-away pairing order from the rotation engine, as (home, away) tuples.
#[pyfunction]
#[pyo3(name = "round_robin_pairings")]
fn py_round_robin_pairings(
    competitor_count: usize,
) -> PyResult<Vec<(CompetitorId, CompetitorId)>> {
    let pairings = round_robin_pairings(competitor_count).map_err(to_py_err)?;
    Ok(pairings.into_iter().map(|p| (p.home, p.away)).collect())
}

/// Eight-competitor pairing order for a start day, as (home, away) tuples.
#[pyfunction]
#[pyo3(name = "eight_team_pairings", signature = (start_day, max_search_nodes=DEFAULT_MAX_SEARCH_NODES))]
fn py_eight_team_pairings(
    start_day: DayNumber,
    max_search_nodes: usize,
) -> PyResult<Vec<(CompetitorId, CompetitorId)>> {
    let search = FillSearch {
        max_nodes: max_search_nodes,
        verbosity: 0,
    };
    let pairings = eight_team_pairings(start_day, search).map_err(to_py_err)?;
    Ok(pairings.into_iter().map(|p| (p.home, p.away)).collect())
}

/// Day numbers for `slot_count` slots under a day policy name.
#[pyfunction]
#[pyo3(name = "day_sequence")]
fn py_day_sequence(
    slot_count: usize,
    start_day: DayNumber,
    policy: String,
) -> PyResult<Vec<DayNumber>> {
    let policy: DayPolicy = policy.parse().map_err(to_py_err)?;
    day_sequence(slot_count, start_day, policy).map_err(to_py_err)
}

/// Time codes ("afternoon" / "evening") for a day sequence under a time policy name.
#[pyfunction]
#[pyo3(name = "time_sequence")]
fn py_time_sequence(days: Vec<DayNumber>, policy: String) -> PyResult<Vec<&'static str>> {
    let policy: TimePolicy = policy.parse().map_err(to_py_err)?;
    Ok(time_sequence(&days, policy)
        .iter()
        .map(|code| code.as_str())
        .collect())
}

/// The fixtures.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Fixture>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<SchedulingConfig>()?;
    m.add_class::<RenderConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(generate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_round_robin_pairings, m)?)?;
    m.add_function(wrap_pyfunction!(py_eight_team_pairings, m)?)?;
    m.add_function(wrap_pyfunction!(py_day_sequence, m)?)?;
    m.add_function(wrap_pyfunction!(py_time_sequence, m)?)?;

    Ok(())
}
