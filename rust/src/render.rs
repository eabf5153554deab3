//! Rendering slots into display fixtures with caller-supplied name tables.

use chrono::{NaiveTime, Weekday};

use crate::config::RenderConfig;
use crate::models::{CompetitorId, DayNumber, Fixture, Slot, TimeCode};
use crate::schedule::ScheduleError;

/// Team and venue names injected by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    /// Team names; competitor `k` is `teams[k - 1]`
    pub teams: Vec<String>,
    /// Venue names, cycled by slot index. Empty = synthesized stadium names
    pub venues: Vec<String>,
}

impl Roster {
    pub fn new(teams: Vec<String>, venues: Vec<String>) -> Self {
        Self { teams, venues }
    }

    fn team(&self, id: CompetitorId) -> &str {
        (id as usize)
            .checked_sub(1)
            .and_then(|i| self.teams.get(i))
            .map_or("", |s| s.as_str())
    }
}

/// Lazy iterator over the rendered fixtures of a schedule.
pub struct Fixtures<'a> {
    slots: std::iter::Enumerate<std::slice::Iter<'a, Slot>>,
    competitors: usize,
    roster: &'a Roster,
    week_start: Weekday,
    afternoon: String,
    evening: String,
}

impl Fixtures<'_> {
    fn venue(&self, index: usize) -> String {
        if self.roster.venues.is_empty() {
            format!("Stadium {}", (index % self.competitors) + 1)
        } else {
            self.roster.venues[index % self.roster.venues.len()].clone()
        }
    }

    fn time(&self, code: TimeCode) -> &str {
        match code {
            TimeCode::Afternoon => self.afternoon.as_str(),
            TimeCode::Evening => self.evening.as_str(),
        }
    }
}

impl Iterator for Fixtures<'_> {
    type Item = Fixture;

    fn next(&mut self) -> Option<Fixture> {
        loop {
            let (index, slot) = self.slots.next()?;
            // Only fully stamped slots are renderable
            let (Some(pairing), Some(day), Some(time)) = (slot.pairing, slot.day, slot.time) else {
                continue;
            };
            return Some(Fixture {
                sequence: index + 1,
                day: weekday_name(day_to_weekday(self.week_start, day)).to_string(),
                time: self.time(time).to_string(),
                home: self.roster.team(pairing.home).to_string(),
                away: self.roster.team(pairing.away).to_string(),
                venue: self.venue(index),
            });
        }
    }
}

/// Validate the name tables and build a fixture iterator over `slots`.
pub(crate) fn render<'a>(
    slots: &'a [Slot],
    competitors: usize,
    roster: &'a Roster,
    config: &RenderConfig,
) -> Result<Fixtures<'a>, ScheduleError> {
    if roster.teams.len() < competitors {
        return Err(ScheduleError::OutOfRange {
            what: "team names",
            needed: competitors,
            available: roster.teams.len(),
        });
    }
    if !(1..=7).contains(&config.week_start) {
        return Err(ScheduleError::InvalidInput(format!(
            "week start must be 1..=7, got {}",
            config.week_start
        )));
    }

    Ok(Fixtures {
        slots: slots.iter().enumerate(),
        competitors,
        roster,
        week_start: day_to_weekday(Weekday::Mon, config.week_start),
        afternoon: clock_label(config.afternoon_time),
        evening: clock_label(config.evening_time),
    })
}

/// Weekday for day number `day` (1-based) in a week beginning on `week_start`.
pub fn day_to_weekday(week_start: Weekday, day: DayNumber) -> Weekday {
    (1..day).fold(week_start, |weekday, _| weekday.succ())
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 12-hour clock label, e.g. "3:30 PM".
pub fn clock_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}
