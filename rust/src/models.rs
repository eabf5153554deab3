//! Core data types for fixture scheduling.

use pyo3::prelude::*;
use std::collections::HashMap;
use std::fmt;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Competitor id: 1-based index into the caller's name table.
pub type CompetitorId = u32;

/// Day number within the week (1..=7).
pub type DayNumber = u8;

/// An ordered pairing: `home` hosts `away`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pairing {
    pub home: CompetitorId,
    pub away: CompetitorId,
}

impl Pairing {
    pub const fn new(home: CompetitorId, away: CompetitorId) -> Self {
        Self { home, away }
    }

    /// The return fixture: sides swapped.
    pub const fn mirrored(self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }

    /// True if either side is `id`.
    #[inline]
    pub fn involves(&self, id: CompetitorId) -> bool {
        self.home == id || self.away == id
    }

    /// True if the two pairings have any competitor in common.
    #[inline]
    pub fn shares_competitor(&self, other: &Pairing) -> bool {
        other.involves(self.home) || other.involves(self.away)
    }
}

impl From<(CompetitorId, CompetitorId)> for Pairing {
    fn from((home, away): (CompetitorId, CompetitorId)) -> Self {
        Self::new(home, away)
    }
}

/// Time-of-day code. Rendered through `RenderConfig`, never stored as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeCode {
    Afternoon,
    Evening,
}

impl TimeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

/// One position in the ordered fixture sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    /// `None` until an engine commits a pairing here
    pub pairing: Option<Pairing>,
    pub day: Option<DayNumber>,
    pub time: Option<TimeCode>,
}

impl Slot {
    pub fn filled(pairing: Pairing) -> Self {
        Self {
            pairing: Some(pairing),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairing.is_none()
    }
}

/// A fixture rendered for display.
#[pyclass(frozen)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    /// Slot position + 1
    #[pyo3(get)]
    pub sequence: usize,
    #[pyo3(get)]
    pub day: String,
    #[pyo3(get)]
    pub time: String,
    #[pyo3(get)]
    pub home: String,
    #[pyo3(get)]
    pub away: String,
    #[pyo3(get)]
    pub venue: String,
}

#[pymethods]
impl Fixture {
    fn __repr__(&self) -> String {
        format!(
            "Fixture(sequence={}, day={:?}, time={:?}, home={:?}, away={:?}, venue={:?})",
            self.sequence, self.day, self.time, self.home, self.away, self.venue
        )
    }

    fn __str__(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Match {} | Day: {} | Time: {} | Match: ({} vs {}) | Venue: {}",
            self.sequence, self.day, self.time, self.home, self.away, self.venue
        )
    }
}

/// Rendered fixtures plus how they were produced.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleResult {
    #[pyo3(get)]
    pub fixtures: Vec<Fixture>,
    #[pyo3(get)]
    pub algorithm_metadata: HashMap<String, String>,
}

#[pymethods]
impl ScheduleResult {
    fn __len__(&self) -> usize {
        self.fixtures.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(fixtures={}, metadata_keys={})",
            self.fixtures.len(),
            self.algorithm_metadata.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_mirror_and_overlap() {
        let p = Pairing::new(1, 4);
        assert_eq!(p.mirrored(), Pairing::new(4, 1));
        assert!(p.involves(4));
        assert!(!p.involves(2));
        assert!(p.shares_competitor(&Pairing::new(4, 2)));
        assert!(!p.shares_competitor(&Pairing::new(2, 3)));
    }

    #[test]
    fn test_filled_slot_awaits_stamping() {
        let slot = Slot::filled(Pairing::new(2, 5));
        assert!(!slot.is_empty());
        assert_eq!(slot.pairing, Some(Pairing::new(2, 5)));
        assert_eq!((slot.day, slot.time), (None, None));
        assert!(Slot::default().is_empty());
    }

    #[test]
    fn test_fixture_display_line() {
        let fixture = Fixture {
            sequence: 3,
            day: "Friday".to_string(),
            time: "7:30 PM".to_string(),
            home: "Lions".to_string(),
            away: "Tigers".to_string(),
            venue: "Stadium 3".to_string(),
        };
        assert_eq!(
            fixture.to_string(),
            "Match 3 | Day: Friday | Time: 7:30 PM | Match: (Lions vs Tigers) | Venue: Stadium 3"
        );
    }
}
