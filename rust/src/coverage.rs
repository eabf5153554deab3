//! Completeness checks for a double round robin.

use rustc_hash::FxHashSet;

use crate::models::{CompetitorId, Pairing, Slot};

/// Ways a pairing sequence can fail to be a double round robin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    EmptySlot(usize),
    SelfPairing { slot: usize, competitor: CompetitorId },
    UnknownCompetitor { slot: usize, competitor: CompetitorId },
    Duplicate { slot: usize, pairing: Pairing },
    Missing(Vec<Pairing>),
}

impl std::fmt::Display for CoverageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySlot(slot) => write!(f, "Slot {} has no pairing", slot),
            Self::SelfPairing { slot, competitor } => {
                write!(f, "Slot {} pairs competitor {} with itself", slot, competitor)
            }
            Self::UnknownCompetitor { slot, competitor } => {
                write!(f, "Slot {} references unknown competitor {}", slot, competitor)
            }
            Self::Duplicate { slot, pairing } => write!(
                f,
                "Slot {} repeats pairing {} vs {}",
                slot, pairing.home, pairing.away
            ),
            Self::Missing(pairings) => {
                write!(f, "{} ordered pairings never scheduled", pairings.len())
            }
        }
    }
}

impl std::error::Error for CoverageError {}

/// Check that `pairings` contains every ordered pair of `1..=competitors`
/// exactly once and nothing else.
pub fn check_round_robin(pairings: &[Pairing], competitors: usize) -> Result<(), CoverageError> {
    let mut seen: FxHashSet<Pairing> =
        FxHashSet::with_capacity_and_hasher(pairings.len(), Default::default());
    let max = competitors as CompetitorId;

    for (slot, pairing) in pairings.iter().enumerate() {
        for competitor in [pairing.home, pairing.away] {
            if competitor == 0 || competitor > max {
                return Err(CoverageError::UnknownCompetitor { slot, competitor });
            }
        }
        if pairing.home == pairing.away {
            return Err(CoverageError::SelfPairing {
                slot,
                competitor: pairing.home,
            });
        }
        if !seen.insert(*pairing) {
            return Err(CoverageError::Duplicate {
                slot,
                pairing: *pairing,
            });
        }
    }

    let missing: Vec<Pairing> = (1..=max)
        .flat_map(|home| (1..=max).map(move |away| Pairing::new(home, away)))
        .filter(|p| p.home != p.away && !seen.contains(p))
        .collect();
    if !missing.is_empty() {
        return Err(CoverageError::Missing(missing));
    }

    Ok(())
}

/// Slot-level variant: every slot must hold a pairing.
pub fn check_slots(slots: &[Slot], competitors: usize) -> Result<(), CoverageError> {
    let pairings = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| slot.pairing.ok_or(CoverageError::EmptySlot(i)))
        .collect::<Result<Vec<Pairing>, CoverageError>>()?;
    check_round_robin(&pairings, competitors)
}
