//! Eight-competitor generator: a seeded opening round and a constrained fill.
//!
//! The first four slots come from a hand-tuned table keyed by start day. The
//! remaining 52 ordered pairings are placed by scanning a pool of pending
//! pairings in lexicographic order and committing each to the first empty slot
//! whose immediate predecessors are filled and share no competitor with it.
//!
//! The plain scan can paint itself into a corner: a pool entry that fits
//! nowhere. The fill is therefore run as a depth-first search whose first
//! branch is exactly that scan. On a dead end the latest commitment is undone
//! and the next candidate in the same cyclic pool order is tried. A node budget
//! bounds the search.

use crate::config::DEFAULT_MAX_SEARCH_NODES;
use crate::models::{CompetitorId, DayNumber, Pairing, Slot};
use crate::{log_changes, log_checks, log_debug};

use super::core::ScheduleError;

/// Competitor count served by this engine.
pub const COMPETITORS: usize = 8;

/// Total slots: every ordered pair once.
pub const SLOT_COUNT: usize = COMPETITORS * (COMPETITORS - 1);

/// First slot the fill may touch; slots before it are seeded.
const FILL_START: usize = COMPETITORS / 2;

/// Opening pairings per start day (index 0 = day 1).
const SEEDS: [[(CompetitorId, CompetitorId); FILL_START]; 7] = [
    [(1, 2), (3, 4), (5, 6), (7, 8)],
    [(1, 2), (3, 4), (1, 5), (2, 3)],
    [(1, 6), (2, 4), (1, 5), (2, 3)],
    [(1, 2), (3, 4), (1, 5), (2, 3)],
    [(1, 2), (8, 7), (3, 4), (2, 1)],
    [(1, 7), (5, 6), (8, 3), (2, 1)],
    [(1, 8), (2, 4), (1, 5), (3, 4)],
];

/// Limits and logging for the fill search.
#[derive(Clone, Copy, Debug)]
pub struct FillSearch {
    pub max_nodes: usize,
    pub verbosity: u8,
}

impl Default for FillSearch {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_SEARCH_NODES,
            verbosity: 0,
        }
    }
}

/// Statistics from a completed fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Pairings committed, including ones later undone
    pub nodes: usize,
    /// Commitments undone after a dead end
    pub backtracks: usize,
}

/// Opening pairings for `start_day`.
pub fn seed_pairings(start_day: DayNumber) -> Result<[Pairing; FILL_START], ScheduleError> {
    let row = start_day
        .checked_sub(1)
        .and_then(|i| SEEDS.get(i as usize))
        .ok_or_else(|| {
            ScheduleError::InvalidInput(format!("start day must be 1..=7, got {}", start_day))
        })?;
    Ok((*row).map(Pairing::from))
}

/// Generate the 56-pairing order for eight competitors starting on `start_day`.
pub fn eight_team_pairings(
    start_day: DayNumber,
    search: FillSearch,
) -> Result<Vec<Pairing>, ScheduleError> {
    let mut slots = vec![Slot::default(); SLOT_COUNT];
    fill_slots(&mut slots, start_day, search)?;
    Ok(slots.iter().filter_map(|slot| slot.pairing).collect())
}

/// Seed and fill `slots` (which must hold `SLOT_COUNT` empty slots).
pub(crate) fn fill_slots(
    slots: &mut [Slot],
    start_day: DayNumber,
    search: FillSearch,
) -> Result<FillOutcome, ScheduleError> {
    if slots.len() != SLOT_COUNT {
        return Err(ScheduleError::InvalidInput(format!(
            "eight-team fill needs {} slots, got {}",
            SLOT_COUNT,
            slots.len()
        )));
    }

    let seeds = seed_pairings(start_day)?;
    let mut pool = Pool::full();
    for (slot, pairing) in slots.iter_mut().zip(seeds) {
        *slot = Slot::filled(pairing);
        pool.mark_scheduled(pairing);
    }
    log_changes!(
        search.verbosity,
        "Seeded {} slots for start day {}, {} pairings pending",
        FILL_START,
        start_day,
        pool.pending
    );

    search_fill(slots, &mut pool, search)
}

/// Pending pairings in lexicographic order; `None` marks scheduled entries.
struct Pool {
    entries: Vec<Option<Pairing>>,
    pending: usize,
}

impl Pool {
    fn full() -> Self {
        let max = COMPETITORS as CompetitorId;
        let entries: Vec<Option<Pairing>> = (1..=max)
            .flat_map(|home| (1..=max).map(move |away| (home, away)))
            .filter(|(home, away)| home != away)
            .map(|p| Some(Pairing::from(p)))
            .collect();
        let pending = entries.len();
        Self { entries, pending }
    }

    fn mark_scheduled(&mut self, pairing: Pairing) {
        for entry in &mut self.entries {
            if *entry == Some(pairing) {
                *entry = None;
                self.pending -= 1;
            }
        }
    }

    fn take(&mut self, index: usize) -> Option<Pairing> {
        let taken = self.entries[index].take();
        if taken.is_some() {
            self.pending -= 1;
        }
        taken
    }

    fn restore(&mut self, index: usize, pairing: Pairing) {
        self.entries[index] = Some(pairing);
        self.pending += 1;
    }
}

/// A committed pairing and where the scan stood when it was chosen.
struct Commitment {
    pool_index: usize,
    slot: usize,
    scan_start: usize,
    offset: usize,
}

fn search_fill(
    slots: &mut [Slot],
    pool: &mut Pool,
    search: FillSearch,
) -> Result<FillOutcome, ScheduleError> {
    let verbosity = search.verbosity;
    let pool_len = pool.entries.len();
    let mut trail: Vec<Commitment> = Vec::with_capacity(pool.pending);
    let mut outcome = FillOutcome::default();
    let mut scan_start = 0;
    let mut offset = 0;

    while pool.pending > 0 {
        match next_candidate(slots, pool, scan_start, offset, verbosity) {
            Some((found_offset, pool_index, slot)) => {
                outcome.nodes += 1;
                if outcome.nodes > search.max_nodes {
                    return Err(stalled(slots, pool, outcome));
                }
                let Some(pairing) = pool.take(pool_index) else {
                    return Err(stalled(slots, pool, outcome));
                };
                slots[slot].pairing = Some(pairing);
                log_changes!(
                    verbosity,
                    "  Slot {} <- {} vs {}",
                    slot,
                    pairing.home,
                    pairing.away
                );
                trail.push(Commitment {
                    pool_index,
                    slot,
                    scan_start,
                    offset: found_offset,
                });
                scan_start = (pool_index + 1) % pool_len;
                offset = 0;
            }
            None => {
                let Some(last) = trail.pop() else {
                    return Err(stalled(slots, pool, outcome));
                };
                if let Some(pairing) = slots[last.slot].pairing.take() {
                    log_checks!(
                        verbosity,
                        "  Dead end with {} pending, undoing slot {} ({} vs {})",
                        pool.pending,
                        last.slot,
                        pairing.home,
                        pairing.away
                    );
                    pool.restore(last.pool_index, pairing);
                }
                outcome.backtracks += 1;
                scan_start = last.scan_start;
                offset = last.offset + 1;
            }
        }
    }

    log_changes!(
        verbosity,
        "Fill complete: {} nodes, {} backtracks",
        outcome.nodes,
        outcome.backtracks
    );
    Ok(outcome)
}

/// Find the next pool entry (in cyclic order from `scan_start`, skipping the
/// first `offset` positions) that fits some empty slot.
///
/// Returns (offset, pool index, slot index).
fn next_candidate(
    slots: &[Slot],
    pool: &Pool,
    scan_start: usize,
    offset: usize,
    verbosity: u8,
) -> Option<(usize, usize, usize)> {
    let pool_len = pool.entries.len();
    (offset..pool_len).find_map(|o| {
        let index = (scan_start + o) % pool_len;
        let pairing = pool.entries[index]?;
        let slot = find_slot(slots, pairing);
        if slot.is_none() {
            log_debug!(
                verbosity,
                "    {} vs {} fits no open slot",
                pairing.home,
                pairing.away
            );
        }
        slot.map(|slot| (o, index, slot))
    })
}

/// First empty slot at or after `FILL_START` that accepts `pairing`.
fn find_slot(slots: &[Slot], pairing: Pairing) -> Option<usize> {
    (FILL_START..slots.len()).find(|&j| slots[j].is_empty() && can_assign(slots, pairing, j))
}

/// The preceding `gap` slots must be filled and must not involve either side.
fn can_assign(slots: &[Slot], pairing: Pairing, j: usize) -> bool {
    // Days are stamped after the fill, so the wider gap never triggers in the pipeline.
    let gap = if slots[j].day == Some(1) { 2 } else { 1 };
    (1..=gap)
        .take_while(|&k| k <= j)
        .all(|k| match slots[j - k].pairing {
            Some(prev) => !prev.shares_competitor(&pairing),
            None => false,
        })
}

fn stalled(slots: &[Slot], pool: &Pool, outcome: FillOutcome) -> ScheduleError {
    ScheduleError::StallDetected {
        filled: slots.iter().filter(|s| !s.is_empty()).count(),
        remaining: pool.pending,
        nodes: outcome.nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::check_round_robin;

    fn p(home: CompetitorId, away: CompetitorId) -> Pairing {
        Pairing::new(home, away)
    }

    fn filled_slots(start_day: DayNumber) -> (Vec<Slot>, FillOutcome) {
        let mut slots = vec![Slot::default(); SLOT_COUNT];
        let outcome = fill_slots(&mut slots, start_day, FillSearch::default()).unwrap();
        (slots, outcome)
    }

    #[test]
    fn test_every_start_day_covers_all_pairs() {
        for day in 1..=7 {
            let pairings = eight_team_pairings(day, FillSearch::default()).unwrap();
            assert_eq!(pairings.len(), SLOT_COUNT, "day {}", day);
            check_round_robin(&pairings, COMPETITORS).unwrap();
        }
    }

    #[test]
    fn test_seeds_occupy_opening_slots() {
        for day in 1..=7 {
            let pairings = eight_team_pairings(day, FillSearch::default()).unwrap();
            let seeds = seed_pairings(day).unwrap();
            assert_eq!(&pairings[..FILL_START], &seeds[..], "day {}", day);
        }
    }

    #[test]
    fn test_filled_slots_never_follow_a_shared_competitor() {
        for day in 1..=7 {
            let pairings = eight_team_pairings(day, FillSearch::default()).unwrap();
            for j in FILL_START..pairings.len() {
                assert!(
                    !pairings[j].shares_competitor(&pairings[j - 1]),
                    "day {} slot {}: {:?} after {:?}",
                    day,
                    j,
                    pairings[j],
                    pairings[j - 1]
                );
            }
        }
    }

    #[test]
    fn test_deterministic_per_start_day() {
        for day in 1..=7 {
            let first = eight_team_pairings(day, FillSearch::default()).unwrap();
            let second = eight_team_pairings(day, FillSearch::default()).unwrap();
            assert_eq!(first, second, "day {}", day);
        }
    }

    #[test]
    fn test_day_one_follows_pool_order() {
        let (slots, outcome) = filled_slots(1);
        let opening: Vec<Pairing> = slots[FILL_START..12]
            .iter()
            .filter_map(|s| s.pairing)
            .collect();
        assert_eq!(
            opening,
            vec![
                p(1, 3),
                p(2, 4),
                p(3, 1),
                p(4, 2),
                p(5, 1),
                p(6, 2),
                p(7, 1),
                p(8, 2)
            ]
        );
        // The plain scan completes without undoing anything
        assert_eq!(outcome.backtracks, 0);
        assert_eq!(outcome.nodes, SLOT_COUNT - FILL_START);
    }

    #[test]
    fn test_stalled_scan_recovers_by_backtracking() {
        let (slots, outcome) = filled_slots(2);
        assert!(slots.iter().all(|s| !s.is_empty()));
        assert_eq!(outcome.backtracks, 26);
        assert_eq!(outcome.nodes, SLOT_COUNT - FILL_START + outcome.backtracks);

        // Retries keep cyclic pool order, so the opening after the seeds is fixed
        let opening: Vec<Pairing> = slots[FILL_START..14]
            .iter()
            .filter_map(|s| s.pairing)
            .collect();
        assert_eq!(
            opening,
            vec![
                p(1, 4),
                p(2, 5),
                p(3, 1),
                p(4, 2),
                p(5, 1),
                p(6, 2),
                p(7, 1),
                p(8, 2),
                p(1, 3),
                p(2, 4)
            ]
        );
    }

    #[test]
    fn test_day_seven_backtracks_briefly() {
        let (slots, outcome) = filled_slots(7);
        assert_eq!(outcome.backtracks, 5);
        assert_eq!(slots[FILL_START].pairing, Some(p(1, 2)));
        assert_eq!(slots[FILL_START + 1].pairing, Some(p(3, 5)));
    }

    #[test]
    fn test_budget_exhaustion_reports_stall() {
        let search = FillSearch {
            max_nodes: 10,
            verbosity: 0,
        };
        match eight_team_pairings(1, search) {
            Err(ScheduleError::StallDetected {
                filled,
                remaining,
                nodes,
            }) => {
                assert_eq!(filled, FILL_START + 10);
                assert_eq!(remaining, SLOT_COUNT - FILL_START - 10);
                assert_eq!(nodes, 11);
            }
            other => panic!("expected stall, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_start_day() {
        for day in [0, 8] {
            assert!(matches!(
                eight_team_pairings(day, FillSearch::default()),
                Err(ScheduleError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_wider_gap_only_when_day_one_is_stamped() {
        let mut slots = vec![Slot::default(); 3];
        slots[0].pairing = Some(p(1, 2));
        slots[1].pairing = Some(p(3, 4));

        // Unstamped: only the previous slot matters
        assert!(can_assign(&slots, p(1, 5), 2));

        // Stamped day 1: the two previous slots matter
        slots[2].day = Some(1);
        assert!(!can_assign(&slots, p(1, 5), 2));
        assert!(can_assign(&slots, p(5, 6), 2));
    }

    #[test]
    fn test_cannot_skip_past_empty_slot() {
        let mut slots = vec![Slot::default(); 3];
        slots[0].pairing = Some(p(1, 2));
        assert!(!can_assign(&slots, p(3, 4), 2));
        assert!(can_assign(&slots, p(3, 4), 1));
    }

    #[test]
    fn test_pool_excludes_seeds() {
        let mut pool = Pool::full();
        assert_eq!(pool.pending, SLOT_COUNT);
        assert_eq!(pool.entries[0], Some(p(1, 2)));
        assert_eq!(pool.entries[SLOT_COUNT - 1], Some(p(8, 7)));
        pool.mark_scheduled(p(1, 2));
        assert_eq!(pool.pending, SLOT_COUNT - 1);
        assert_eq!(pool.entries[0], None);
    }
}
