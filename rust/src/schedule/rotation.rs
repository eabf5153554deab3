//! Circle-method pairing order for an even number of competitors.

use crate::models::{CompetitorId, Pairing};

use super::core::ScheduleError;

/// Generate the home-and-away pairing order for `n` competitors.
///
/// Competitor 1 stays fixed while the rest rotate one place per round.
/// Each round pairs the front half (in order) against the back half
/// (reversed). The `n - 1` single rounds are followed by their mirror
/// images in the same order, giving `n * (n - 1)` pairings in total.
///
/// # Errors
/// * `InvalidInput` if `n < 2` or `n` is odd
pub fn round_robin_pairings(n: usize) -> Result<Vec<Pairing>, ScheduleError> {
    if n < 2 {
        return Err(ScheduleError::InvalidInput(format!(
            "round robin needs at least 2 competitors, got {}",
            n
        )));
    }
    if n % 2 != 0 {
        return Err(ScheduleError::InvalidInput(format!(
            "rotation schedule needs an even competitor count, got {}",
            n
        )));
    }

    let half = n / 2;
    let mut order: Vec<CompetitorId> = (1..=n as CompetitorId).collect();
    let mut pairings: Vec<Pairing> = Vec::with_capacity(n * (n - 1));

    push_round(&order, half, &mut pairings);
    for _ in 0..n - 2 {
        rotate(&mut order);
        push_round(&order, half, &mut pairings);
    }

    let single_round_robin = pairings.len();
    for i in 0..single_round_robin {
        let mirrored = pairings[i].mirrored();
        pairings.push(mirrored);
    }

    Ok(pairings)
}

fn push_round(order: &[CompetitorId], half: usize, out: &mut Vec<Pairing>) {
    let home = order[..half].iter();
    let away = order[half..].iter().rev();
    out.extend(home.zip(away).map(|(&h, &a)| Pairing::new(h, a)));
}

/// Keep index 0 fixed and move the last element into index 1.
fn rotate(order: &mut [CompetitorId]) {
    if order.len() > 2 {
        order[1..].rotate_right(1);
    }
}
