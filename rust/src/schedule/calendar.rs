//! Day and time stamping over an ordered slot sequence.
//!
//! Day numbers run 1..=7 and wrap; which weekday day 1 is depends on the
//! render configuration, not on anything here.

use std::str::FromStr;

use crate::models::{DayNumber, TimeCode};

use super::core::ScheduleError;

/// How consecutive slots advance through the week.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayPolicy {
    /// One slot per day through day 5, then two slots per day on days 6 and 7.
    StandardGap,
    /// Every other day.
    FixedGapOfTwo,
    /// One slot per day.
    Daily,
}

impl DayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StandardGap => "standard_gap",
            Self::FixedGapOfTwo => "fixed_gap_2",
            Self::Daily => "daily",
        }
    }
}

impl FromStr for DayPolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard_gap" => Ok(Self::StandardGap),
            "fixed_gap_2" => Ok(Self::FixedGapOfTwo),
            "daily" => Ok(Self::Daily),
            other => Err(ScheduleError::UnknownPolicy(other.to_string())),
        }
    }
}

/// How time codes are chosen for stamped days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimePolicy {
    /// Evenings on weekdays and for the final slot, alternating on days 6 and 7.
    AlternateWithWeekendCollapse,
    AllEvening,
}

impl TimePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlternateWithWeekendCollapse => "alternate",
            Self::AllEvening => "all_evening",
        }
    }
}

impl FromStr for TimePolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alternate" => Ok(Self::AlternateWithWeekendCollapse),
            "all_evening" => Ok(Self::AllEvening),
            other => Err(ScheduleError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Compute the day number for each of `slot_count` slots.
///
/// # Errors
/// * `InvalidInput` if `start_day` is outside 1..=7
pub fn day_sequence(
    slot_count: usize,
    start_day: DayNumber,
    policy: DayPolicy,
) -> Result<Vec<DayNumber>, ScheduleError> {
    if !(1..=7).contains(&start_day) {
        return Err(ScheduleError::InvalidInput(format!(
            "start day must be 1..=7, got {}",
            start_day
        )));
    }
    let mut days: Vec<DayNumber> = vec![0; slot_count];
    if slot_count == 0 {
        return Ok(days);
    }
    days[0] = start_day;

    match policy {
        DayPolicy::StandardGap => {
            let mut i = 1;
            while i < slot_count {
                let prev = days[i - 1];
                if prev < 5 {
                    days[i] = prev + 1;
                    i += 1;
                } else if i == slot_count - 1 {
                    days[i] = (prev % 7) + 1;
                    i += 1;
                } else if prev < 7 {
                    // Weekend day hosts two slots
                    days[i] = prev + 1;
                    days[i + 1] = prev + 1;
                    i += 2;
                } else {
                    days[i] = 1;
                    i += 1;
                }
            }
        }
        DayPolicy::FixedGapOfTwo => {
            for i in 1..slot_count {
                days[i] = ((days[i - 1] + 1) % 7) + 1;
            }
        }
        DayPolicy::Daily => {
            for i in 1..slot_count {
                days[i] = (days[i - 1] % 7) + 1;
            }
        }
    }

    Ok(days)
}

/// Compute the time code for each stamped day.
pub fn time_sequence(days: &[DayNumber], policy: TimePolicy) -> Vec<TimeCode> {
    match policy {
        TimePolicy::AllEvening => vec![TimeCode::Evening; days.len()],
        TimePolicy::AlternateWithWeekendCollapse => {
            let last = days.len().saturating_sub(1);
            let mut times: Vec<TimeCode> = Vec::with_capacity(days.len());
            for (i, &day) in days.iter().enumerate() {
                let code = if i == last || day <= 5 {
                    TimeCode::Evening
                } else if times.last() == Some(&TimeCode::Afternoon) {
                    TimeCode::Evening
                } else {
                    TimeCode::Afternoon
                };
                times.push(code);
            }
            times
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gap_doubles_weekend_days() {
        let days = day_sequence(10, 1, DayPolicy::StandardGap).unwrap();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 6, 7, 7, 1]);
    }

    #[test]
    fn test_standard_gap_wraps_after_sunday() {
        let days = day_sequence(14, 1, DayPolicy::StandardGap).unwrap();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 6, 7, 7, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_standard_gap_last_slot_never_doubles() {
        // Slot 5 would start a double day but is the final slot
        let days = day_sequence(6, 1, DayPolicy::StandardGap).unwrap();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6]);

        let days = day_sequence(3, 7, DayPolicy::StandardGap).unwrap();
        assert_eq!(days, vec![7, 1, 2]);
    }

    #[test]
    fn test_fixed_gap_of_two() {
        let days = day_sequence(12, 1, DayPolicy::FixedGapOfTwo).unwrap();
        assert_eq!(days, vec![1, 3, 5, 7, 2, 4, 6, 1, 3, 5, 7, 2]);
    }

    #[test]
    fn test_daily_wraps() {
        let days = day_sequence(9, 5, DayPolicy::Daily).unwrap();
        assert_eq!(days, vec![5, 6, 7, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rejects_out_of_range_start_day() {
        for (start_day, policy) in [
            (0, DayPolicy::StandardGap),
            (8, DayPolicy::Daily),
            (255, DayPolicy::FixedGapOfTwo),
        ] {
            assert!(matches!(
                day_sequence(4, start_day, policy),
                Err(ScheduleError::InvalidInput(_))
            ));
        }
        // Checked even when there is nothing to stamp
        assert!(day_sequence(0, 9, DayPolicy::Daily).is_err());
    }

    #[test]
    fn test_empty_sequence() {
        assert!(day_sequence(0, 3, DayPolicy::StandardGap).unwrap().is_empty());
        assert!(time_sequence(&[], TimePolicy::AlternateWithWeekendCollapse).is_empty());
    }

    #[test]
    fn test_alternate_times() {
        use TimeCode::{Afternoon, Evening};

        let days = day_sequence(10, 1, DayPolicy::StandardGap).unwrap();
        let times = time_sequence(&days, TimePolicy::AlternateWithWeekendCollapse);
        // days: 1 2 3 4 5 6 6 7 7 1
        assert_eq!(
            times,
            vec![
                Evening, Evening, Evening, Evening, Evening, Afternoon, Evening, Afternoon,
                Evening, Evening
            ]
        );
    }

    #[test]
    fn test_alternate_weekday_and_last_slot_are_evening() {
        let days = day_sequence(12, 1, DayPolicy::FixedGapOfTwo).unwrap();
        let times = time_sequence(&days, TimePolicy::AlternateWithWeekendCollapse);
        for (day, time) in days.iter().zip(&times) {
            if *day <= 5 {
                assert_eq!(*time, TimeCode::Evening);
            }
        }
        // Final day is 2 here; a weekend final must still be an evening game
        assert_eq!(times.last(), Some(&TimeCode::Evening));
        let weekend_final = time_sequence(&[5, 6, 7], TimePolicy::AlternateWithWeekendCollapse);
        assert_eq!(
            weekend_final,
            vec![TimeCode::Evening, TimeCode::Afternoon, TimeCode::Evening]
        );
    }

    #[test]
    fn test_first_slot_on_weekend_is_afternoon() {
        let times = time_sequence(&[6, 7], TimePolicy::AlternateWithWeekendCollapse);
        assert_eq!(times, vec![TimeCode::Afternoon, TimeCode::Evening]);
    }

    #[test]
    fn test_all_evening() {
        let days = day_sequence(5, 6, DayPolicy::Daily).unwrap();
        let times = time_sequence(&days, TimePolicy::AllEvening);
        assert!(times.iter().all(|t| *t == TimeCode::Evening));
    }

    #[test]
    fn test_policy_names_round_trip() {
        for policy in [DayPolicy::StandardGap, DayPolicy::FixedGapOfTwo, DayPolicy::Daily] {
            assert_eq!(policy.as_str().parse::<DayPolicy>().unwrap(), policy);
        }
        for policy in [TimePolicy::AlternateWithWeekendCollapse, TimePolicy::AllEvening] {
            assert_eq!(policy.as_str().parse::<TimePolicy>().unwrap(), policy);
        }
        assert!("weekly".parse::<TimePolicy>().is_err());
    }
}
