//! The working days of a sprint (Monday to Friday)

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Returns whether a date falls on a Saturday or a Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The working days between two inclusive boundaries.
///
/// This is only a description of the range: it can be iterated as many times as needed,
/// and always yields the days in ascending order.
/// If `end` is before `start`, it contains no day at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkingDays {
    start: NaiveDate,
    end: NaiveDate,
}

impl WorkingDays {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate   { self.end   }

    /// Iterate over the working days, in ascending order
    pub fn iter(&self) -> WorkingDaysIter {
        WorkingDaysIter {
            next: Some(self.start),
            end: self.end,
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Returns whether `date` is one of these working days
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end && is_weekend(date) == false
    }
}

impl IntoIterator for WorkingDays {
    type Item = NaiveDate;
    type IntoIter = WorkingDaysIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &WorkingDays {
    type Item = NaiveDate;
    type IntoIter = WorkingDaysIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// See [`WorkingDays::iter`]
#[derive(Clone, Debug)]
pub struct WorkingDaysIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for WorkingDaysIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(current) = self.next {
            if current > self.end {
                self.next = None;
                break;
            }
            // Stepping past the last representable date ends the sequence
            self.next = current.checked_add_signed(Duration::days(1));
            if is_weekend(current) == false {
                return Some(current);
            }
        }
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn full_week() {
        let days = WorkingDays::new(date("2025-04-07"), date("2025-04-11"));
        let list: Vec<_> = days.iter().collect();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0], date("2025-04-07"));
        assert_eq!(list[4], date("2025-04-11"));
        assert!(list.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn weekend_only() {
        let days = WorkingDays::new(date("2025-04-12"), date("2025-04-13"));
        assert!(days.is_empty());
        assert_eq!(days.len(), 0);
    }

    #[test]
    fn reversed_range() {
        let days = WorkingDays::new(date("2025-04-11"), date("2025-04-07"));
        assert!(days.is_empty());
    }

    #[test]
    fn two_weeks_skip_weekend() {
        let days = WorkingDays::new(date("2025-04-07"), date("2025-04-20"));
        assert_eq!(days.len(), 10);
        assert!(days.iter().all(|d| is_weekend(d) == false));
        // Iterating again yields the same sequence
        assert_eq!(days.iter().collect::<Vec<_>>(), days.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn membership() {
        let days = WorkingDays::new(date("2025-04-07"), date("2025-04-20"));
        assert!(days.contains(date("2025-04-08")));
        assert!(days.contains(date("2025-04-12")) == false);
        assert!(days.contains(date("2025-04-21")) == false);
        assert!(days.contains(date("2025-04-04")) == false);
    }
}
