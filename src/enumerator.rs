use crate::system::WeekdayExt;
use crate::PAGE_CELLS;
use time::{Date, Duration, Weekday};

/// Lists the dates of the cells of one page.
///
/// After [`set_base()`](DateEnumerator::set_base), repeated calls to
/// [`advance()`](DateEnumerator::advance) yield the dates of cells `0`,
/// `1`, …, `PAGE_CELLS - 1` in order and then nothing until the enumerator is
/// anchored again.
pub trait DateEnumerator {
    /// Anchor the enumerator to the period containing `date` and rewind it
    fn set_base(&mut self, date: Date);

    fn advance(&mut self) -> Option<Date>;

    /// Date of the cell at `index`, regardless of how far the enumerator has
    /// advanced.  Returns `None` before the enumerator has been anchored and
    /// for indices outside the page.
    fn date_at(&self, index: usize) -> Option<Date>;

    /// Whether `date` lies in the period the enumerator is anchored to
    fn contains(&self, date: Date) -> bool;
}

/// Enumerates month pages: the first row starts on the configured first
/// weekday and holds the 1st of the month, preceded by the tail of the
/// previous month.
///
/// A month is at most 31 days and the 1st is at most six cells into the first
/// row, so every Gregorian month fits in the 42 cells of a page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthlyEnumerator {
    first_weekday: Weekday,
    anchor: Option<Anchor>,
    cursor: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Anchor {
    base: Date,
    first_day: Date,
    // Number of cells before `first_day`
    leading_offset: usize,
}

impl MonthlyEnumerator {
    pub fn new(first_weekday: Weekday) -> MonthlyEnumerator {
        MonthlyEnumerator {
            first_weekday,
            anchor: None,
            cursor: 0,
        }
    }

    pub fn base(&self) -> Option<Date> {
        self.anchor.map(|a| a.base)
    }

    pub fn first_day(&self) -> Option<Date> {
        self.anchor.map(|a| a.first_day)
    }

    pub fn leading_offset(&self) -> Option<usize> {
        self.anchor.map(|a| a.leading_offset)
    }
}

impl DateEnumerator for MonthlyEnumerator {
    fn set_base(&mut self, date: Date) {
        self.anchor = date.replace_day(1).ok().map(|first_day| Anchor {
            base: date,
            first_day,
            leading_offset: first_day.weekday().column(self.first_weekday),
        });
        self.cursor = 0;
    }

    fn advance(&mut self) -> Option<Date> {
        if self.anchor.is_none() || self.cursor >= PAGE_CELLS {
            return None;
        }
        let date = self.date_at(self.cursor);
        self.cursor += 1;
        date
    }

    fn date_at(&self, index: usize) -> Option<Date> {
        let anchor = self.anchor?;
        if index >= PAGE_CELLS {
            return None;
        }
        let days = i64::try_from(index).ok()? - i64::try_from(anchor.leading_offset).ok()?;
        anchor.first_day.checked_add(Duration::days(days))
    }

    fn contains(&self, date: Date) -> bool {
        self.anchor.is_some_and(|a| {
            (date.year(), date.month()) == (a.first_day.year(), a.first_day.month())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    fn drain<E: DateEnumerator>(enumerator: &mut E) -> Vec<Date> {
        std::iter::from_fn(|| enumerator.advance()).collect()
    }

    #[test]
    fn test_unanchored() {
        let mut e = MonthlyEnumerator::new(Sunday);
        assert_eq!(e.advance(), None);
        assert_eq!(e.date_at(0), None);
        assert_eq!(e.leading_offset(), None);
        assert!(!e.contains(date!(2024 - 03 - 10)));
    }

    #[test]
    fn test_march_2024_sunday_first() {
        let mut e = MonthlyEnumerator::new(Sunday);
        e.set_base(date!(2024 - 03 - 10));
        assert_eq!(e.base(), Some(date!(2024 - 03 - 10)));
        assert_eq!(e.first_day(), Some(date!(2024 - 03 - 01)));
        assert_eq!(e.leading_offset(), Some(5));
        assert_eq!(e.date_at(0), Some(date!(2024 - 02 - 25)));
        assert_eq!(e.date_at(4), Some(date!(2024 - 02 - 29)));
        assert_eq!(e.date_at(5), Some(date!(2024 - 03 - 01)));
        assert_eq!(e.date_at(35), Some(date!(2024 - 03 - 31)));
        assert_eq!(e.date_at(36), Some(date!(2024 - 04 - 01)));
        assert_eq!(e.date_at(41), Some(date!(2024 - 04 - 06)));
        assert_eq!(e.date_at(42), None);
    }

    #[test]
    fn test_march_2024_monday_first() {
        let mut e = MonthlyEnumerator::new(Monday);
        e.set_base(date!(2024 - 03 - 31));
        assert_eq!(e.leading_offset(), Some(4));
        assert_eq!(e.date_at(0), Some(date!(2024 - 02 - 26)));
        assert_eq!(e.date_at(4), Some(date!(2024 - 03 - 01)));
        assert_eq!(e.date_at(41), Some(date!(2024 - 04 - 07)));
    }

    #[test]
    fn test_month_starting_on_first_weekday() {
        // 2026-02-01 is a Sunday
        let mut e = MonthlyEnumerator::new(Sunday);
        e.set_base(date!(2026 - 02 - 14));
        assert_eq!(e.leading_offset(), Some(0));
        assert_eq!(e.date_at(0), Some(date!(2026 - 02 - 01)));
        assert_eq!(e.date_at(41), Some(date!(2026 - 03 - 14)));
        let mut e = MonthlyEnumerator::new(Monday);
        e.set_base(date!(2026 - 02 - 14));
        assert_eq!(e.leading_offset(), Some(6));
        assert_eq!(e.date_at(0), Some(date!(2026 - 01 - 26)));
    }

    #[test]
    fn test_leading_offset_in_range() {
        for first_weekday in [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday] {
            let mut e = MonthlyEnumerator::new(first_weekday);
            let mut base = date!(2023 - 01 - 15);
            for _ in 0..24 {
                e.set_base(base);
                let offset = e.leading_offset().unwrap();
                assert!(offset < 7);
                let first = e.date_at(offset).unwrap();
                assert_eq!(first.day(), 1);
                assert_eq!(e.date_at(0).unwrap().weekday(), first_weekday);
                base = crate::add_months(base, 1).unwrap();
            }
        }
    }

    #[test]
    fn test_advance_yields_full_page_then_stops() {
        let mut e = MonthlyEnumerator::new(Sunday);
        e.set_base(date!(2024 - 03 - 10));
        let dates = drain(&mut e);
        assert_eq!(dates.len(), PAGE_CELLS);
        assert_eq!(dates.first(), Some(&date!(2024 - 02 - 25)));
        assert_eq!(dates.last(), Some(&date!(2024 - 04 - 06)));
        for (d, next) in std::iter::zip(&dates, dates.iter().skip(1)) {
            assert_eq!(d.next_day(), Some(*next));
        }
        assert_eq!(e.advance(), None);
        assert_eq!(e.advance(), None);
        // date_at() is unaffected by the cursor
        assert_eq!(e.date_at(5), Some(date!(2024 - 03 - 01)));
    }

    #[test]
    fn test_set_base_rewinds() {
        let mut e = MonthlyEnumerator::new(Sunday);
        e.set_base(date!(2024 - 03 - 10));
        assert_eq!(e.advance(), Some(date!(2024 - 02 - 25)));
        assert_eq!(e.advance(), Some(date!(2024 - 02 - 26)));
        e.set_base(date!(2024 - 02 - 10));
        // 2024-02-01 is a Thursday
        assert_eq!(e.advance(), Some(date!(2024 - 01 - 28)));
        assert_eq!(drain(&mut e).len(), PAGE_CELLS - 1);
    }

    #[test]
    fn test_contains() {
        let mut e = MonthlyEnumerator::new(Sunday);
        e.set_base(date!(2024 - 03 - 10));
        assert!(e.contains(date!(2024 - 03 - 01)));
        assert!(e.contains(date!(2024 - 03 - 31)));
        assert!(!e.contains(date!(2024 - 02 - 29)));
        assert!(!e.contains(date!(2024 - 04 - 01)));
        assert!(!e.contains(date!(2023 - 03 - 10)));
    }

    #[test]
    fn test_end_of_time() {
        let mut e = MonthlyEnumerator::new(Sunday);
        e.set_base(date!(9999 - 12 - 25));
        assert_eq!(e.date_at(41), None);
        let dates = drain(&mut e);
        assert!(dates.len() < PAGE_CELLS);
        assert_eq!(dates.last(), Some(&Date::MAX));
    }
}
