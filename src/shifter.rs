use time::{util::is_leap_year, Date, Month};

/// Moves a page's base date by whole pages
pub trait DateShifter {
    /// Shift `date` by `steps` pages.  If the result cannot be represented,
    /// `date` is returned unchanged.
    fn shift(&self, date: Date, steps: i32) -> Date;
}

impl<T: DateShifter + ?Sized> DateShifter for &T {
    fn shift(&self, date: Date, steps: i32) -> Date {
        (**self).shift(date, steps)
    }
}

/// Shifts dates by calendar months, clamping the day of month to the length
/// of the target month.
///
/// Clamping means shifts do not compose exactly: January 31 plus one month is
/// the last day of February, and shifting that back by one month gives
/// January 28 or 29, not 31.  The month reached is always the same, though.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct MonthlyShifter;

impl DateShifter for MonthlyShifter {
    fn shift(&self, date: Date, steps: i32) -> Date {
        add_months(date, steps).unwrap_or_else(|| {
            log::debug!("Cannot shift {date} by {steps} months; leaving it in place");
            date
        })
    }
}

/// Add `months` calendar months to `date`, returning `None` if the result
/// falls outside the range of [`Date`]
pub fn add_months(date: Date, months: i32) -> Option<Date> {
    let month0 = i64::from(u8::from(date.month())) - 1;
    let total = i64::from(date.year()) * 12 + month0 + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u8::try_from(total.rem_euclid(12) + 1).ok()?;
    let month = Month::try_from(month).ok()?;
    let day = date.day().min(month_length(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

fn month_length(year: i32, month: Month) -> u8 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}
