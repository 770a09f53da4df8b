use crate::DAYS_IN_WEEK;
use time::{
    Date, OffsetDateTime, UtcOffset,
    Weekday::{self, Saturday, Sunday},
};

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;

    /// Column of this weekday in a row that starts on `first`
    fn column(&self, first: Weekday) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }

    fn column(&self, first: Weekday) -> usize {
        (DAYS_IN_WEEK + self.index0() - first.index0()) % DAYS_IN_WEEK
    }
}

/// The calendar rules that pages are laid out against: which weekday starts a
/// row, which UTC offset instants are resolved in, and the short weekday names
/// used for header labels.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarSystem {
    first_weekday: Weekday,
    offset: UtcOffset,
    // Indexed from Sunday
    weekday_symbols: [String; DAYS_IN_WEEK],
}

impl CalendarSystem {
    pub fn new() -> CalendarSystem {
        CalendarSystem {
            first_weekday: Sunday,
            offset: UtcOffset::UTC,
            weekday_symbols: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(String::from),
        }
    }

    pub fn with_first_weekday(mut self, weekday: Weekday) -> CalendarSystem {
        self.first_weekday = weekday;
        self
    }

    pub fn with_offset(mut self, offset: UtcOffset) -> CalendarSystem {
        self.offset = offset;
        self
    }

    /// Replace the short weekday names.  `symbols` must start with Sunday.
    pub fn with_weekday_symbols(mut self, symbols: [String; DAYS_IN_WEEK]) -> CalendarSystem {
        self.weekday_symbols = symbols;
        self
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Resolve an instant to the calendar day it falls on in this calendar's
    /// UTC offset.  If the instant cannot be expressed in that offset (only
    /// possible at the very ends of the supported range), its own date is
    /// used.
    pub fn local_date(&self, moment: OffsetDateTime) -> Date {
        moment
            .checked_to_offset(self.offset)
            .map_or_else(|| moment.date(), OffsetDateTime::date)
    }

    pub fn today(&self) -> Date {
        self.local_date(OffsetDateTime::now_utc())
    }

    /// Upper-cased short weekday names, starting at the first weekday
    pub fn header_labels(&self) -> [String; DAYS_IN_WEEK] {
        let mut labels = self.weekday_symbols.clone();
        labels.rotate_left(self.first_weekday.index0());
        labels.map(|s| s.to_uppercase())
    }
}

impl Default for CalendarSystem {
    fn default() -> CalendarSystem {
        CalendarSystem::new()
    }
}

pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Saturday | Sunday)
}
