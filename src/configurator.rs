use crate::enumerator::{DateEnumerator, MonthlyEnumerator};
use crate::system::{is_weekend, CalendarSystem};
use crate::{DAYS_IN_WEEK, PAGE_CELLS};
use std::fmt;
use std::slice::Chunks;
use time::Date;

pub type Predicate = Box<dyn Fn(Date) -> bool>;

pub type Formatter = Box<dyn Fn(Date) -> String>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DayStyle {
    Weekday,
    Holiday,
    /// The day belongs to the month before or after the one the page shows
    OutOfPeriod,
}

/// Everything a renderer needs to draw one cell of a page
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DayModel {
    pub date: Date,
    pub text: String,
    pub style: DayStyle,
    pub is_marked: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page {
    /// The date the page was configured from
    pub base: Date,
    pub header: [String; DAYS_IN_WEEK],
    /// Row-major.  A cell is `None` only when its date falls outside the
    /// representable range of dates.
    pub cells: [Option<DayModel>; PAGE_CELLS],
}

impl Page {
    pub fn rows(&self) -> Chunks<'_, Option<DayModel>> {
        self.cells.chunks(DAYS_IN_WEEK)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&DayModel> {
        self.cells.get(cell_index(row, column)?)?.as_ref()
    }

    /// The cells that have a date, in row-major order
    pub fn days(&self) -> impl Iterator<Item = &DayModel> {
        self.cells.iter().flatten()
    }

    /// Returns the row & column of the cell for `date`, if the page shows it
    pub fn position_of(&self, date: Date) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|c| c.date == date))
            .map(|i| (i / DAYS_IN_WEEK, i % DAYS_IN_WEEK))
    }
}

fn cell_index(row: usize, column: usize) -> Option<usize> {
    if column >= DAYS_IN_WEEK {
        return None;
    }
    row.checked_mul(DAYS_IN_WEEK)?.checked_add(column)
}

/// Emitted when the user picks the cell at `row` & `column` of a page
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SelectionEvent {
    pub row: usize,
    pub column: usize,
    pub date: Date,
}

/// Builds styled [`Page`]s and holds the current selection.
///
/// The holiday predicate, mark predicate, and formatter can be replaced at
/// any time; changes (and changes to the selection) show up in the next call
/// to [`configure()`](PageConfigurator::configure).
pub struct PageConfigurator<E> {
    calendar: CalendarSystem,
    enumerator: E,
    header: [String; DAYS_IN_WEEK],
    today: Date,
    selected: Option<Date>,
    holiday: Predicate,
    mark_visible: Predicate,
    formatter: Formatter,
}

impl PageConfigurator<MonthlyEnumerator> {
    pub fn monthly(calendar: CalendarSystem, today: Date) -> Self {
        let enumerator = MonthlyEnumerator::new(calendar.first_weekday());
        PageConfigurator::new(calendar, enumerator, today)
    }
}

impl<E: DateEnumerator> PageConfigurator<E> {
    /// `enumerator` must lay rows out starting from the first weekday of
    /// `calendar`, or the header labels will not line up with the cells.
    pub fn new(calendar: CalendarSystem, enumerator: E, today: Date) -> Self {
        let header = calendar.header_labels();
        PageConfigurator {
            calendar,
            enumerator,
            header,
            today,
            selected: None,
            holiday: Box::new(is_weekend),
            mark_visible: Box::new(|_: Date| false),
            formatter: Box::new(|date: Date| date.day().to_string()),
        }
    }

    pub fn calendar(&self) -> &CalendarSystem {
        &self.calendar
    }

    pub fn header(&self) -> &[String; DAYS_IN_WEEK] {
        &self.header
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn set_today(&mut self, today: Date) {
        self.today = today;
    }

    pub fn set_holiday_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(Date) -> bool + 'static,
    {
        self.holiday = Box::new(predicate);
    }

    pub fn set_mark_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(Date) -> bool + 'static,
    {
        self.mark_visible = Box::new(predicate);
    }

    pub fn set_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(Date) -> String + 'static,
    {
        self.formatter = Box::new(formatter);
    }

    pub fn selected(&self) -> Option<Date> {
        self.selected
    }

    /// Select `date`, or clear the selection if `date` is `None`.  If
    /// `toggle_if_same` is true and `date` is already selected, the selection
    /// is cleared instead.
    pub fn select(&mut self, date: Option<Date>, toggle_if_same: bool) {
        if toggle_if_same && date.is_some() && date == self.selected {
            self.selected = None;
        } else {
            self.selected = date;
        }
    }

    pub fn configure(&mut self, base: Date) -> Page {
        self.enumerator.set_base(base);
        let dates: [Option<Date>; PAGE_CELLS] =
            std::array::from_fn(|_| self.enumerator.advance());
        let missing = dates.iter().filter(|d| d.is_none()).count();
        if missing > 0 {
            log::warn!(
                "Page for {base} is missing {missing} of {PAGE_CELLS} cells; it runs off the edge of the calendar"
            );
        }
        log::trace!("Configured page for {base}");
        Page {
            base,
            header: self.header.clone(),
            cells: dates.map(|d| d.map(|date| self.day_model(date))),
        }
    }

    /// Date shown at `row` & `column` of the page for `base`
    pub fn date_for_cell(&mut self, base: Date, row: usize, column: usize) -> Option<Date> {
        let index = cell_index(row, column)?;
        self.enumerator.set_base(base);
        self.enumerator.date_at(index)
    }

    pub fn selection_event(
        &mut self,
        base: Date,
        row: usize,
        column: usize,
    ) -> Option<SelectionEvent> {
        let date = self.date_for_cell(base, row, column)?;
        Some(SelectionEvent { row, column, date })
    }

    fn day_model(&self, date: Date) -> DayModel {
        let style = if !self.enumerator.contains(date) {
            DayStyle::OutOfPeriod
        } else if (self.holiday)(date) {
            DayStyle::Holiday
        } else {
            DayStyle::Weekday
        };
        DayModel {
            date,
            text: (self.formatter)(date),
            style,
            is_marked: (self.mark_visible)(date),
            is_today: date == self.today,
            is_selected: self.selected == Some(date),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for PageConfigurator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageConfigurator")
            .field("calendar", &self.calendar)
            .field("enumerator", &self.enumerator)
            .field("header", &self.header)
            .field("today", &self.today)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
