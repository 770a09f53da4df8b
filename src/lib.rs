//! Date arithmetic behind a horizontally paging month calendar.
//!
//! A [`PageConfigurator`] turns a base date into a [`Page`]: weekday header
//! labels plus exactly [`PAGE_CELLS`] styled [`DayModel`]s laid out row-major
//! over a [`WEEKS_PER_PAGE`] × [`DAYS_IN_WEEK`] grid.  A [`PageStrip`] keeps
//! track of which pages a renderer has loaded and fetches neighboring months
//! through a [`DateShifter`] as the user pages.  Drawing is left to the host.
mod configurator;
mod enumerator;
mod shifter;
mod strip;
mod system;
pub use crate::configurator::{
    DayModel, DayStyle, Formatter, Page, PageConfigurator, Predicate, SelectionEvent,
};
pub use crate::enumerator::{DateEnumerator, MonthlyEnumerator};
pub use crate::shifter::{add_months, DateShifter, MonthlyShifter};
pub use crate::strip::{OutOfTimeError, PageStrip};
pub use crate::system::{is_weekend, CalendarSystem};

/// Number of cells in one row of a page
pub const DAYS_IN_WEEK: usize = 7;

/// Number of rows on every page, whatever the length of the month
pub const WEEKS_PER_PAGE: usize = 6;

/// Number of cells on every page
pub const PAGE_CELLS: usize = WEEKS_PER_PAGE * DAYS_IN_WEEK;
