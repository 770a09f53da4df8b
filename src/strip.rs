use crate::shifter::DateShifter;
use std::collections::VecDeque;
use thiserror::Error;
use time::Date;

/// The base dates of the pages a horizontally paging renderer has loaded,
/// oldest first, along with which one is on screen.
///
/// Whenever the current page becomes the first or last loaded page, the page
/// beyond it is loaded through the shifter, so that there is always a page to
/// scroll to on either side until the end of time is reached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageStrip<S> {
    shifter: S,
    pages: VecDeque<Date>,
    // Invariant: current < pages.len()
    current: usize,
}

impl<S: DateShifter> PageStrip<S> {
    pub fn new(base: Date, shifter: S) -> Self {
        let mut strip = PageStrip {
            shifter,
            pages: VecDeque::from([base]),
            current: 0,
        };
        strip.load_around_current();
        strip
    }

    /// Discard all loaded pages and start over with the pages before, at, and
    /// after `base`
    pub fn reset(&mut self, base: Date) {
        log::debug!("Re-anchoring page strip at {base}");
        self.pages.clear();
        self.pages.push_back(base);
        self.current = 0;
        self.load_around_current();
    }

    pub fn current(&self) -> Date {
        self.pages[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn pages(&self) -> &VecDeque<Date> {
        &self.pages
    }

    pub fn forwards(&mut self) -> Result<Date, OutOfTimeError> {
        if self.current + 1 >= self.pages.len() {
            return Err(OutOfTimeError);
        }
        self.current += 1;
        self.load_around_current();
        Ok(self.current())
    }

    pub fn backwards(&mut self) -> Result<Date, OutOfTimeError> {
        if self.current == 0 {
            return Err(OutOfTimeError);
        }
        self.current -= 1;
        self.load_around_current();
        Ok(self.current())
    }

    /// Make the loaded page at `index` the current one, as when a scroll
    /// comes to rest on it.  Returns `None` if no page is loaded at `index`.
    ///
    /// Loading a page before the first one shifts the indices of all loaded
    /// pages up by one; use [`current_index()`](PageStrip::current_index) to
    /// find where the settled page ended up.
    pub fn settle(&mut self, index: usize) -> Option<Date> {
        if index >= self.pages.len() {
            return None;
        }
        self.current = index;
        self.load_around_current();
        Some(self.current())
    }

    fn load_around_current(&mut self) {
        if self.current == 0 {
            let first = self.current();
            let before = self.shifter.shift(first, -1);
            if before == first {
                log::debug!("No page before {first}");
            } else {
                log::debug!("Loading page for {before}");
                self.pages.push_front(before);
                self.current += 1;
            }
        }
        if self.current + 1 == self.pages.len() {
            let last = self.current();
            let after = self.shifter.shift(last, 1);
            if after == last {
                log::debug!("No page after {last}");
            } else {
                log::debug!("Loading page for {after}");
                self.pages.push_back(after);
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
