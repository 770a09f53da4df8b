use crate::theme::{day_style, BASE_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use monthpager::{DayModel, Page, DAYS_IN_WEEK};
use ratatui::{prelude::*, widgets::*};
use std::iter::zip;
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the grid of days in columns
pub(crate) const MAIN_WIDTH: u16 = 35;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 1;

const RULE_LINE: u16 = 2;

/// Number of lines above the first week: the title, the weekday header, and
/// its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the page
const WEEK_LINES: u16 = 2;

const ROWS: u16 = 6;

const STATUS_LINE: u16 = HEADER_LINES + ROWS * WEEK_LINES;

const ACS_HLINE: char = '─';

const MARK: char = '•';

/// Draws one month page, centered horizontally within the area it's given
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthPage<'a> {
    page: &'a Page,
    cursor: Option<(usize, usize)>,
    selected: Option<Date>,
}

impl<'a> MonthPage<'a> {
    pub(crate) fn new(page: &'a Page) -> MonthPage<'a> {
        MonthPage {
            page,
            cursor: None,
            selected: None,
        }
    }

    pub(crate) fn cursor(mut self, row: usize, column: usize) -> Self {
        self.cursor = Some((row, column));
        self
    }

    pub(crate) fn selected(mut self, date: Option<Date>) -> Self {
        self.selected = date;
        self
    }
}

impl Widget for MonthPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: MAIN_WIDTH.min(area.width),
            ..area
        };
        let mut canvas = PageCanvas::new(area, buf);
        canvas.draw_title(self.page.base);
        canvas.draw_header(&self.page.header);
        for (row, week) in zip(0u16.., self.page.rows()) {
            for (column, day) in zip(0u16.., week) {
                let Some(day) = day else { continue };
                let under_cursor =
                    self.cursor == Some((usize::from(row), usize::from(column)));
                canvas.draw_day(row, column, day, under_cursor);
            }
        }
        canvas.draw_status(self.selected);
    }
}

/// Text for one cell: the day, bracketed if selected, followed by a mark if
/// the day has one
pub(crate) fn cell_text(day: &DayModel) -> String {
    let (open, close) = if day.is_selected {
        ('[', ']')
    } else {
        (' ', ' ')
    };
    let mark = if day.is_marked { MARK } else { ' ' };
    format!("{open}{:>2}{close}{mark}", day.text)
}

#[derive(Debug, Eq, PartialEq)]
struct PageCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> PageCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, base: Date) {
        let title = format!("{} {}", base.month(), base.year());
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(TITLE_LINE, x, title, TITLE_STYLE);
    }

    fn draw_header(&mut self, labels: &[String; DAYS_IN_WEEK]) {
        let width = usize::from(DAY_WIDTH);
        for (column, label) in zip(0u16.., labels) {
            self.mvprint(
                HEADER_LINE,
                column * DAY_WIDTH,
                format!("{label:^width$}"),
                WEEKDAY_STYLE,
            );
        }
        self.hline(RULE_LINE, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, row: u16, column: u16, day: &DayModel, under_cursor: bool) {
        self.mvprint(
            row * WEEK_LINES + HEADER_LINES,
            column * DAY_WIDTH,
            cell_text(day),
            day_style(day, under_cursor),
        );
    }

    fn draw_status(&mut self, selected: Option<Date>) {
        let s = match selected {
            Some(date) => format!("Selected: {date}"),
            None => String::from("Nothing selected"),
        };
        self.mvprint(STATUS_LINE, 0, s, BASE_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Rendering through a Paragraph truncates text that would extend
            // beyond the page's area instead of panicking.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}
