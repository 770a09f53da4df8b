use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::page::MonthPage;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use monthpager::{
    MonthlyEnumerator, MonthlyShifter, PageConfigurator, PageStrip, SelectionEvent, DAYS_IN_WEEK,
    WEEKS_PER_PAGE,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, OffsetDateTime};

#[derive(Debug)]
pub(crate) struct App {
    configurator: PageConfigurator<MonthlyEnumerator>,
    pages: PageStrip<MonthlyShifter>,
    cursor: Cursor,
    state: AppState,
}

impl App {
    pub(crate) fn new(configurator: PageConfigurator<MonthlyEnumerator>, start: Date) -> App {
        let mut app = App {
            configurator,
            pages: PageStrip::new(start, MonthlyShifter),
            cursor: Cursor::default(),
            state: AppState::Calendar,
        };
        app.focus(start);
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.refresh_today(OffsetDateTime::now_utc());
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.cursor.left(),
                KeyCode::Char('l') | KeyCode::Right => self.cursor.right(),
                KeyCode::Char('k') | KeyCode::Up => self.cursor.up(),
                KeyCode::Char('j') | KeyCode::Down => self.cursor.down(),
                KeyCode::Char('n') | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('p') | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char(' ') | KeyCode::Enter => self.select_at_cursor(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    return true;
                }
                let input = match key {
                    KeyCode::Char('-') => JumpToInput::Negative,
                    KeyCode::Char('+') => JumpToInput::Positive,
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => JumpToInput::Digit(d),
                        None => return false,
                    },
                    KeyCode::Backspace | KeyCode::Delete => JumpToInput::Backspace,
                    KeyCode::Enter => JumpToInput::Enter,
                    _ => return false,
                };
                match state.handle_input(input) {
                    JumpToOutput::Ok => true,
                    JumpToOutput::Invalid => false,
                    JumpToOutput::Jump(date) => {
                        self.state = AppState::Calendar;
                        self.jump_to(date);
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn next_month(&mut self) -> bool {
        match self.pages.forwards() {
            Ok(base) => {
                log::info!("Paged forwards to {base}");
                true
            }
            Err(e) => {
                log::debug!("Cannot page forwards: {e}");
                false
            }
        }
    }

    fn previous_month(&mut self) -> bool {
        match self.pages.backwards() {
            Ok(base) => {
                log::info!("Paged backwards to {base}");
                true
            }
            Err(e) => {
                log::debug!("Cannot page backwards: {e}");
                false
            }
        }
    }

    fn select_at_cursor(&mut self) -> bool {
        let base = self.pages.current();
        let Some(event) = self
            .configurator
            .selection_event(base, self.cursor.row, self.cursor.column)
        else {
            return false;
        };
        self.on_selection(event);
        true
    }

    fn on_selection(&mut self, event: SelectionEvent) {
        let SelectionEvent { row, column, date } = event;
        log::info!("Cell ({row}, {column}) picked: {date}");
        self.configurator.select(Some(date), true);
    }

    /// Keep "today" current when the session runs past midnight
    fn refresh_today(&mut self, now: OffsetDateTime) {
        let today = self.configurator.calendar().local_date(now);
        if today != self.configurator.today() {
            log::info!("Today is now {today}");
            self.configurator.set_today(today);
        }
    }

    fn jump_to_today(&mut self) {
        let today = self.configurator.today();
        self.jump_to(today);
    }

    fn jump_to(&mut self, date: Date) {
        self.pages.reset(date);
        self.focus(date);
    }

    /// Put the cursor on `date`, if it's on the current page
    fn focus(&mut self, date: Date) {
        let page = self.configurator.configure(self.pages.current());
        if let Some((row, column)) = page.position_of(date) {
            self.cursor = Cursor { row, column };
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let page = self.configurator.configure(self.pages.current());
        MonthPage::new(&page)
            .cursor(self.cursor.row, self.cursor.column)
            .selected(self.configurator.selected())
            .render(area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Cursor {
    row: usize,
    column: usize,
}

// Each method returns `false` if the cursor is already at the edge of the
// page
impl Cursor {
    fn left(&mut self) -> bool {
        if self.column > 0 {
            self.column -= 1;
            true
        } else {
            false
        }
    }

    fn right(&mut self) -> bool {
        if self.column + 1 < DAYS_IN_WEEK {
            self.column += 1;
            true
        } else {
            false
        }
    }

    fn up(&mut self) -> bool {
        if self.row > 0 {
            self.row -= 1;
            true
        } else {
            false
        }
    }

    fn down(&mut self) -> bool {
        if self.row + 1 < WEEKS_PER_PAGE {
            self.row += 1;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthpager::CalendarSystem;
    use time::macros::{date, datetime};

    fn app() -> App {
        let today = date!(2024 - 03 - 12);
        App::new(
            PageConfigurator::monthly(CalendarSystem::new(), today),
            today,
        )
    }

    fn render(app: &mut App) -> Buffer {
        let area = Rect::new(0, 0, 45, 17);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[test]
    fn test_starts_on_today() {
        let mut app = app();
        assert_eq!(app.cursor, Cursor { row: 2, column: 2 });
        let buffer = render(&mut app);
        assert_eq!(line(&buffer, 0), "March 2024");
        assert_eq!(line(&buffer, 1), "SUN  MON  TUE  WED  THU  FRI  SAT");
        assert_eq!(line(&buffer, 15), "Nothing selected");
    }

    #[test]
    fn test_select_and_toggle() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.configurator.selected(), Some(date!(2024 - 03 - 12)));
        let buffer = render(&mut app);
        assert_eq!(line(&buffer, 7), "10   11  [12]  13   14   15   16");
        assert_eq!(line(&buffer, 15), "Selected: 2024-03-12");

        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.configurator.selected(), Some(date!(2024 - 03 - 13)));

        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.configurator.selected(), None);
    }

    #[test]
    fn test_paging() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(line(&render(&mut app), 0), "April 2024");
        assert!(app.handle_key(KeyCode::PageUp));
        assert!(app.handle_key(KeyCode::PageUp));
        assert_eq!(line(&render(&mut app), 0), "February 2024");
        // Selecting on another page picks the date under the cursor there
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.configurator.selected(), Some(date!(2024 - 02 - 13)));
    }

    #[test]
    fn test_cursor_stays_on_page() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Up));
        assert!(!app.handle_key(KeyCode::Up));
        for _ in 0..4 {
            assert!(app.handle_key(KeyCode::Char('l')));
        }
        assert!(!app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.cursor, Cursor { row: 0, column: 6 });
        for _ in 0..5 {
            assert!(app.handle_key(KeyCode::Char('j')));
        }
        assert!(!app.handle_key(KeyCode::Char('j')));
        assert_eq!(app.cursor, Cursor { row: 5, column: 6 });
    }

    #[test]
    fn test_jump_to_month_and_back() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "199912".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.pages.current(), date!(1999 - 12 - 01));
        // 1999-12-01 is a Wednesday
        assert_eq!(app.cursor, Cursor { row: 0, column: 3 });
        assert_eq!(line(&render(&mut app), 0), "December 1999");

        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.pages.current(), date!(2024 - 03 - 12));
        assert_eq!(app.cursor, Cursor { row: 2, column: 2 });
    }

    #[test]
    fn test_invalid_keys() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_help() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        let buffer = render(&mut app);
        assert!((0..buffer.area.height).any(|y| line(&buffer, y).contains("Commands")));
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_today_rolls_over() {
        let mut app = app();
        app.refresh_today(datetime!(2024 - 03 - 12 23:59:59 UTC));
        assert_eq!(app.configurator.today(), date!(2024 - 03 - 12));
        app.refresh_today(datetime!(2024 - 03 - 13 00:00:01 UTC));
        assert_eq!(app.configurator.today(), date!(2024 - 03 - 13));
        let page = app.configurator.configure(app.pages.current());
        let todays = page.days().filter(|c| c.is_today).collect::<Vec<_>>();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, date!(2024 - 03 - 13));
        assert!(app.handle_key(KeyCode::Char('n')));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.cursor, Cursor { row: 2, column: 3 });
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }
}
