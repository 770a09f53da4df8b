use monthpager::{DayModel, DayStyle};
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HOLIDAY_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) const OUT_OF_PERIOD_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = Style::new().bg(Color::Yellow).fg(Color::Black);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) fn day_style(day: &DayModel, under_cursor: bool) -> Style {
    let mut style = match day.style {
        DayStyle::Weekday => BASE_STYLE,
        DayStyle::Holiday => HOLIDAY_STYLE,
        DayStyle::OutOfPeriod => OUT_OF_PERIOD_STYLE,
    };
    if day.is_today {
        style = style.patch(TODAY_STYLE);
    }
    if under_cursor {
        style = style.patch(CURSOR_STYLE);
    }
    style
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
