mod app;
mod help;
mod jumpto;
mod page;
mod theme;
use crate::app::App;
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use monthpager::{CalendarSystem, PageConfigurator};
use ratatui::DefaultTerminal;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    monday_first: bool,
    marks: BTreeSet<Date>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('m') | Arg::Long("monday") => opts.monday_first = true,
                Arg::Long("mark") => {
                    opts.marks.insert(parse_date(parser.value()?.string()?)?);
                }
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(parse_date(value.string()?)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = opts.log_file.as_deref().map(start_logger).transpose()?;
                let now = OffsetDateTime::now_local().context("failed to determine local time")?;
                let first_weekday = if opts.monday_first {
                    Weekday::Monday
                } else {
                    Weekday::Sunday
                };
                let calendar = CalendarSystem::new()
                    .with_first_weekday(first_weekday)
                    .with_offset(now.offset());
                let today = calendar.local_date(now);
                log::info!("Starting up; today is {today}");
                let mut configurator = PageConfigurator::monthly(calendar, today);
                if !opts.marks.is_empty() {
                    let marks = opts.marks;
                    configurator.set_mark_predicate(move |date| marks.contains(&date));
                }
                let app = App::new(configurator, opts.date.unwrap_or(today));
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal).context("failed to run calendar")?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: monthpager [<options>] [YYYY-MM-DD]");
                println!();
                println!("Page through a month calendar in the terminal");
                println!();
                println!("Options:");
                println!("  -m, --monday          Start weeks on Monday instead of Sunday");
                println!("      --mark <DATE>     Show a mark on DATE (may be given repeatedly)");
                println!("      --log-file <PATH> Write log messages to PATH");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: String) -> Result<Date, lexopt::Error> {
    Date::parse(&value, &YMD_FMT).map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: Box::new(e),
    })
}

// The terminal belongs to the calendar, so messages only go to a file.
// `RUST_LOG` overrides the default level.
fn start_logger(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str("info")
        .context("failed to configure logging")?
        .log_to_file(FileSpec::try_from(path).context("invalid log file path")?)
        .start()
        .context("failed to start logging")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(RunOptions::default()));
    }

    #[test]
    fn test_date_and_options() {
        let cmd = parse(&[
            "--monday",
            "--mark",
            "2024-03-08",
            "--mark=2024-03-20",
            "2024-03-10",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(RunOptions {
                date: Some(date!(2024 - 03 - 10)),
                monday_first: true,
                marks: BTreeSet::from([date!(2024 - 03 - 08), date!(2024 - 03 - 20)]),
                log_file: None,
            })
        );
    }

    #[test]
    fn test_log_file() {
        match parse(&["--log-file", "cal.log"]).unwrap() {
            Command::Run(opts) => assert_eq!(opts.log_file, Some(PathBuf::from("cal.log"))),
            cmd => panic!("Expected Command::Run, got {cmd:?}"),
        }
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["--mark", "soon"]).is_err());
        assert!(parse(&["2024-03-10", "2024-03-11"]).is_err());
    }
}
