//! Custom tracing formatter with tick counter integration

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Simulation steps run so far, across every level in the process
static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits of the tick are printed
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

/// ANSI styles used by [`CustomFormatter`].
#[derive(Clone, Copy)]
enum Style {
    Plain,
    Dim,
    Bold,
    Color(&'static str),
}

impl Style {
    fn code(self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Dim => Some("\x1b[2m"),
            Style::Bold => Some("\x1b[1m"),
            Style::Color(code) => Some(code),
        }
    }

    /// Writes `value` in this style, or plainly when the writer has no ANSI support.
    fn paint(self, writer: &mut Writer<'_>, value: impl fmt::Display) -> fmt::Result {
        match self.code() {
            Some(code) if writer.has_ansi_escapes() => write!(writer, "{code}{value}\x1b[0m"),
            _ => write!(writer, "{value}"),
        }
    }

    /// Paints one column of the line prefix, followed by its separating space.
    fn column(self, writer: &mut Writer<'_>, value: impl fmt::Display) -> fmt::Result {
        self.paint(writer, value)?;
        writer.write_char(' ')
    }
}

/// Event format: `HH:MM:SS.fffff 0xTICK LEVEL span{fields}: target: fields`.
///
/// The hexadecimal tick makes it easy to line log lines up with simulation steps.
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        Style::Dim.column(&mut writer, timestamp)?;
        Style::Dim.column(&mut writer, format_args!("0x{:04X}", get_tick_count() & TICK_DISPLAY_MASK))?;

        let (color, label) = level_style(meta.level());
        Style::Color(color).column(&mut writer, label)?;

        if let Some(scope) = ctx.event_scope() {
            let mut spans = scope.from_root().peekable();
            while let Some(span) = spans.next() {
                Style::Bold.paint(&mut writer, span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|fields| !fields.is_empty()) {
                    Style::Bold.paint(&mut writer, "{")?;
                    Style::Plain.paint(&mut writer, fields)?;
                    Style::Bold.paint(&mut writer, "}")?;
                }
                if spans.peek().is_some() {
                    Style::Dim.paint(&mut writer, ":")?;
                } else {
                    Style::Dim.column(&mut writer, ":")?;
                }
            }
        }

        Style::Dim.column(&mut writer, format_args!("{}:", meta.target()))?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Color and right-aligned five character label for a level.
fn level_style(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    }
}

/// Increment the global tick counter by 1
///
/// Called once per simulation step by [`crate::game::Game::tick`].
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Get the current tick count
pub fn get_tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
