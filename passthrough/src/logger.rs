use std::fmt::Write;

use jiff::{Zoned, tz::TimeZone};
use log::{Level, Record};
use logforth::{
    append::Stderr,
    diagnostic::Diagnostic,
    layout::{JsonLayout, Layout},
};

use crate::args::{Args, LogStyle};

/// One line per record: `<utc timestamp> <level> <crate>: <message>`.
#[derive(Debug, Clone, Copy)]
struct TextLayout {
    color: bool,
}

impl TextLayout {
    fn render(&self, timestamp: &str, record: &Record<'_>) -> Result<String, std::fmt::Error> {
        let mut line = String::new();
        let level = record.level();

        // `credentials::mapping` and `credentials` both show up as `credentials`
        let source = record.target().split("::").next().unwrap_or_default();

        write!(line, "{timestamp} ")?;

        if self.color {
            write!(line, "\x1b[{}m{level:>5}\x1b[0m", ansi_color(level))?;
        } else {
            write!(line, "{level:>5}")?;
        }

        write!(line, " {source}: {}", record.args())?;

        Ok(line)
    }
}

fn ansi_color(level: Level) -> u8 {
    match level {
        Level::Error => 31,
        Level::Warn => 33,
        Level::Info => 32,
        Level::Debug => 34,
        Level::Trace => 35,
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &Record<'_>, _diagnostics: &[Box<dyn Diagnostic>]) -> anyhow::Result<Vec<u8>> {
        let now = Zoned::now().with_time_zone(TimeZone::UTC);
        let timestamp = now.strftime("%Y-%m-%dT%H:%M:%S%.6fZ").to_string();

        Ok(self.render(&timestamp, record)?.into_bytes())
    }
}

/// Logs go to stderr, stdout carries the report.
pub(super) fn init(args: &Args) {
    logforth::builder()
        .dispatch(|d| {
            let d = d.filter(args.log_level.env_filter());

            match args.log_style {
                LogStyle::Color => d.append(Stderr::default().with_layout(TextLayout { color: true })),
                LogStyle::Text => d.append(Stderr::default().with_layout(TextLayout { color: false })),
                LogStyle::Json => d.append(Stderr::default().with_layout(JsonLayout::default())),
            }
        })
        .apply();
}
