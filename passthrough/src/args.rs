use std::{fmt, io::IsTerminal, path::PathBuf, str::FromStr};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use config::Config;
use http::{HeaderName, HeaderValue, Request};
use log::LevelFilter;
use logforth::filter::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "passthrough",
    version,
    about = "Show which Jira and Confluence credential overrides a request would carry"
)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short, env = "PASSTHROUGH_CONFIG_PATH", default_value = "./passthrough.toml")]
    pub config: PathBuf,
    /// Enable credential passthrough regardless of the configuration file
    #[arg(long, env = "MCP_CREDENTIALS_PASSTHROUGH")]
    pub credentials_passthrough: bool,
    /// A request header in `Name: value` form. Can be repeated.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,
    /// Path of the simulated request, used in log output.
    #[arg(long, default_value = "/mcp")]
    pub path: String,
    /// Print token values in full instead of masking them
    #[arg(long)]
    pub reveal: bool,
    /// Set the logging level.
    #[arg(long = "log", env = "PASSTHROUGH_LOG", default_value_t = LogLevel::default())]
    pub log_level: LogLevel,
    /// Set the style of log output
    #[arg(long, env = "PASSTHROUGH_LOG_STYLE", default_value_t = LogStyle::default())]
    pub log_style: LogStyle,
}

impl Args {
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = if self.config.exists() {
            Config::load(&self.config)?
        } else {
            log::debug!(
                "No configuration file at '{}', using defaults",
                self.config.display()
            );
            Config::default()
        };

        if self.credentials_passthrough {
            config.passthrough.enabled = true;
        }

        Ok(config)
    }

    pub fn request(&self) -> anyhow::Result<Request<()>> {
        let mut request = Request::builder()
            .uri(self.path.as_str())
            .body(())
            .with_context(|| format!("invalid request path '{}'", self.path))?;

        for (name, value) in &self.headers {
            request.headers_mut().append(name.clone(), value.clone());
        }

        Ok(request)
    }
}

fn parse_header(s: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got '{s}'"))?;

    let name = HeaderName::from_str(name.trim()).map_err(|e| format!("invalid header name '{name}': {e}"))?;
    let value = HeaderValue::from_str(value.trim_start()).map_err(|e| format!("invalid header value: {e}"))?;

    Ok((name, value))
}

/// Crates whose records follow `--log`. Dependencies stay at `warn`.
const WORKSPACE_TARGETS: [&str; 4] = ["passthrough", "credentials", "config", "middleware"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogStyle {
    /// Colorized text, used as the default with TTY output
    Color,
    /// Standard text, used as the default with non-TTY output
    Text,
    /// JSON objects
    Json,
}

impl Default for LogStyle {
    fn default() -> Self {
        if std::io::stderr().is_terminal() {
            LogStyle::Color
        } else {
            LogStyle::Text
        }
    }
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value_name(self, f)
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Disable logging
    Off,
    /// Only log errors
    Error,
    /// Log errors, and warnings
    #[default]
    Warn,
    /// Log errors, warnings, and info messages
    Info,
    /// Log errors, warnings, info, and debug messages
    Debug,
    /// Log errors, warnings, info, debug, and trace messages
    Trace,
}

impl LogLevel {
    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::from_str(&self.directives()).expect("directives are built from known targets")
    }

    fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// `warn` for everything, `self` for the workspace crates.
    fn directives(self) -> String {
        let level = self.level_filter();

        if level == LevelFilter::Off {
            return "off".to_string();
        }

        let level = level.as_str().to_ascii_lowercase();

        std::iter::once("warn".to_string())
            .chain(WORKSPACE_TARGETS.iter().map(|target| format!("{target}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value_name(self, f)
    }
}

/// Writes the name clap accepts for `value`, so defaults print the way they parse.
fn write_value_name<T: ValueEnum>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.to_possible_value() {
        Some(possible) => f.write_str(possible.get_name()),
        None => Ok(()),
    }
}
