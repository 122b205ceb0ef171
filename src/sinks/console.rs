//! Colored console sink

use crate::core::{Emitter, LogLevel, LoggerCore, LogRecord, LoggerError, Result, SourceId};
use colored::Colorize;
use std::collections::HashSet;
use std::io::Write;

/// Which process stream a level is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Level -> stream routing table for the console sink.
///
/// A level present in neither set is gated through but writes nothing; a
/// level present in both sets is a configuration error.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    stdout_levels: HashSet<LogLevel>,
    stderr_levels: HashSet<LogLevel>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            stdout_levels: [
                LogLevel::Trace,
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warn,
            ]
            .into_iter()
            .collect(),
            stderr_levels: [LogLevel::Error, LogLevel::Critical].into_iter().collect(),
        }
    }
}

impl ConsoleConfig {
    pub fn new(
        stdout_levels: impl IntoIterator<Item = LogLevel>,
        stderr_levels: impl IntoIterator<Item = LogLevel>,
    ) -> Result<Self> {
        let conf = Self {
            stdout_levels: stdout_levels.into_iter().collect(),
            stderr_levels: stderr_levels.into_iter().collect(),
        };
        conf.validate()?;
        Ok(conf)
    }

    fn validate(&self) -> Result<()> {
        if let Some(level) = self.stdout_levels.intersection(&self.stderr_levels).next() {
            return Err(LoggerError::config(
                "ConsoleConfig",
                format!("level {} is routed to both stdout and stderr", level),
            ));
        }
        Ok(())
    }

    /// Stream for `level`, or `None` when the level writes nowhere.
    pub fn stream_for(&self, level: LogLevel) -> Option<ConsoleStream> {
        if self.stdout_levels.contains(&level) {
            Some(ConsoleStream::Stdout)
        } else if self.stderr_levels.contains(&level) {
            Some(ConsoleStream::Stderr)
        } else {
            None
        }
    }
}

/// Sink writing colored lines to stdout/stderr per the routing table.
pub struct ConsoleLogger {
    core: LoggerCore,
    config: ConsoleConfig,
    use_colors: bool,
}

impl ConsoleLogger {
    pub fn new(source: impl Into<SourceId>) -> Self {
        Self {
            core: LoggerCore::new(source),
            config: ConsoleConfig::default(),
            use_colors: true,
        }
    }

    pub fn with_config(source: impl Into<SourceId>, config: ConsoleConfig) -> Self {
        Self {
            core: LoggerCore::new(source),
            config,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    fn colorize(use_colors: bool, level: LogLevel, line: &str) -> String {
        if use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line.to_string()
        }
    }
}

impl Emitter for ConsoleLogger {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn emit(&mut self, record: LogRecord) -> Result<()> {
        let level = record.level;
        let stream = self.config.stream_for(level);
        let use_colors = self.use_colors;

        self.core.emit_with(record, |line| {
            let colored_line = Self::colorize(use_colors, level, line);
            match stream {
                Some(ConsoleStream::Stdout) => writeln!(std::io::stdout(), "{}", colored_line)?,
                Some(ConsoleStream::Stderr) => writeln!(std::io::stderr(), "{}", colored_line)?,
                // Level routed nowhere: counted, but no output.
                None => {}
            }
            Ok(())
        })
    }
}
