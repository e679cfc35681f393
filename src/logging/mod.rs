//! Logging statistics from simulation runs
mod cli;

pub use cli::CLILogger;

use enum_map::Enum;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// Simulation run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum Event {
    /// One sense-act-learn cycle of the primary cab.
    Tick,
    /// One trip from start to destination or deadline expiry.
    Trial,
}

/// A value that can be logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Loggable {
    /// Nothing. No data to log.
    /// Logging Nothing data may still produce a placeholder entry for the name.
    Nothing,
    /// A scalar value. Aggregate by taking means.
    Scalar(f64),
    /// A sample from a distrbution over 0 .. (size-1)
    IndexSample { value: usize, size: usize },
    /// A message. Aggregate by counting occurrences.
    Message(Cow<'static, str>),
}

impl From<f64> for Loggable {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<&'static str> for Loggable {
    fn from(message: &'static str) -> Self {
        Self::Message(message.into())
    }
}

impl From<String> for Loggable {
    fn from(message: String) -> Self {
        Self::Message(message.into())
    }
}

/// Log statistics from a simulation run.
pub trait Logger {
    /// Log a value.
    ///
    /// # Args
    /// * `event` - The event associated with this value.
    /// * `name` - The name that identifies this value.
    /// * `value` - The value to log.
    ///
    /// # Returns
    /// May return an error if the logged value is structurally incompatible
    /// with previous values logged under the same name.
    fn log<'a>(&mut self, event: Event, name: &'a str, value: Loggable)
        -> Result<(), LogError<'a>>;

    /// Mark the end of an event.
    fn done(&mut self, event: Event);
}

/// Logger that does nothing
impl Logger for () {
    fn log<'a>(&mut self, _: Event, _: &'a str, _: Loggable) -> Result<(), LogError<'a>> {
        Ok(())
    }

    fn done(&mut self, _: Event) {}
}

impl<L: Logger + ?Sized> Logger for &mut L {
    fn log<'a>(
        &mut self,
        event: Event,
        name: &'a str,
        value: Loggable,
    ) -> Result<(), LogError<'a>> {
        L::log(self, event, name, value)
    }

    fn done(&mut self, event: Event) {
        L::done(self, event)
    }
}

/// Convenience methods for loggers.
pub trait LoggerHelper: Logger {
    /// Log a value, panicking if it is incompatible with earlier values of the same name.
    ///
    /// Mixing value kinds under one name is a programming error, not a runtime condition.
    fn unwrap_log<T: Into<Loggable>>(&mut self, event: Event, name: &str, value: T) {
        if let Err(err) = self.log(event, name, value.into()) {
            panic!("{}", err);
        }
    }
}

impl<L: Logger + ?Sized> LoggerHelper for L {}

#[derive(Debug)]
pub struct LogError<'a> {
    name: &'a str,
    value: Loggable,
    expected: String,
}

impl<'a> LogError<'a> {
    pub fn new(name: &'a str, value: Loggable, expected: String) -> Self {
        Self {
            name,
            value,
            expected,
        }
    }
}

impl<'a> fmt::Display for LogError<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\"{}\": incompatible value {:?}, expected {}",
            self.name, self.value, self.expected
        )
    }
}

impl<'a> Error for LogError<'a> {}
