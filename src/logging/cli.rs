//! Command-line logger
use super::{Event, LogError, Loggable, Logger};
use enum_map::{enum_map, EnumMap};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Drop;
use std::time::{Duration, Instant};
use yansi::Paint;

/// Logger that periodically writes summaries to stdout.
pub struct CLILogger {
    events: EnumMap<Event, EventLog>,

    display_period: Duration,
    last_display_time: Instant,
}

impl CLILogger {
    pub fn new(display_period: Duration) -> Self {
        Self {
            events: enum_map! { _ => EventLog::new() },
            display_period,
            last_display_time: Instant::now(),
        }
    }

    /// Display the summary and clear all stored data.
    pub fn display(&mut self) {
        for (event, event_log) in self.events.iter_mut() {
            let summary_size = event_log.index - event_log.summary_start_index;
            if summary_size == 0 {
                continue;
            }

            println!(
                "{} {}",
                Paint::cyan(format!(
                    "==== {:?}s {} - {}",
                    event,
                    event_log.summary_start_index,
                    event_log.index - 1
                ))
                .bold(),
                Paint::cyan("====").bold()
            );

            for (name, aggregator) in &mut event_log.aggregators {
                println!("{:<16} {}", Paint::fixed(35, name), aggregator);
                aggregator.clear()
            }
            event_log.summary_start_index = event_log.index;
        }
        self.last_display_time = Instant::now();
    }
}

impl Logger for CLILogger {
    fn log<'a>(
        &mut self,
        event: Event,
        name: &'a str,
        value: Loggable,
    ) -> Result<(), LogError<'a>> {
        // Separate get() / insert() calls since the entry API needs an owned key.
        // Aggregators are never removed so the insert happens once per name.
        let aggregators = &mut self.events[event].aggregators;
        if let Some(aggregator) = aggregators.get_mut(name) {
            if let Err((value, expected)) = aggregator.update(value) {
                return Err(LogError::new(name, value, expected));
            }
        } else {
            aggregators.insert(name.into(), Aggregator::new(value));
        }
        Ok(())
    }

    fn done(&mut self, event: Event) {
        let event_log = &mut self.events[event];
        event_log.index += 1;

        for aggregator in event_log.aggregators.values_mut() {
            aggregator.commit()
        }

        if self.last_display_time.elapsed() >= self.display_period {
            self.display();
        }
    }
}

impl Drop for CLILogger {
    fn drop(&mut self) {
        // Ensure everything is flushed.
        self.display();
    }
}

struct EventLog {
    /// Global index for this event
    index: u64,
    /// Value of `index` at the start of this summary period
    summary_start_index: u64,
    /// An aggregator for each log entry.
    aggregators: BTreeMap<String, Aggregator>,
}

impl EventLog {
    #[allow(clippy::missing_const_for_fn)] // BTreeMap const new not stabilized
    fn new() -> Self {
        Self {
            index: 0,
            summary_start_index: 0,
            aggregators: BTreeMap::new(),
        }
    }
}

/// Aggregates the values logged under one name.
///
/// Values logged during an event are pending until the event is done.
#[derive(Debug)]
enum Aggregator {
    Nothing,
    ScalarMean {
        accumulator: MeanAccumulator,
        pending: Option<f64>,
    },
    IndexDistribution {
        accumulator: IndexDistributionAccumulator,
        pending: Option<usize>,
    },
    MessageCounts {
        accumulator: MessageAccumulator,
        pending: Option<Cow<'static, str>>,
    },
}
use Aggregator::*;

impl Aggregator {
    fn new(value: Loggable) -> Self {
        match value {
            Loggable::Nothing => Nothing,
            Loggable::Scalar(x) => ScalarMean {
                accumulator: MeanAccumulator::default(),
                pending: Some(x),
            },
            Loggable::IndexSample { value, size } => IndexDistribution {
                accumulator: IndexDistributionAccumulator::new(size),
                pending: Some(value),
            },
            Loggable::Message(message) => MessageCounts {
                accumulator: MessageAccumulator::default(),
                pending: Some(message),
            },
        }
    }

    /// Update an aggregator with a logged value within an event.
    ///
    /// Returns Err((value, expected)) if the value is incompatible with this aggregator.
    fn update(&mut self, value: Loggable) -> Result<(), (Loggable, String)> {
        match (self, value) {
            (Nothing, Loggable::Nothing) => {}
            (ScalarMean { pending, .. }, Loggable::Scalar(x)) => *pending = Some(x),
            (
                IndexDistribution {
                    accumulator,
                    pending,
                },
                Loggable::IndexSample { value, size },
            ) if accumulator.counts.len() == size => *pending = Some(value),
            (MessageCounts { pending, .. }, Loggable::Message(message)) => {
                *pending = Some(message)
            }
            (aggregator, value) => return Err((value, aggregator.expected())),
        }
        Ok(())
    }

    /// Description of the loggable kind this aggregator accepts.
    fn expected(&self) -> String {
        match self {
            Nothing => "Nothing".into(),
            ScalarMean { .. } => "Scalar".into(),
            IndexDistribution { accumulator, .. } => {
                format!("IndexSample{{size: {}}}", accumulator.counts.len())
            }
            MessageCounts { .. } => "Message".into(),
        }
    }

    /// Commit the pending values into the aggregate.
    fn commit(&mut self) {
        match self {
            Nothing => {}
            ScalarMean {
                accumulator,
                pending,
            } => {
                if let Some(value) = pending.take() {
                    accumulator.insert(value)
                }
            }
            IndexDistribution {
                accumulator,
                pending,
            } => {
                if let Some(value) = pending.take() {
                    accumulator.insert(value)
                }
            }
            MessageCounts {
                accumulator,
                pending,
            } => {
                if let Some(value) = pending.take() {
                    accumulator.insert(value)
                }
            }
        }
    }

    /// Clear the aggregated values (but not the pending values)
    fn clear(&mut self) {
        match self {
            Nothing => {}
            ScalarMean { accumulator, .. } => *accumulator = MeanAccumulator::default(),
            IndexDistribution { accumulator, .. } => accumulator.counts.fill(0),
            MessageCounts { accumulator, .. } => accumulator.message_counts.clear(),
        }
    }
}

/// Display the commited aggregated value.
impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Nothing => write!(f, "Nothing"),
            ScalarMean { accumulator, .. } => accumulator.fmt(f),
            IndexDistribution { accumulator, .. } => accumulator.fmt(f),
            MessageCounts { accumulator, .. } => accumulator.fmt(f),
        }
    }
}

#[derive(Debug, Default)]
struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl MeanAccumulator {
    fn insert(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }
}

impl fmt::Display for MeanAccumulator {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.count == 0 {
            write!(f, "None")
        } else {
            write!(f, "{:.3}", self.sum / (self.count as f64))
        }
    }
}

#[derive(Debug)]
struct IndexDistributionAccumulator {
    counts: Vec<u64>,
}

impl IndexDistributionAccumulator {
    fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size],
        }
    }

    fn insert(&mut self, value: usize) {
        if let Some(count) = self.counts.get_mut(value) {
            *count += 1;
        }
    }
}

impl fmt::Display for IndexDistributionAccumulator {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let total: u64 = self.counts.iter().sum();
        if total == 0 {
            return write!(f, "None");
        }
        write!(f, "[")?;
        for (i, c) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.3}", (*c as f64) / (total as f64))?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Default)]
struct MessageAccumulator {
    /// Number of occurrences of each unique message.
    message_counts: BTreeMap<Cow<'static, str>, usize>,
}

impl MessageAccumulator {
    fn insert(&mut self, message: Cow<'static, str>) {
        *self.message_counts.entry(message).or_insert(0) += 1;
    }
}

impl fmt::Display for MessageAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.message_counts.len() == 1 {
            for (message, count) in &self.message_counts {
                write!(f, "[x{}] {}", count, message)?;
            }
        } else {
            for (message, count) in &self.message_counts {
                write!(f, "\n\t[x{}] {}", count, message)?;
            }
        }
        Ok(())
    }
}
