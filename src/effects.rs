//! Observer side effects
//!
//! Observers do not touch files or the request directly. They emit
//! [`Effect`] descriptors; an [`EffectDispatcher`] executes them after the
//! notification pass.

use tracing::debug;
use uuid::Uuid;

use crate::Result;
use crate::eventlog::{EventLog, LogRecord};

/// Side effect requested by an observer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a record to the event log
    Log(LogRecord),
    /// Show a flash message to the requesting user
    Flash(String),
}

/// Executes effects against an event log
#[derive(Debug, Clone)]
pub struct EffectDispatcher {
    log: EventLog,
}

impl EffectDispatcher {
    /// Dispatcher writing to `log`
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }

    /// Event log written by this dispatcher
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Execute effects in order
    ///
    /// Log records are appended stamped with `assembly`. Flash messages are
    /// returned, in order, for the caller to queue on its request.
    pub fn dispatch(&self, effects: Vec<Effect>, assembly: Uuid) -> Result<Vec<String>> {
        let mut messages = Vec::new();
        let mut written = 0usize;
        for effect in effects {
            match effect {
                Effect::Log(record) => {
                    self.log.append(&record, assembly)?;
                    written += 1;
                }
                Effect::Flash(message) => messages.push(message),
            }
        }
        debug!(
            "Assembly {}: {} log records written, {} flash messages",
            assembly,
            written,
            messages.len()
        );
        Ok(messages)
    }
}
