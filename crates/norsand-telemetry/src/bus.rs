//! Event bus — channel-based event dispatch with pluggable sinks.
//!
//! Producers hold an [`EventEmitter`] (a cloneable channel sender) and may
//! emit from any thread. Sinks are owned by the bus and only run when the
//! owning thread calls [`EventBus::flush`].

use std::sync::mpsc;

use crate::events::BatchEvent;
use crate::sinks::EventSink;

/// Producer handle. Cheap to clone; safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    sender: Option<mpsc::Sender<BatchEvent>>,
}

impl EventEmitter {
    /// An emitter that drops every event.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Emit an event. A disabled emitter or a dropped bus makes this a no-op.
    pub fn emit(&self, event: BatchEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }
}

/// Event bus for batch telemetry.
pub struct EventBus {
    sender: mpsc::Sender<BatchEvent>,
    receiver: mpsc::Receiver<BatchEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus hands out disabled emitters.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. Only affects emitters created afterwards.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns a producer handle for this bus.
    pub fn emitter(&self) -> EventEmitter {
        if self.enabled {
            EventEmitter {
                sender: Some(self.sender.clone()),
            }
        } else {
            EventEmitter::disabled()
        }
    }

    /// Emit an event from the owning thread.
    pub fn emit(&self, event: BatchEvent) {
        if self.enabled {
            let _ = self.sender.send(event);
        }
    }

    /// Dispatch all pending events to the registered sinks. Returns the
    /// number of events dispatched.
    pub fn flush(&mut self) -> usize {
        let mut n = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            n += 1;
        }
        n
    }

    /// Flush, then let every sink finalize.
    pub fn finish(&mut self) -> usize {
        let n = self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
        n
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
