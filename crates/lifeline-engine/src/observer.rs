//! Change notifications for the presentation layer
//!
//! The engine owns its listeners; there is no global event bus. A listener
//! registered with [`Listeners::subscribe`] sees every [`EngineEvent`], one
//! registered with [`Listeners::on_reset`] only sees [`EngineEvent::Reset`].

use crate::Status;
use serde::Serialize;
use std::fmt;

/// Something observable changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EngineEvent {
    /// All cells, the current generation and history were cleared
    Reset,
    /// Play loop started or stopped
    StatusChanged(Status),
    /// A forward step was committed
    Stepped {
        generation: u64,
        births: usize,
        deaths: usize,
    },
    /// A step was undone
    SteppedBack { generation: u64 },
    /// The play-loop interval changed
    IntervalChanged { interval_ms: u64 },
    SnapshotSaved { index: usize },
    SnapshotDeleted { index: usize },
    SnapshotRestored { index: usize },
}

/// Handle returned when registering a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&EngineEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interest {
    All,
    ResetOnly,
}

impl Interest {
    fn wants(self, event: &EngineEvent) -> bool {
        match self {
            Interest::All => true,
            Interest::ResetOnly => matches!(event, EngineEvent::Reset),
        }
    }
}

/// Registered listeners, notified in registration order
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Interest, Callback)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.register(Interest::All, Box::new(listener))
    }

    /// Register a listener for reset only
    pub fn on_reset(&mut self, listener: impl FnMut(&EngineEvent) + 'static) -> ListenerId {
        self.register(Interest::ResetOnly, Box::new(listener))
    }

    fn register(&mut self, interest: Interest, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, interest, callback));
        id
    }

    /// Remove a listener; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, event: &EngineEvent) {
        for (_, interest, callback) in &mut self.entries {
            if interest.wants(event) {
                callback(event);
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
