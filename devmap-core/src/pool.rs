use std::ops::{Deref, DerefMut};

use devmap_types::event::{EventKind, RawEvent, RawEventData};
use parking_lot::Mutex;

/**
 * Recycles raw events
 *
 * Events only come back through `PooledEvent`'s drop, which zeroes them first,
 * so a checkout can never observe data from a previous use.
 */
#[derive(Debug, Default)]
pub struct EventPool {
    free: Mutex<Vec<RawEvent>>,
}

impl EventPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    pub fn checkout(&self, kind: EventKind) -> PooledEvent<'_> {
        let event = match self.free.lock().pop() {
            Some(mut event) => {
                event.data = RawEventData::new(kind);
                event
            }
            None => RawEvent::new(kind),
        };

        PooledEvent {
            event: Some(event),
            pool: self,
        }
    }

    /// Number of events waiting to be reused
    pub fn available(&self) -> usize {
        self.free.lock().len()
    }

    fn give_back(&self, mut event: RawEvent) {
        event.reset();
        self.free.lock().push(event);
    }
}

#[derive(Debug)]
pub struct PooledEvent<'a> {
    event: Option<RawEvent>,
    pool: &'a EventPool,
}

impl PooledEvent<'_> {
    /// Takes the event out of the pool for good
    pub fn detach(mut self) -> RawEvent {
        self.event.take().expect("pooled event is present until drop")
    }
}

impl Deref for PooledEvent<'_> {
    type Target = RawEvent;

    fn deref(&self) -> &RawEvent {
        self.event.as_ref().expect("pooled event is present until drop")
    }
}

impl DerefMut for PooledEvent<'_> {
    fn deref_mut(&mut self) -> &mut RawEvent {
        self.event.as_mut().expect("pooled event is present until drop")
    }
}

impl Drop for PooledEvent<'_> {
    fn drop(&mut self) {
        if let Some(event) = self.event.take() {
            self.pool.give_back(event);
        }
    }
}
