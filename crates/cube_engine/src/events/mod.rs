//! Scene event queue
//!
//! Engines report clicks and contacts through callbacks that can fire at any
//! point in their step. Instead of mutating the scene from inside those
//! callbacks, adapters push a [`SceneEvent`] here and the scene drains the
//! queue once per tick, before it iterates the objects.

use std::collections::VecDeque;

use crate::scene::ObjectId;

/// What an object collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    /// Another cube
    Object(ObjectId),
    /// The floor plane
    Floor,
}

/// Event raised by the scene adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEvent {
    /// Pointer click landed on an object
    Clicked {
        /// Clicked object
        id: ObjectId,
    },
    /// An object started touching something
    Collided {
        /// Object receiving the collision callback
        id: ObjectId,
        /// What it touched
        other: Contact,
    },
}

impl SceneEvent {
    /// Object the event is addressed to
    pub fn target(&self) -> ObjectId {
        match *self {
            Self::Clicked { id } | Self::Collided { id, .. } => id,
        }
    }
}

/// FIFO buffer of pending events
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    pending: VecDeque<SceneEvent>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next drain
    pub fn push(&mut self, event: SceneEvent) {
        log::trace!("Queued {:?}", event);
        self.pending.push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.pending.drain(..)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending events (used on scene reset)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_is_fifo_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(SceneEvent::Clicked { id: ObjectId(3) });
        queue.push(SceneEvent::Collided {
            id: ObjectId(1),
            other: Contact::Floor,
        });
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained[0], SceneEvent::Clicked { id: ObjectId(3) });
        assert_eq!(drained[1].target(), ObjectId(1));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        queue.push(SceneEvent::Clicked { id: ObjectId(0) });
        queue.clear();
        assert_eq!(queue.drain().count(), 0);
    }
}
