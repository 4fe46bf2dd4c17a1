//! Typed notification channels.
//!
//! Each event kind gets its own [`Emitter`]; observers subscribe to exactly the
//! channel they care about. Handlers run synchronously, in connection order,
//! on the thread that emits.

use std::fmt;

use crate::layers::LayerId;

/// Handle returned by [`Emitter::connect`], used to disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// A single-threaded notification channel carrying values of type `T`.
pub struct Emitter<T> {
    handlers: Vec<(ConnectionId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler.
    pub fn connect<F>(&mut self, handler: F) -> ConnectionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Deliver `value` to every handler.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in &mut self.handlers {
            handler(value);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Change to the layer collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerListChange {
    /// A layer was inserted at `index`
    Added { id: LayerId, index: usize },
    /// A layer was removed
    Removed { id: LayerId },
    /// The order changed without adding or removing layers
    Reordered,
}

/// Control-bar slider state pushed to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderUpdate {
    /// New handle values, when the slider is enabled
    pub values: Option<(f32, f32)>,
    pub enabled: bool,
}

/// Notification channels exposed by the viewer.
#[derive(Debug, Default)]
pub struct ViewerEvents {
    /// Status text changed
    pub status: Emitter<String>,
    /// Help text changed
    pub help: Emitter<String>,
    /// Annotation mode toggled
    pub annotation: Emitter<bool>,
    /// Active markers layer changed (index into the layer list)
    pub active_markers: Emitter<Option<usize>>,
    /// Layers added, removed or reordered
    pub layers: Emitter<LayerListChange>,
    /// Color-limit slider should move or change enabled state
    pub update_slider: Emitter<SliderUpdate>,
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_reaches_handlers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new();

        let first = Rc::clone(&log);
        emitter.connect(move |v: &i32| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&log);
        emitter.connect(move |v: &i32| second.borrow_mut().push(("second", *v)));

        emitter.emit(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_disconnect() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = Emitter::new();
        let c = Rc::clone(&count);
        let id = emitter.connect(move |_: &()| *c.borrow_mut() += 1);

        emitter.emit(&());
        assert!(emitter.disconnect(id));
        assert!(!emitter.disconnect(id));
        emitter.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert!(emitter.is_empty());
    }
}
