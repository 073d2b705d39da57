//! Pointer listeners that exist only for the duration of a drag

use std::collections::HashSet;
use std::fmt;

/// A global pointer listener used while resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerListener {
    /// Mouse movement
    MouseMove,
    /// Touch movement
    TouchMove,
    /// Mouse button release
    MouseUp,
    /// Touch release
    TouchEnd,
}

impl PointerListener {
    /// The full set registered for a drag, mouse and touch variants alike
    pub const DRAG_SET: [Self; 4] = [
        Self::MouseMove,
        Self::TouchMove,
        Self::MouseUp,
        Self::TouchEnd,
    ];

    /// DOM event name of this listener
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::MouseMove => "mousemove",
            Self::TouchMove => "touchmove",
            Self::MouseUp => "mouseup",
            Self::TouchEnd => "touchend",
        }
    }
}

impl fmt::Display for PointerListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Where drag listeners get attached.
///
/// Deregistering a listener that is not registered must be a no-op, so
/// duplicate or out-of-order end-of-drag signals are harmless.
pub trait ListenerRegistry {
    /// Attaches a listener
    fn register(&mut self, listener: PointerListener);

    /// Detaches a listener if it is attached
    fn deregister(&mut self, listener: PointerListener);
}

/// In-process listener registry.
///
/// Tracks which listeners are attached and how many attachments were made
/// overall, which is what a headless host needs and what tests assert on.
#[derive(Debug, Default, Clone)]
pub struct ListenerSet {
    active: HashSet<PointerListener>,
    registrations: usize,
}

impl ListenerSet {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `listener` is attached
    #[must_use]
    pub fn is_registered(&self, listener: PointerListener) -> bool {
        self.active.contains(&listener)
    }

    /// Number of listeners currently attached
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of successful attachments since creation
    #[must_use]
    pub const fn total_registrations(&self) -> usize {
        self.registrations
    }
}

impl ListenerRegistry for ListenerSet {
    fn register(&mut self, listener: PointerListener) {
        if self.active.insert(listener) {
            self.registrations += 1;
        } else {
            tracing::warn!(%listener, "Pointer listener already registered");
        }
    }

    fn deregister(&mut self, listener: PointerListener) {
        self.active.remove(&listener);
    }
}

/// Attaches the whole drag set
pub(crate) fn acquire_drag_listeners<R: ListenerRegistry + ?Sized>(registry: &mut R) {
    for listener in PointerListener::DRAG_SET {
        registry.register(listener);
    }
}

/// Detaches the whole drag set, whichever variant started the drag
pub(crate) fn release_drag_listeners<R: ListenerRegistry + ?Sized>(registry: &mut R) {
    for listener in PointerListener::DRAG_SET {
        registry.deregister(listener);
    }
}
