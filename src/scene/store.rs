//! Change propagation for the single logical store.
//!
//! Mutations are synchronous on the UI event loop, so there is no locking;
//! what matters is *which* of the two render passes a mutation requires.
//! The hub therefore carries two independent dirty lines instead of a single
//! re-render flag: structural invalidation (node set, visual settings,
//! bounds) and interaction invalidation (selection, hover).

/// Which render tier a change invalidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Full rebuild: geometry, hit areas, thumbnails.
    Structural,
    /// Attribute-only refresh: highlights and the lineage overlay.
    Interaction,
}

type Listener = Box<dyn FnMut(Signal)>;

/// Two-line dirty tracker with subscribe/notify semantics.
#[derive(Default)]
pub struct ChangeHub {
    structural: bool,
    interaction: bool,
    listeners: Vec<Listener>,
}

impl ChangeHub {
    /// Hub with no listeners and both lines clean.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a dirty line and notify subscribers.
    pub fn mark(&mut self, signal: Signal) {
        match signal {
            Signal::Structural => self.structural = true,
            Signal::Interaction => self.interaction = true,
        }
        for listener in &mut self.listeners {
            listener(signal);
        }
    }

    /// Consume a dirty line, returning whether it was raised.
    pub fn take(&mut self, signal: Signal) -> bool {
        let line = match signal {
            Signal::Structural => &mut self.structural,
            Signal::Interaction => &mut self.interaction,
        };
        std::mem::take(line)
    }

    /// Peek at a dirty line without consuming it.
    pub fn is_dirty(&self, signal: Signal) -> bool {
        match signal {
            Signal::Structural => self.structural,
            Signal::Interaction => self.interaction,
        }
    }

    /// Register a callback invoked on every raised signal.
    pub fn subscribe(&mut self, listener: impl FnMut(Signal) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl std::fmt::Debug for ChangeHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeHub")
            .field("structural", &self.structural)
            .field("interaction", &self.interaction)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
