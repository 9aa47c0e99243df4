//! Signal/slot system for Gable.
//!
//! A [`Signal<Args>`] is an observable event source: slots (closures) are
//! connected to it and invoked, in registration order, every time the
//! signal is emitted. Emission is synchronous and happens on the emitting
//! thread; there is no queuing or cross-thread dispatch.
//!
//! Emission works against a snapshot of the connection list, so a slot may
//! freely connect or disconnect slots on the same signal without affecting
//! the in-flight notification round. A slot that panics unwinds through
//! `emit` and the remaining slots of that round are not invoked.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A unique identifier for a signal-slot connection.
///
/// Returned by [`Signal::connect`] and accepted by [`Signal::disconnect`].
/// The id stays valid until the connection is disconnected or the signal
/// is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// Internal storage for a single connection.
struct Connection<Args> {
    id: ConnectionId,
    /// The slot to invoke (Arc-wrapped so emission can snapshot it).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with synchronously invoked slots.
///
/// # Type Parameter
///
/// - `Args`: the argument type passed to connected slots. Use `()` for
///   signals that carry no payload.
///
/// # Example
///
/// ```
/// use gable_core::Signal;
///
/// let renamed = Signal::<String>::new();
/// let conn = renamed.connect(|name| {
///     assert_eq!(name, "sidebar");
/// });
/// renamed.emit("sidebar".to_string());
/// renamed.disconnect(conn);
/// ```
pub struct Signal<Args> {
    /// Connections in registration order.
    connections: Mutex<Vec<Connection<Args>>>,
    /// Source of fresh connection ids.
    next_id: AtomicU64,
}

impl<Args: Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// The slot is invoked on every subsequent [`emit`](Self::emit), after
    /// every slot that was connected before it. Returns a [`ConnectionId`]
    /// for later disconnection.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.connections.lock().push(Connection {
            id,
            slot: Arc::new(slot),
        });
        id
    }

    /// Disconnect a slot by its connection id.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        let before = connections.len();
        connections.retain(|connection| connection.id != id);
        connections.len() != before
    }

    /// Number of currently connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking every connected slot in registration order.
    ///
    /// The connection list is snapshotted before the first slot runs, so
    /// connects and disconnects performed by slots take effect only from
    /// the next emission.
    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = self
            .connections
            .lock()
            .iter()
            .map(|connection| Arc::clone(&connection.slot))
            .collect();
        tracing::trace!(slots = snapshot.len(), "emitting signal");
        for slot in snapshot {
            slot(&args);
        }
    }
}

impl<Args: Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_run_in_registration_order() {
        let signal = Signal::<i32>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            signal.connect(move |value| {
                order.lock().push((tag, *value));
            });
        }

        signal.emit(7);
        assert_eq!(
            *order.lock(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn disconnect_removes_a_single_slot() {
        let signal = Signal::<()>::new();
        let calls = Arc::new(Mutex::new(0));

        let kept = {
            let calls = Arc::clone(&calls);
            signal.connect(move |()| *calls.lock() += 1)
        };
        let dropped = {
            let calls = Arc::clone(&calls);
            signal.connect(move |()| *calls.lock() += 10)
        };

        assert_eq!(signal.connection_count(), 2);
        assert!(signal.disconnect(dropped));
        assert!(!signal.disconnect(dropped));

        signal.emit(());
        assert_eq!(*calls.lock(), 1);

        assert!(signal.disconnect(kept));
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn emission_runs_against_a_snapshot() {
        let signal = Arc::new(Signal::<()>::new());
        let fired = Arc::new(Mutex::new(Vec::new()));
        let victim = Arc::new(Mutex::new(None::<ConnectionId>));

        // The first slot disconnects the second mid-emission; the second
        // must still run in the same round.
        {
            let signal_outer = Arc::clone(&signal);
            let signal = Arc::clone(&signal);
            let fired = Arc::clone(&fired);
            let victim = Arc::clone(&victim);
            signal_outer.connect(move |()| {
                fired.lock().push("first");
                if let Some(id) = *victim.lock() {
                    signal.disconnect(id);
                }
            });
        }
        let second = {
            let fired = Arc::clone(&fired);
            signal.connect(move |()| fired.lock().push("second"))
        };
        *victim.lock() = Some(second);

        signal.emit(());
        assert_eq!(*fired.lock(), vec!["first", "second"]);

        signal.emit(());
        assert_eq!(*fired.lock(), vec!["first", "second", "first"]);
    }

    #[test]
    fn slots_may_connect_during_emission() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(Mutex::new(0));

        {
            let signal_outer = Arc::clone(&signal);
            let signal = Arc::clone(&signal);
            let calls = Arc::clone(&calls);
            signal_outer.connect(move |()| {
                let calls = Arc::clone(&calls);
                signal.connect(move |()| *calls.lock() += 1);
            });
        }

        signal.emit(());
        // The freshly connected slot only participates from the next round.
        assert_eq!(*calls.lock(), 0);
        signal.emit(());
        assert_eq!(*calls.lock(), 1);
    }
}
