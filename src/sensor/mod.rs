//! Visibility sensing
//!
//! A [`Sentinel`] models the observed element at the end of a rendered list:
//! the embedding view flips its visibility bit as it enters or leaves the
//! viewport ("any visible pixel"). A [`VisibilitySensor`] attaches to a
//! sentinel and yields every raw visibility transition — no debouncing, no
//! filtering. Because each yielded value is a change, a `true` is exactly a
//! rising edge.
//!
//! Attachment is a scoped resource: dropping the sensor detaches it from the
//! sentinel on every exit path, error paths included.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

/// The observed element. Owns the current visibility bit and fans
/// transitions out to attached sensors.
#[derive(Debug, Default)]
pub struct Sentinel {
    visible: AtomicBool,
    observers: Mutex<Vec<mpsc::UnboundedSender<bool>>>,
}

impl Sentinel {
    /// Create a sentinel that starts out not visible
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visibility
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Report the sentinel's intersection with the viewport.
    ///
    /// Only actual transitions are emitted; repeating the current value is
    /// silent.
    pub fn set_visible(&self, visible: bool) {
        let previous = self.visible.swap(visible, Ordering::SeqCst);
        if previous == visible {
            return;
        }

        debug!("Sentinel visibility transition: {previous} -> {visible}");
        let mut observers = self.observers.lock().expect("observer list poisoned");
        observers.retain(|tx| tx.send(visible).is_ok());
    }

    /// Attach a sensor. The returned sensor yields every transition from
    /// this point on; it detaches when dropped.
    pub fn attach(&self) -> VisibilitySensor {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers
            .lock()
            .expect("observer list poisoned")
            .push(tx);
        VisibilitySensor { rx }
    }

    /// Number of currently attached sensors
    pub fn observer_count(&self) -> usize {
        let mut observers = self.observers.lock().expect("observer list poisoned");
        observers.retain(|tx| !tx.is_closed());
        observers.len()
    }
}

/// A live subscription to a sentinel's visibility transitions
#[derive(Debug)]
pub struct VisibilitySensor {
    rx: mpsc::UnboundedReceiver<bool>,
}

impl VisibilitySensor {
    /// Wait for the next visibility transition.
    ///
    /// Returns `None` once the sentinel has been dropped and all buffered
    /// transitions are drained.
    pub async fn next_transition(&mut self) -> Option<bool> {
        self.rx.recv().await
    }
}
