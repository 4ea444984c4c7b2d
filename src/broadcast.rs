//! Best-effort fan-out of board snapshots to connected viewers.
//!
//! Every viewer owns a bounded queue. A broadcast offers the snapshot to each
//! queue without waiting, so a slow or vanished viewer never holds up the rest.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, instrument, warn};

/// Serialized board, shared by every queue it lands in.
pub type Snapshot = Arc<str>;

/// Identifier handed to each connected viewer.
pub type ViewerId = u64;

/// Default per-viewer queue depth.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Receiving end for one viewer.
#[derive(Debug)]
pub struct Viewer {
    id: ViewerId,
    rx: mpsc::Receiver<Snapshot>,
}

impl Viewer {
    /// This viewer's id, used to disconnect it.
    pub fn id(&self) -> ViewerId {
        self.id
    }

    /// Waits for the next snapshot. `None` once the broadcaster drops this viewer.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Takes a queued snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }
}

/// Set of connected viewers. Cheap to clone; clones share the set.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    viewers: Arc<Mutex<HashMap<ViewerId, mpsc::Sender<Snapshot>>>>,
    next_id: Arc<AtomicU64>,
    capacity: usize,
}

impl Broadcaster {
    /// Creates a broadcaster whose viewers buffer up to `capacity` snapshots.
    #[instrument]
    pub fn new(capacity: usize) -> Self {
        info!(capacity, "Creating broadcaster");
        Self {
            viewers: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            capacity: capacity.max(1),
        }
    }

    fn viewers(&self) -> MutexGuard<'_, HashMap<ViewerId, mpsc::Sender<Snapshot>>> {
        self.viewers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new viewer.
    #[instrument(skip(self))]
    pub fn connect(&self) -> Viewer {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.capacity);
        let count = {
            let mut viewers = self.viewers();
            viewers.insert(id, tx);
            viewers.len()
        };
        info!(viewer_id = id, viewers = count, "Viewer connected");
        Viewer { id, rx }
    }

    /// Removes a viewer. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn disconnect(&self, id: ViewerId) {
        let removed = self.viewers().remove(&id).is_some();
        if removed {
            info!(viewer_id = id, "Viewer disconnected");
        } else {
            debug!(viewer_id = id, "Disconnect for unknown viewer");
        }
    }

    /// Number of viewers currently registered.
    pub fn viewer_count(&self) -> usize {
        self.viewers().len()
    }

    /// Offers `snapshot` to every viewer and returns how many accepted it.
    ///
    /// Closed viewers are pruned. A viewer with a full queue misses this
    /// snapshot but stays connected.
    #[instrument(skip(self, snapshot), fields(bytes = snapshot.len()))]
    pub fn broadcast(&self, snapshot: Snapshot) -> usize {
        let mut viewers = self.viewers();
        let mut delivered = 0;
        let mut closed = Vec::new();

        for (id, tx) in viewers.iter() {
            match tx.try_send(Arc::clone(&snapshot)) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(viewer_id = id, "Viewer queue full, snapshot dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(viewer_id = id, "Viewer channel closed");
                    closed.push(*id);
                }
            }
        }

        for id in &closed {
            viewers.remove(id);
        }

        debug!(delivered, pruned = closed.len(), viewers = viewers.len(), "Broadcast complete");
        delivered
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}
