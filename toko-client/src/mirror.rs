//! Store Mirror
//!
//! Holds the client-local typed snapshot of the entire remote tree and
//! keeps it current by consuming the store's snapshot feed on a
//! background task. Everything else reads from here; the mirror itself
//! never writes to the store.
//!
//! The new-order notification is an explicit comparison against the
//! active-order count captured from the previous snapshot, owned by the
//! mirror rather than any rendering lifecycle: it fires only when this is
//! not the first snapshot since subscription and the count strictly
//! increased.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::decode::StoreData;
use crate::store::{TreeSnapshot, TreeStore};

const EVENT_FEED_CAPACITY: usize = 64;

/// Event published to the UI layer on every applied snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    /// A snapshot was decoded and the mirrored data replaced
    Updated,
    /// Active-order count strictly increased since the previous snapshot;
    /// the UI plays the one-shot sound alert off this
    NewOrders { count: usize },
}

struct MirrorState {
    data: StoreData,
    /// Active-order count of the previous snapshot; `None` until the
    /// first snapshot has been applied
    prev_active_count: Option<usize>,
}

/// Client-local mirror of the remote tree
pub struct StoreMirror {
    state: RwLock<MirrorState>,
    events: broadcast::Sender<MirrorEvent>,
    cancel: CancellationToken,
}

impl StoreMirror {
    fn new() -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_FEED_CAPACITY);
        Arc::new(Self {
            state: RwLock::new(MirrorState {
                data: StoreData::default(),
                prev_active_count: None,
            }),
            events,
            cancel: CancellationToken::new(),
        })
    }

    /// Subscribe to `store` and keep the mirror current until
    /// [`shutdown`](Self::shutdown). The store handle is only used for
    /// the one subscription held for the session's lifetime.
    pub fn spawn(store: Arc<dyn TreeStore>) -> Arc<Self> {
        let mirror = Self::new();
        let (initial, mut feed) = store.subscribe();
        let task_mirror = mirror.clone();
        tokio::spawn(async move {
            task_mirror.apply_snapshot(&initial);
            loop {
                tokio::select! {
                    _ = task_mirror.cancel.cancelled() => break,
                    next = feed.recv() => match next {
                        Ok(snapshot) => task_mirror.apply_snapshot(&snapshot),
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            // snapshots are whole-tree, so skipping ahead
                            // is harmless for state; only the increase
                            // comparison spans the gap
                            tracing::warn!(missed, "snapshot feed lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("snapshot feed closed");
                            break;
                        }
                    },
                }
            }
        });
        mirror
    }

    /// Decode and install one snapshot, publishing mirror events.
    pub(crate) fn apply_snapshot(&self, snapshot: &TreeSnapshot) {
        let data = StoreData::decode(snapshot);
        let count = data.active.len();

        let new_orders = {
            let mut state = self.state.write();
            let fired = matches!(state.prev_active_count, Some(prev) if count > prev);
            state.prev_active_count = Some(count);
            state.data = data;
            fired
        };

        let _ = self.events.send(MirrorEvent::Updated);
        if new_orders {
            tracing::info!(active = count, "new order arrived");
            let _ = self.events.send(MirrorEvent::NewOrders { count });
        }
    }

    /// Current typed snapshot.
    pub fn data(&self) -> StoreData {
        self.state.read().data.clone()
    }

    /// Live feed of mirror events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<MirrorEvent> {
        self.events.subscribe()
    }

    /// Tear down the background task and with it the one store
    /// subscription.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
