//! In-process tree store
//!
//! Backs tests, examples and offline development with the same contract
//! as the remote store: every mutation publishes a fresh whole-tree
//! snapshot to all subscribers, last write wins per leaf path.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::error::ClientResult;

use super::{TreeSnapshot, TreeStore, tree};

const SNAPSHOT_FEED_CAPACITY: usize = 64;

/// In-memory [`TreeStore`] implementation
pub struct MemoryStore {
    tree: RwLock<Value>,
    feed: broadcast::Sender<TreeSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_tree(Value::Object(Map::new()))
    }

    /// Start from a pre-populated tree, e.g. to simulate an existing
    /// remote database.
    pub fn with_tree(initial: Value) -> Self {
        let (feed, _) = broadcast::channel(SNAPSHOT_FEED_CAPACITY);
        Self {
            tree: RwLock::new(initial),
            feed,
        }
    }

    fn publish(&self) {
        // a send error only means nobody is subscribed right now
        let _ = self.feed.send(self.tree.read().clone());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreeStore for MemoryStore {
    fn subscribe(&self) -> (TreeSnapshot, broadcast::Receiver<TreeSnapshot>) {
        // subscribe before reading: a write racing this call is then seen
        // twice at worst, never missed
        let receiver = self.feed.subscribe();
        let snapshot = self.tree.read().clone();
        (snapshot, receiver)
    }

    async fn set(&self, path: &str, value: Value) -> ClientResult<()> {
        {
            let mut tree = self.tree.write();
            tree::set_at(&mut tree, path, value);
        }
        self.publish();
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> ClientResult<()> {
        {
            let mut tree = self.tree.write();
            tree::merge_at(&mut tree, path, &fields);
        }
        self.publish();
        Ok(())
    }

    async fn update_root(&self, writes: Map<String, Value>) -> ClientResult<()> {
        {
            let mut tree = self.tree.write();
            for (path, value) in writes {
                tree::set_at(&mut tree, &path, value);
            }
        }
        // all paths land in one snapshot
        self.publish();
        Ok(())
    }

    async fn remove(&self, path: &str) -> ClientResult<()> {
        self.set(path, Value::Null).await
    }
}
