//! Remote tree store abstraction
//!
//! The backing store is an opaque key-value tree with subscribe / set /
//! update / remove primitives, at-least-once snapshot delivery and
//! last-write-wins semantics per leaf path. Two implementations:
//!
//! - [`MemoryStore`]: in-process tree for tests, demos and offline work.
//! - [`RestStore`]: Firebase-RTDB-style REST backend with an SSE
//!   subscription stream.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::error::ClientResult;

mod memory;
mod rest;
pub(crate) mod tree;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// A full copy of the remote tree's current contents, delivered to every
/// subscriber on any change.
pub type TreeSnapshot = Value;

/// Client handle to the remote tree store.
///
/// Writes resolve when the store has accepted them locally; confirmation
/// of the resulting state arrives later via the snapshot feed, never as a
/// request/response pair.
#[async_trait]
pub trait TreeStore: Send + Sync {
    /// Current snapshot plus a live feed of whole-tree snapshots.
    fn subscribe(&self) -> (TreeSnapshot, broadcast::Receiver<TreeSnapshot>);

    /// Wholesale overwrite of the subtree at `path`.
    async fn set(&self, path: &str, value: Value) -> ClientResult<()>;

    /// Shallow merge of named fields at `path`, siblings untouched.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> ClientResult<()>;

    /// Multi-path combined write rooted at the tree root. Keys are slash
    /// paths; a `null` value deletes that path. All paths land in a
    /// single snapshot.
    async fn update_root(&self, writes: Map<String, Value>) -> ClientResult<()>;

    /// Delete the subtree at `path`.
    async fn remove(&self, path: &str) -> ClientResult<()>;
}
