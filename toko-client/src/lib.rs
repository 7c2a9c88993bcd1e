//! Toko Client - client core for the storefront back-office
//!
//! Everything here is client-side: a [`TreeStore`] abstraction over the
//! remote realtime tree (with in-process and REST/SSE implementations),
//! the [`StoreMirror`] that keeps a typed snapshot of the whole tree, and
//! the [`LifecycleController`] that performs the mutating order
//! operations. There is no custom server; consistency comes from the
//! backing store's last-write-wins tree plus client-side reconciliation.

pub mod config;
pub mod decode;
pub mod error;
pub mod lifecycle;
pub mod mirror;
pub mod stats;
pub mod store;

pub use config::StoreConfig;
pub use decode::StoreData;
pub use error::{ClientError, ClientResult};
pub use lifecycle::{LifecycleController, Resolution};
pub use mirror::{MirrorEvent, StoreMirror};
pub use stats::DashboardStats;
pub use store::{MemoryStore, RestStore, TreeSnapshot, TreeStore};
