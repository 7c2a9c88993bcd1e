//! REST tree store
//!
//! Talks to a Firebase-RTDB-style HTTP backend: `PUT`/`PATCH`/`DELETE` on
//! `{base}/{path}.json` for writes, and a root SSE stream
//! (`Accept: text/event-stream`) for the subscription. A background task
//! owns the stream, applies incoming `put`/`patch` events to a local
//! replica of the tree and broadcasts a full snapshot per event, so
//! subscribers get the same whole-tree feed the in-memory store provides.
//!
//! The replica is only ever advanced by the stream; writes do not touch
//! it. The issuing client therefore observes its own writes through the
//! same round trip as everyone else (no optimistic local state).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::RwLock;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::config::StoreConfig;
use crate::error::{ClientError, ClientResult};

use super::{TreeSnapshot, TreeStore, tree};

const SNAPSHOT_FEED_CAPACITY: usize = 64;

/// SSE event payload for `put` and `patch`
#[derive(Debug, Deserialize)]
struct StreamEvent {
    path: String,
    data: Value,
}

/// REST/SSE [`TreeStore`] implementation
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    write_timeout: Duration,
    replica: RwLock<Value>,
    feed: broadcast::Sender<TreeSnapshot>,
    cancel: CancellationToken,
}

impl RestStore {
    /// Build the client and start the subscription stream. Requires a
    /// running tokio runtime.
    pub fn connect(config: StoreConfig) -> ClientResult<Arc<Self>> {
        // no global timeout: it would also cut the long-lived SSE request
        let http = reqwest::Client::builder().build()?;
        let (feed, _) = broadcast::channel(SNAPSHOT_FEED_CAPACITY);
        let store = Arc::new(Self {
            http,
            base_url: config.database_url.trim_end_matches('/').to_string(),
            write_timeout: Duration::from_secs(config.request_timeout_secs),
            replica: RwLock::new(Value::Object(Map::new())),
            feed,
            cancel: CancellationToken::new(),
        });
        store
            .clone()
            .spawn_stream(Duration::from_secs(config.reconnect_delay_secs));
        Ok(store)
    }

    /// Stop the subscription stream. Write methods keep working.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn node_url(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            format!("{}/.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, path)
        }
    }

    fn spawn_stream(self: Arc<Self>, reconnect_delay: Duration) {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = self.run_stream() => {
                        match result {
                            Ok(()) => tracing::info!("event stream ended, reconnecting"),
                            Err(e) => tracing::warn!(error = %e, "event stream failed"),
                        }
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = tokio::time::sleep(reconnect_delay) => {}
                        }
                    }
                }
            }
            tracing::info!("event stream shut down");
        });
    }

    async fn run_stream(&self) -> ClientResult<()> {
        let response = self
            .http
            .get(self.node_url(""))
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;
        tracing::info!(url = %self.base_url, "subscribed to event stream");

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut event_name = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(pos) = buffer.find('\n') {
                let line: String = buffer.drain(..=pos).collect();
                let line = line.trim_end();
                if let Some(name) = line.strip_prefix("event:") {
                    event_name = name.trim().to_string();
                } else if let Some(data) = line.strip_prefix("data:") {
                    self.handle_event(&event_name, data.trim())?;
                }
                // blank lines terminate an event; the next event: line
                // overwrites the name anyway
            }
        }
        Ok(())
    }

    fn handle_event(&self, event: &str, data: &str) -> ClientResult<()> {
        match event {
            "put" | "patch" => {
                let ev: StreamEvent = serde_json::from_str(data)?;
                {
                    let mut replica = self.replica.write();
                    if event == "put" {
                        tree::set_at(&mut replica, &ev.path, ev.data);
                    } else if let Value::Object(fields) = ev.data {
                        tree::merge_at(&mut replica, &ev.path, &fields);
                    }
                }
                let _ = self.feed.send(self.replica.read().clone());
            }
            "keep-alive" => {}
            "cancel" | "auth_revoked" => {
                return Err(ClientError::Store(format!(
                    "stream closed by server: {event}"
                )));
            }
            other => tracing::debug!(event = other, "ignoring unknown stream event"),
        }
        Ok(())
    }
}

impl Drop for RestStore {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[async_trait]
impl TreeStore for RestStore {
    fn subscribe(&self) -> (TreeSnapshot, broadcast::Receiver<TreeSnapshot>) {
        let receiver = self.feed.subscribe();
        let snapshot = self.replica.read().clone();
        (snapshot, receiver)
    }

    async fn set(&self, path: &str, value: Value) -> ClientResult<()> {
        self.http
            .put(self.node_url(path))
            .timeout(self.write_timeout)
            .json(&value)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> ClientResult<()> {
        self.http
            .patch(self.node_url(path))
            .timeout(self.write_timeout)
            .json(&fields)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_root(&self, writes: Map<String, Value>) -> ClientResult<()> {
        // multi-path patch on the root: slash-path keys, null deletes
        self.http
            .patch(self.node_url(""))
            .timeout(self.write_timeout)
            .json(&writes)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> ClientResult<()> {
        self.http
            .delete(self.node_url(path))
            .timeout(self.write_timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detached_store() -> RestStore {
        let (feed, _) = broadcast::channel(8);
        RestStore {
            http: reqwest::Client::new(),
            base_url: "http://localhost:9000".into(),
            write_timeout: Duration::from_secs(1),
            replica: RwLock::new(Value::Object(Map::new())),
            feed,
            cancel: CancellationToken::new(),
        }
    }

    #[test]
    fn node_urls_append_json_suffix() {
        let store = detached_store();
        assert_eq!(store.node_url(""), "http://localhost:9000/.json");
        assert_eq!(
            store.node_url("transactions/A1"),
            "http://localhost:9000/transactions/A1.json"
        );
    }

    #[test]
    fn put_event_replaces_subtree_and_broadcasts() {
        let store = detached_store();
        let mut rx = store.feed.subscribe();

        store
            .handle_event("put", r#"{"path":"/transactions/A1","data":{"status":"pending"}}"#)
            .unwrap();

        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot["transactions"]["A1"]["status"], "pending");
    }

    #[test]
    fn patch_event_merges_fields() {
        let store = detached_store();
        store
            .handle_event("put", r#"{"path":"/transactions/A1","data":{"status":"pending","total":100}}"#)
            .unwrap();
        store
            .handle_event("patch", r#"{"path":"/transactions/A1","data":{"status":"paid"}}"#)
            .unwrap();

        let replica = store.replica.read().clone();
        assert_eq!(replica["transactions"]["A1"]["status"], "paid");
        assert_eq!(replica["transactions"]["A1"]["total"], 100);
    }

    #[test]
    fn root_put_null_clears_replica() {
        let store = detached_store();
        store
            .handle_event("put", r#"{"path":"/","data":{"losses":{"a":{}}}}"#)
            .unwrap();
        store.handle_event("put", r#"{"path":"/","data":null}"#).unwrap();
        assert_eq!(store.replica.read().clone(), json!({}));
    }

    #[test]
    fn keep_alive_is_ignored_and_cancel_errors() {
        let store = detached_store();
        assert!(store.handle_event("keep-alive", "null").is_ok());
        assert!(store.handle_event("cancel", "null").is_err());
    }
}
