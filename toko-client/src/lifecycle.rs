//! Order lifecycle controller
//!
//! All mutating operations against the remote tree live here: order
//! submission, proof attachment, resolution (the active → history move),
//! loss records, and the wholesale catalog/settings/content writes.
//!
//! The controller never keeps local optimistic state. It reads "where is
//! this order" from the [`StoreMirror`] and issues writes; the effect
//! becomes visible through the next snapshot the store pushes back, on
//! this client and every other one alike. Write failures are logged and
//! propagated, never retried; there is nothing local to roll back.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use shared::{
    LossRecord, Order, OrderStatus, Product, StoreContent, StoreSettings, Testimonial, paths,
    shop_rating, util,
};

use crate::error::{ClientError, ClientResult};
use crate::mirror::StoreMirror;
use crate::store::TreeStore;

/// Terminal status an order can be resolved to.
///
/// A separate type rather than [`OrderStatus`] so resolution can never be
/// called with `pending` or `paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Admin accepted the order
    Confirmed,
    /// Admin rejected the order
    Rejected,
    /// Customer withdrew the order
    Cancelled,
}

impl From<Resolution> for OrderStatus {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Confirmed => OrderStatus::Confirmed,
            Resolution::Rejected => OrderStatus::Rejected,
            Resolution::Cancelled => OrderStatus::Cancelled,
        }
    }
}

/// Mutating operations on the order lifecycle and store records
pub struct LifecycleController {
    store: Arc<dyn TreeStore>,
    mirror: Arc<StoreMirror>,
}

impl LifecycleController {
    pub fn new(store: Arc<dyn TreeStore>, mirror: Arc<StoreMirror>) -> Self {
        Self { store, mirror }
    }

    /// Write a full order record into the active collection, keyed by the
    /// order's own id. Last write wins on key collision; totals are not
    /// validated here.
    pub async fn submit_order(&self, order: &Order) -> ClientResult<()> {
        if order.id.trim().is_empty() {
            return Err(ClientError::Validation("order id must not be empty".into()));
        }
        tracing::info!(order_id = %order.id, total = order.total, "submitting order");
        let value = serde_json::to_value(order)?;
        self.store.set(&paths::active_order(&order.id), value).await
    }

    /// Attach a proof-of-payment reference. An active order is also moved
    /// to `paid`; an archived order only gets the proof field patched so
    /// its terminal status survives a late upload. Unknown ids are a
    /// no-op.
    pub async fn attach_proof(&self, order_id: &str, proof_url: &str) -> ClientResult<()> {
        let data = self.mirror.data();
        if data.find_active(order_id).is_some() {
            let mut fields = Map::new();
            fields.insert("proofUrl".into(), json!(proof_url));
            fields.insert("status".into(), json!(OrderStatus::Paid));
            tracing::info!(order_id, "payment proof attached");
            self.store.update(&paths::active_order(order_id), fields).await
        } else if data.find_history(order_id).is_some() {
            let mut fields = Map::new();
            fields.insert("proofUrl".into(), json!(proof_url));
            self.store.update(&paths::history_order(order_id), fields).await
        } else {
            tracing::warn!(order_id, "proof attach for unknown order ignored");
            Ok(())
        }
    }

    /// Resolve an order.
    ///
    /// Active orders are removed from the active collection and inserted
    /// into history with the new status in one combined write, so no
    /// snapshot shows the order in both places. Orders already in history
    /// get their status patched in place (administrative correction).
    /// Unknown ids are a no-op.
    pub async fn resolve(&self, order_id: &str, resolution: Resolution) -> ClientResult<()> {
        let status = OrderStatus::from(resolution);
        let data = self.mirror.data();

        if let Some(order) = data.find_active(order_id) {
            if !order.status.can_transition(status) {
                tracing::warn!(
                    order_id,
                    from = %order.status,
                    to = %status,
                    "transition outside the nominal state machine"
                );
            }
            let mut moved = order.clone();
            moved.status = status;

            let mut writes = Map::new();
            writes.insert(paths::active_order(order_id), Value::Null);
            writes.insert(paths::history_order(order_id), serde_json::to_value(&moved)?);

            tracing::info!(order_id, status = %status, "resolving order");
            if let Err(e) = self.store.update_root(writes).await {
                tracing::error!(order_id, error = %e, "failed to move order to history");
                return Err(e);
            }
            Ok(())
        } else if data.find_history(order_id).is_some() {
            let mut fields = Map::new();
            fields.insert("status".into(), json!(status));
            tracing::info!(order_id, status = %status, "correcting archived order status");
            self.store.update(&paths::history_order(order_id), fields).await
        } else {
            tracing::warn!(order_id, "resolve for unknown order ignored");
            Ok(())
        }
    }

    /// Append a loss record under a freshly generated id.
    pub async fn record_loss(&self, amount: f64, description: &str) -> ClientResult<()> {
        if !(amount > 0.0) {
            return Err(ClientError::Validation("loss amount must be positive".into()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(ClientError::Validation(
                "loss description must not be empty".into(),
            ));
        }
        let loss = LossRecord {
            id: util::new_record_id(),
            amount,
            description: description.to_string(),
            timestamp: util::now_millis(),
        };
        tracing::info!(loss_id = %loss.id, amount, "recording loss");
        let value = serde_json::to_value(&loss)?;
        self.store.set(&paths::loss(&loss.id), value).await
    }

    /// Delete all orders (active and history) and all loss records in one
    /// combined write. Products, settings and content are untouched.
    pub async fn clear_operational_data(&self) -> ClientResult<()> {
        let mut writes = Map::new();
        writes.insert(paths::ACTIVE.to_string(), Value::Null);
        writes.insert(paths::HISTORY.to_string(), Value::Null);
        writes.insert(paths::LOSSES.to_string(), Value::Null);
        tracing::warn!("clearing all orders and loss records");
        self.store.update_root(writes).await
    }

    /// Overwrite the whole catalog, re-encoded as a map keyed by product
    /// id so concurrent edits address their own slots.
    pub async fn save_products(&self, products: &[Product]) -> ClientResult<()> {
        let mut map = Map::new();
        for product in products {
            map.insert(product.id.to_string(), serde_json::to_value(product)?);
        }
        tracing::info!(count = products.len(), "replacing product catalog");
        self.store.set(paths::PRODUCTS, Value::Object(map)).await
    }

    /// Wholesale settings overwrite.
    pub async fn save_settings(&self, settings: &StoreSettings) -> ClientResult<()> {
        let value = serde_json::to_value(settings)?;
        self.store.set(paths::SETTINGS, value).await
    }

    /// Wholesale content overwrite.
    pub async fn save_content(&self, content: &StoreContent) -> ClientResult<()> {
        let value = serde_json::to_value(content)?;
        self.store.set(paths::CONTENT, value).await
    }

    /// Append a testimonial and persist the whole content object with the
    /// recomputed aggregate rating in a single write.
    pub async fn add_testimonial(&self, testimonial: Testimonial) -> ClientResult<()> {
        if !(0.0..=5.0).contains(&testimonial.rating) {
            return Err(ClientError::Validation(
                "testimonial rating must be within 0..=5".into(),
            ));
        }
        let mut content = self.mirror.data().content;
        content.testimonials.push(testimonial);
        content.shop_rating = shop_rating(&content.testimonials);
        self.save_content(&content).await
    }
}
