//! Tolerant decoding of remote tree snapshots
//!
//! A snapshot is whatever the remote tree currently holds; branches may
//! be absent, partially written or malformed. Decoding is total: every
//! branch decodes independently, malformed records are skipped with a
//! warning, and absent branches fall back to documented defaults. Nothing
//! in here returns an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use shared::{
    LossRecord, Order, Product, StoreContent, StoreSettings, default_catalog, paths,
};

use crate::store::TreeSnapshot;

/// Typed, read-optimized snapshot of the whole remote tree
#[derive(Debug, Clone, PartialEq)]
pub struct StoreData {
    /// Unresolved orders, newest first
    pub active: Vec<Order>,
    /// Resolved orders, newest first
    pub history: Vec<Order>,
    /// Loss records, newest first
    pub losses: Vec<LossRecord>,
    /// Catalog, ascending by product id
    pub products: Vec<Product>,
    pub settings: StoreSettings,
    pub content: StoreContent,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            history: Vec::new(),
            losses: Vec::new(),
            products: default_catalog(),
            settings: StoreSettings::default(),
            content: StoreContent::default(),
        }
    }
}

impl StoreData {
    /// Decode a whole-tree snapshot.
    pub fn decode(snapshot: &TreeSnapshot) -> Self {
        let mut active = decode_keyed::<Order>(snapshot.get(paths::ACTIVE), paths::ACTIVE);
        active.sort_by_key(|o| std::cmp::Reverse(o.timestamp));

        let mut history = decode_keyed::<Order>(snapshot.get(paths::HISTORY), paths::HISTORY);
        history.sort_by_key(|o| std::cmp::Reverse(o.timestamp));

        let mut losses = decode_keyed::<LossRecord>(snapshot.get(paths::LOSSES), paths::LOSSES);
        losses.sort_by_key(|l| std::cmp::Reverse(l.timestamp));

        Self {
            active,
            history,
            losses,
            products: decode_products(snapshot.get(paths::PRODUCTS)),
            settings: decode_or_default(snapshot.get(paths::SETTINGS), paths::SETTINGS),
            content: decode_or_default(snapshot.get(paths::CONTENT), paths::CONTENT),
        }
    }

    pub fn find_active(&self, order_id: &str) -> Option<&Order> {
        self.active.iter().find(|o| o.id == order_id)
    }

    pub fn find_history(&self, order_id: &str) -> Option<&Order> {
        self.history.iter().find(|o| o.id == order_id)
    }
}

/// Decode a keyed map branch into records, skipping malformed entries.
fn decode_keyed<T: DeserializeOwned>(branch: Option<&Value>, branch_name: &str) -> Vec<T> {
    let Some(Value::Object(map)) = branch else {
        return Vec::new();
    };
    map.values()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(branch = branch_name, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}

/// Products tolerate both the current map encoding and the legacy array
/// encoding; absent or empty branches yield the built-in catalog.
fn decode_products(branch: Option<&Value>) -> Vec<Product> {
    let mut decoded: Vec<Product> = match branch {
        Some(Value::Object(map)) => map
            .values()
            .filter_map(|v| decode_product(v))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            // sparse remote arrays pad missing indices with null
            .filter(|v| !v.is_null())
            .filter_map(|v| decode_product(v))
            .collect(),
        _ => Vec::new(),
    };
    if decoded.is_empty() {
        return default_catalog();
    }
    decoded.sort_by_key(|p| p.id);
    decoded
}

fn decode_product(value: &Value) -> Option<Product> {
    match serde_json::from_value(value.clone()) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(branch = paths::PRODUCTS, error = %e, "skipping malformed product");
            None
        }
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(branch: Option<&Value>, branch_name: &str) -> T {
    let Some(value) = branch else {
        return T::default();
    };
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(branch = branch_name, error = %e, "branch has unexpected shape, using default");
            T::default()
        }
    }
}
