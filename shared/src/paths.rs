//! Remote tree path layout
//!
//! Top-level branches of the remote store and the slash-path joiners for
//! addressing individual records. Collections are keyed maps (key =
//! record id), never sequential lists, so concurrent writers address
//! their own slots directly.

/// Active (unresolved) orders
pub const ACTIVE: &str = "transactions";
/// Resolved orders
pub const HISTORY: &str = "history";
/// Loss records
pub const LOSSES: &str = "losses";
/// Product catalog, keyed by product id
pub const PRODUCTS: &str = "products";
/// Store settings singleton
pub const SETTINGS: &str = "settings";
/// Storefront content singleton
pub const CONTENT: &str = "content";

pub fn active_order(order_id: &str) -> String {
    format!("{ACTIVE}/{order_id}")
}

pub fn history_order(order_id: &str) -> String {
    format!("{HISTORY}/{order_id}")
}

pub fn loss(loss_id: &str) -> String {
    format!("{LOSSES}/{loss_id}")
}
