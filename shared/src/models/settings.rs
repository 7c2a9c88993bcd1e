//! Store settings model

use serde::{Deserialize, Serialize};

/// Store-wide settings singleton, replaced wholesale on save.
///
/// Every field carries a serde default so partially written remote
/// objects still decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    pub store_name: String,
    /// WhatsApp contact number with country prefix, digits only
    pub whatsapp: String,
    /// Store-wide payment QR image reference
    pub qris_image_url: String,
    /// Minutes a customer has to complete a QRIS payment
    pub qris_timer_minutes: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "TOKOTOPARYA".into(),
            whatsapp: "628123456789".into(),
            qris_image_url: String::new(),
            qris_timer_minutes: 10,
        }
    }
}
