//! Product catalog model

use serde::{Deserialize, Serialize};

/// Catalog product
///
/// Ids are admin-assigned integers, monotonically increasing from the
/// current maximum. The whole catalog is replaced on every edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    /// Unit price in currency unit
    pub price: f64,
    /// Product image reference
    pub img: String,
    /// Per-product payment QR image, overrides the store-wide one
    #[serde(rename = "qrisUrl", default, skip_serializing_if = "Option::is_none")]
    pub qris_url: Option<String>,
}

/// Id for the next catalog insert: max existing id (0 when empty) + 1.
pub fn next_product_id(products: &[Product]) -> u32 {
    products.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

/// Built-in catalog, substituted when the remote `products` branch is
/// absent or empty.
pub fn default_catalog() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Yakult Original".into(),
            description: "Minuman probiotik asli.".into(),
            price: 10_500.0,
            img: "https://images.example.com/yakult-original.jpg".into(),
            qris_url: None,
        },
        Product {
            id: 2,
            name: "Yakult Mangga".into(),
            description: "Rasa mangga segar.".into(),
            price: 12_000.0,
            img: "https://images.example.com/yakult-mangga.jpg".into(),
            qris_url: None,
        },
        Product {
            id: 3,
            name: "Yakult Light".into(),
            description: "Rendah gula & kalori.".into(),
            price: 13_000.0,
            img: "https://images.example.com/yakult-light.jpg".into(),
            qris_url: None,
        },
        Product {
            id: 4,
            name: "Paket Keluarga".into(),
            description: "Isi 10 botol campur.".into(),
            price: 95_000.0,
            img: "https://images.example.com/paket-keluarga.jpg".into(),
            qris_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_product_id(&[]), 1);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let mut catalog = default_catalog();
        assert_eq!(next_product_id(&catalog), 5);

        // holes in the id space don't matter, only the maximum does
        catalog.retain(|p| p.id != 2);
        catalog[0].id = 9;
        assert_eq!(next_product_id(&catalog), 10);
    }

    #[test]
    fn default_catalog_is_stable() {
        let ids: Vec<u32> = default_catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(default_catalog(), default_catalog());
    }

    #[test]
    fn wire_format_uses_short_names() {
        let json = serde_json::to_value(&default_catalog()[0]).unwrap();
        assert!(json.get("desc").is_some());
        assert!(json.get("description").is_none());
        assert!(json.get("qrisUrl").is_none());
    }
}
