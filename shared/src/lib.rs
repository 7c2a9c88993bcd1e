//! Shared data model for the toko storefront and back-office.
//!
//! Pure types, no I/O: order lifecycle statuses, catalog/settings/content
//! records, the built-in defaults substituted when a remote branch is
//! absent, and the remote tree path constants.

pub mod models;
pub mod paths;
pub mod util;

pub use models::content::{
    FaqItem, GalleryItem, InfoIcon, InfoSection, StoreContent, Testimonial, shop_rating,
};
pub use models::loss::LossRecord;
pub use models::order::{Customer, Order, OrderItem, OrderStatus, PaymentType};
pub use models::product::{Product, default_catalog, next_product_id};
pub use models::settings::StoreSettings;
