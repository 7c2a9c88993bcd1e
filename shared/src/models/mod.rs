//! Data model modules

pub mod content;
pub mod loss;
pub mod order;
pub mod product;
pub mod settings;
