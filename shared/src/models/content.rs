//! Storefront content model
//!
//! Testimonials, gallery, FAQ and info sections, plus the derived shop
//! rating. The whole content object is persisted as a single write; only
//! the rating is computed, everything else is verbatim admin/customer
//! input.

use serde::{Deserialize, Serialize};

/// Customer testimonial
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub text: String,
    /// Star rating, 1..=5
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Unix millis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Gallery entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub img: String,
}

/// FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaqItem {
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Icon for an informational section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InfoIcon {
    Truck,
    Star,
    #[default]
    Info,
    Clock,
    Shield,
}

/// Informational section shown on the shop page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfoSection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub icon: InfoIcon,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

/// Storefront content singleton
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreContent {
    pub testimonials: Vec<Testimonial>,
    pub gallery: Vec<GalleryItem>,
    pub faqs: Vec<FaqItem>,
    pub infos: Vec<InfoSection>,
    /// Derived mean of testimonial ratings, one decimal, capped at 5.0
    #[serde(rename = "shopRating")]
    pub shop_rating: f64,
}

impl Default for StoreContent {
    fn default() -> Self {
        Self {
            testimonials: Vec::new(),
            gallery: Vec::new(),
            faqs: Vec::new(),
            infos: Vec::new(),
            shop_rating: 5.0,
        }
    }
}

/// Aggregate shop rating: arithmetic mean of all testimonial ratings,
/// rounded to one decimal place, never displayed above 5.0. An empty list
/// keeps the default rating of 5.0.
pub fn shop_rating(testimonials: &[Testimonial]) -> f64 {
    if testimonials.is_empty() {
        return 5.0;
    }
    let sum: f64 = testimonials.iter().map(|t| t.rating).sum();
    let mean = sum / testimonials.len() as f64;
    ((mean * 10.0).round() / 10.0).min(5.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testi(rating: f64) -> Testimonial {
        Testimonial {
            id: format!("t-{rating}"),
            name: "Pelanggan".into(),
            email: None,
            phone: None,
            text: "Mantap".into(),
            rating,
            img: None,
            role: None,
            timestamp: None,
        }
    }

    #[test]
    fn empty_list_keeps_default_rating() {
        assert_eq!(shop_rating(&[]), 5.0);
    }

    #[test]
    fn single_rating_is_its_own_mean() {
        assert_eq!(shop_rating(&[testi(3.0)]), 3.0);
    }

    #[test]
    fn mean_rounds_to_one_decimal() {
        // 14 / 3 = 4.666... -> 4.7
        assert_eq!(shop_rating(&[testi(5.0), testi(5.0), testi(4.0)]), 4.7);
    }

    #[test]
    fn rating_is_capped_at_five() {
        // bad historical data with out-of-range ratings must not push the
        // displayed aggregate above 5.0
        assert_eq!(shop_rating(&[testi(6.0), testi(6.0)]), 5.0);
    }

    #[test]
    fn content_decodes_with_missing_branches() {
        let content: StoreContent = serde_json::from_str(r#"{"faqs":[]}"#).unwrap();
        assert!(content.testimonials.is_empty());
        assert_eq!(content.shop_rating, 5.0);
    }
}
