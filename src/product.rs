//! Product records and their printable form.

use crate::normalize::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Title used when a product has none
pub const UNTITLED: &str = "Untitled Product";

/// A product record as it arrives from upstream. Every field is optional and
/// may contain any Unicode text. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub benefits: Option<Vec<Option<String>>>,
    #[serde(alias = "price_range")]
    pub price_label: Option<String>,
    pub social_caption: Option<String>,
}

/// A product record whose every string only holds encodable characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    /// Never empty
    pub title: String,
    pub description: String,
    /// Never contains empty entries
    pub benefits: Vec<String>,
    pub price_label: String,
    pub social_caption: String,
}

impl From<&ProductData> for NormalizedContent {
    fn from(product: &ProductData) -> Self {
        let title = normalize(product.title.as_deref());
        let title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };

        let benefits = product
            .benefits
            .iter()
            .flatten()
            .map(|benefit| normalize(benefit.as_deref()))
            .filter(|benefit| !benefit.is_empty())
            .collect();

        NormalizedContent {
            title,
            description: normalize(product.description.as_deref()),
            benefits,
            price_label: normalize(product.price_label.as_deref()),
            social_caption: normalize(product.social_caption.as_deref()),
        }
    }
}

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9]+").expect("BUG: invalid NON_ALPHANUMERIC regex literal")
});

/// A file name for the workbook of a product with the given title, e.g.
/// `"Bloom: 14 Days!"` becomes `bloom-14-days.pdf`
pub fn suggested_file_name(title: Option<&str>) -> String {
    let lowered = title.unwrap_or_default().to_lowercase();
    let slug = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "workbook.pdf".to_string()
    } else {
        format!("{slug}.pdf")
    }
}
