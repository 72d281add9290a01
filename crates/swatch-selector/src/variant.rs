//! Variant records and identifiers
//!
//! Ids reach us as JSON numbers from the embedded catalog and as strings
//! from DOM attributes and `<select>` values. Both are normalized into one
//! numeric [`VariantId`] at the boundary, so lookups are plain equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical variant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawVariantId")]
pub struct VariantId(u64);

impl VariantId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parse an id as it appears in markup (`data-variant-id`, option value).
    /// Surrounding whitespace is ignored; anything non-numeric is no id.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok().map(Self)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Either JSON shape an id may take in the catalog
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVariantId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawVariantId> for VariantId {
    type Error = String;

    fn try_from(raw: RawVariantId) -> Result<Self, Self::Error> {
        match raw {
            RawVariantId::Number(n) => Ok(Self(n)),
            RawVariantId::Text(s) => {
                Self::parse(&s).ok_or_else(|| format!("invalid variant id {:?}", s))
            }
        }
    }
}

/// Variant image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// One purchasable variant. Unknown JSON fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub id: VariantId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    /// Minor currency units
    #[serde(default)]
    pub price: u64,
    /// "Was" price in minor units; only shown when above `price`
    #[serde(default)]
    pub compare_at_price: Option<u64>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default)]
    pub available: bool,
}

impl VariantRecord {
    /// Compare-at price when the variant is actually discounted
    pub fn sale_compare_price(&self) -> Option<u64> {
        self.compare_at_price.filter(|&was| was > self.price)
    }

    /// Featured image source, treating an empty `src` as no image
    pub fn image_src(&self) -> Option<&str> {
        self.featured_image.as_ref()?
            .src.as_deref()
            .filter(|s| !s.is_empty())
    }

    /// Alt text for the primary image: title, then image alt, then first option
    pub fn image_alt(&self) -> &str {
        let image_alt = self.featured_image.as_ref().and_then(|img| img.alt.as_deref());
        [self.title.as_deref(), image_alt, self.option1.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }
}
