//! Variant catalog
//!
//! The ordered, immutable list of a product's variants, read once from the
//! JSON the page embeds per section.

use std::collections::HashMap;

use crate::{SelectorError, VariantId, VariantRecord};

/// Immutable, id-indexed variant list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variants: Vec<VariantRecord>,
    index: HashMap<VariantId, usize>,
}

impl Catalog {
    /// Build from records; ids must be unique
    pub fn new(variants: Vec<VariantRecord>) -> Result<Self, SelectorError> {
        let mut index = HashMap::with_capacity(variants.len());
        for (pos, variant) in variants.iter().enumerate() {
            if index.insert(variant.id, pos).is_some() {
                return Err(SelectorError::DuplicateVariant(variant.id));
            }
        }
        Ok(Self { variants, index })
    }

    /// Parse the embedded JSON array
    pub fn from_json(json: &str) -> Result<Self, SelectorError> {
        let variants: Vec<VariantRecord> = serde_json::from_str(json)?;
        tracing::debug!("Loaded {} variants", variants.len());
        Self::new(variants)
    }

    /// Exact id lookup
    pub fn find(&self, id: VariantId) -> Option<&VariantRecord> {
        self.index.get(&id).map(|&pos| &self.variants[pos])
    }

    /// Lookup by an id as written in markup
    pub fn find_raw(&self, raw: &str) -> Option<&VariantRecord> {
        self.find(VariantId::parse(raw)?)
    }

    pub fn contains(&self, id: VariantId) -> bool {
        self.index.contains_key(&id)
    }

    /// Variants in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &VariantRecord> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"[
        {"id": 4001, "title": "Honey", "price": 1050, "available": true},
        {"id": "4002", "title": "Ash", "price": 999, "available": false}
    ]"#;

    #[test]
    fn test_from_json_keeps_order() {
        let catalog = Catalog::from_json(JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        let titles: Vec<_> = catalog.iter().filter_map(|v| v.title.as_deref()).collect();
        assert_eq!(titles, ["Honey", "Ash"]);
    }

    #[test]
    fn test_find_tolerates_representation() {
        let catalog = Catalog::from_json(JSON).unwrap();
        assert_eq!(catalog.find(VariantId::new(4002)).map(|v| v.price), Some(999));
        assert_eq!(catalog.find_raw("4001").map(|v| v.price), Some(1050));
        assert_eq!(catalog.find_raw(" 4002 ").map(|v| v.price), Some(999));
        assert!(catalog.find_raw("4003").is_none());
        assert!(catalog.find_raw("honey").is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Catalog::from_json("[{"), Err(SelectorError::MalformedCatalog(_))));
        let not_a_list = Catalog::from_json(r#"{"id": 1}"#);
        assert!(matches!(not_a_list, Err(SelectorError::MalformedCatalog(_))));
    }

    #[test]
    fn test_duplicate_ids() {
        let err = Catalog::from_json(r#"[{"id": 1}, {"id": "1"}]"#).unwrap_err();
        assert!(matches!(err, SelectorError::DuplicateVariant(id) if id == VariantId::new(1)));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.find_raw("1").is_none());
    }
}
