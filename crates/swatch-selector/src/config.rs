//! Selector configuration

use serde::{Deserialize, Serialize};

use crate::SelectorError;

/// Class names, selectors and labels the selector binds to.
/// Defaults match the storefront theme markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Class of each widget container
    pub container_class: String,
    /// Class of each swatch inside a container
    pub swatch_class: String,
    /// Marker class for the highlighted swatch
    pub selected_class: String,
    /// Query parameter holding the selected variant id
    pub variant_param: String,
    /// Marker class on the price element while on sale
    pub on_sale_class: String,
    pub price_block_class: String,
    pub price_class: String,
    pub compare_price_class: String,
    /// Primary media containers, tried in order, page-wide
    pub media_selectors: Vec<String>,
    /// Add-to-cart control, relative to the product form
    pub add_to_cart_selector: String,
    pub add_to_cart_text: String,
    pub sold_out_text: String,
    pub currency_symbol: String,
    pub compare_price_prefix: String,
    /// CDN size suffix for the primary image (`800x` -> `_800x.jpg`)
    pub image_size: Option<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            container_class: "swatch-container".into(),
            swatch_class: "swatch-figure".into(),
            selected_class: "selected".into(),
            variant_param: "variant".into(),
            on_sale_class: "price--on-sale".into(),
            price_block_class: "price-block".into(),
            price_class: "price".into(),
            compare_price_class: "compare-price".into(),
            media_selectors: vec![".product__media-list".into(), ".product__media-wrapper".into()],
            add_to_cart_selector: r#"[name="add"]"#.into(),
            add_to_cart_text: "Add to cart".into(),
            sold_out_text: "Sold out".into(),
            currency_symbol: "$".into(),
            compare_price_prefix: "Regular price: ".into(),
            image_size: Some("800x".into()),
        }
    }
}

impl SelectorConfig {
    /// Load from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SelectorError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SelectorError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the selector cannot bind with
    pub fn validate(&self) -> Result<(), SelectorError> {
        let required = [
            ("container_class", &self.container_class),
            ("swatch_class", &self.swatch_class),
            ("selected_class", &self.selected_class),
            ("variant_param", &self.variant_param),
            ("price_class", &self.price_class),
            ("add_to_cart_selector", &self.add_to_cart_selector),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SelectorError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        let single_classes = [
            ("container_class", &self.container_class),
            ("swatch_class", &self.swatch_class),
        ];
        for (name, value) in single_classes {
            if value.contains(char::is_whitespace) {
                let message = format!("{} must be a single class", name);
                return Err(SelectorError::InvalidConfig(message));
            }
        }
        Ok(())
    }

    /// `.{class}` selector for a configured class name
    pub(crate) fn class_selector(class: &str) -> String {
        format!(".{}", class)
    }
}
