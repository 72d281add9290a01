//! Synchronization steps
//!
//! Each function maps (selected variant, bindings, config) to the patches
//! that bring one part of the page in line. All of them are pure and
//! idempotent: the same inputs always produce the same patches, and
//! applying them twice leaves the page as applying them once.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::{form_urlencoded, Url};

use crate::money::format_money_with;
use crate::{Bindings, Patch, SelectorConfig, VariantId, VariantRecord};

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)").expect("image extension pattern is valid")
});

/// Mark the swatch bound to `id` and clear every other one
pub fn highlight<H: Copy>(
    bindings: &Bindings<H>,
    id: VariantId,
    config: &SelectorConfig,
) -> Vec<Patch<H>> {
    bindings.swatches.iter()
        .map(|swatch| Patch::ToggleClass {
            target: swatch.handle,
            class: config.selected_class.clone(),
            on: swatch.variant_id == Some(id),
        })
        .collect()
}

/// Keep the fallback `<select>` on the selected id
pub fn select_value<H: Copy>(bindings: &Bindings<H>, id: VariantId) -> Vec<Patch<H>> {
    bindings.select
        .map(|target| Patch::SetValue { target, value: id.to_string() })
        .into_iter()
        .collect()
}

/// Let other listeners on the `<select>` see the new value
pub fn change_notification<H: Copy>(bindings: &Bindings<H>) -> Vec<Patch<H>> {
    bindings.select
        .map(|target| Patch::DispatchChange { target })
        .into_iter()
        .collect()
}

/// `current` with `param` set to `id`.
///
/// Other query pairs are kept byte-for-byte and in place; a repeated
/// `param` collapses into its first position. Path and fragment are
/// untouched.
pub fn location_with_variant(
    current: &str,
    param: &str,
    id: VariantId,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(current)?;
    let encoded_param: String = form_urlencoded::byte_serialize(param.as_bytes()).collect();
    let assignment = format!("{}={}", encoded_param, id);

    let mut pairs: Vec<String> = Vec::new();
    let mut replaced = false;
    for pair in url.query().unwrap_or("").split('&').filter(|p| !p.is_empty()) {
        let raw_key = pair.split_once('=').map_or(pair, |(k, _)| k);
        let is_param = form_urlencoded::parse(raw_key.as_bytes())
            .next()
            .is_some_and(|(key, _)| key == param);
        if !is_param {
            pairs.push(pair.to_string());
        } else if !replaced {
            pairs.push(assignment.clone());
            replaced = true;
        }
    }
    if !replaced {
        pairs.push(assignment);
    }

    url.set_query(Some(&pairs.join("&")));
    Ok(url.into())
}

/// Delegate to the panel's native renderer, when it has one
pub fn native_price<H: Copy>(bindings: &Bindings<H>, variant: &VariantRecord) -> Vec<Patch<H>> {
    bindings.product_info
        .filter(|panel| panel.native_price_update)
        .map(|panel| Patch::SetActiveVariant { target: panel.handle, id: variant.id })
        .into_iter()
        .collect()
}

/// Built-in price renderer: price text, compare-at text and the sale marker
pub fn price<H: Copy>(
    bindings: &Bindings<H>,
    variant: &VariantRecord,
    config: &SelectorConfig,
) -> Vec<Patch<H>> {
    let Some(price) = bindings.price else {
        return Vec::new();
    };

    let mut patches = vec![Patch::SetText {
        target: price,
        text: format_money_with(&config.currency_symbol, variant.price),
    }];

    if let Some(compare) = bindings.compare_price {
        let on_sale = |on| Patch::ToggleClass {
            target: price,
            class: config.on_sale_class.clone(),
            on,
        };
        match variant.sale_compare_price() {
            Some(was) => patches.extend([
                Patch::SetText {
                    target: compare,
                    text: format!(
                        "{}{}",
                        config.compare_price_prefix,
                        format_money_with(&config.currency_symbol, was)
                    ),
                },
                Patch::SetVisible { target: compare, visible: true },
                on_sale(true),
            ]),
            None => patches.extend([
                Patch::SetVisible { target: compare, visible: false },
                on_sale(false),
            ]),
        }
    }

    patches
}

/// Point the primary image at the variant's featured image
pub fn image<H: Copy>(
    bindings: &Bindings<H>,
    variant: &VariantRecord,
    config: &SelectorConfig,
) -> Vec<Patch<H>> {
    let (Some(target), Some(src)) = (bindings.main_image, variant.image_src()) else {
        return Vec::new();
    };

    let url = sized_image_url(src, config.image_size.as_deref());
    vec![
        Patch::SetAttribute { target, name: "src".into(), value: url.clone() },
        Patch::SetAttribute { target, name: "srcset".into(), value: url },
        Patch::SetAttribute { target, name: "alt".into(), value: variant.image_alt().to_string() },
    ]
}

/// Enable the add-to-cart control for available variants, otherwise
/// disable it and show the sold-out label
pub fn purchase<H: Copy>(
    bindings: &Bindings<H>,
    variant: &VariantRecord,
    config: &SelectorConfig,
) -> Vec<Patch<H>> {
    let Some(button) = &bindings.add_to_cart else {
        return Vec::new();
    };

    let (override_label, default_label) = if variant.available {
        (&button.add_to_cart_text, &config.add_to_cart_text)
    } else {
        (&button.sold_out_text, &config.sold_out_text)
    };
    let label = override_label.as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(default_label);

    vec![
        Patch::SetDisabled { target: button.handle, disabled: !variant.available },
        Patch::SetText { target: button.handle, text: label.to_string() },
    ]
}

/// Insert a CDN size suffix before the first image extension:
/// `wig.jpg?v=2` -> `wig_800x.jpg?v=2`
pub fn sized_image_url(src: &str, size: Option<&str>) -> String {
    match size.filter(|s| !s.is_empty()) {
        Some(size) => IMAGE_EXTENSION
            .replace(src, |caps: &Captures| format!("_{}.{}", size, &caps[1]))
            .into_owned(),
        None => src.to_string(),
    }
}
