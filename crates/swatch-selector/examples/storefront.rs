//! Example: drive a product page with swatch clicks
//!
//! `RUST_LOG=swatch_selector=debug cargo run -p swatch-selector --example storefront`

use anyhow::Context;
use swatch_selector::{SelectorConfig, Storefront};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <div class="product__media-list"><img src="//cdn.shop.test/files/honey.jpg" alt="Honey"></div>
  <product-info id="MainProduct-main">
    <div class="price-block"><span class="price">$20.00</span><span class="compare-price"></span></div>
  </product-info>
  <div class="swatch-container" data-section-id="main" data-product-id="900">
    <div class="swatch-figure selected" data-variant-id="101"></div>
    <div class="swatch-figure" data-variant-id="102"></div>
  </div>
  <script type="application/json" id="variant-data-main">[
    {"id": 101, "title": "Honey", "price": 2000, "compare_at_price": 2500,
     "featured_image": {"src": "//cdn.shop.test/files/honey.jpg"}, "available": true},
    {"id": 102, "title": "Ash", "price": 1899,
     "featured_image": {"src": "//cdn.shop.test/files/ash.jpg"}, "available": false}
  ]</script>
  <form id="product-form-main">
    <select id="variant-select-main"><option value="101">Honey</option><option value="102">Ash</option></select>
    <button name="add">Add to cart</button>
  </form>
</body></html>"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = "https://shop.test/products/wig?ref=home";
    let mut store = Storefront::from_html(PAGE, url, SelectorConfig::default())?;
    store.page_ready();
    store.run_until_idle();
    println!(
        "swatch-selector v{}: {} widget(s) ready",
        swatch_selector::VERSION,
        store.instances().len()
    );

    for id in ["102", "101"] {
        let swatch = store.document()
            .query_selector(&format!(r#"[data-variant-id="{}"]"#, id))?
            .with_context(|| format!("no swatch for {}", id))?;
        store.click(swatch);

        for report in store.run_until_idle() {
            println!("{:?} -> {}", report.trigger, report.variant_id);
            for (step, status) in &report.steps {
                println!("  {:<20} {:?}", step.to_string(), status);
            }
        }

        let doc = store.document();
        let price = doc.query_selector(".price")?.context("no price element")?;
        let button = doc.query_selector(r#"[name="add"]"#)?.context("no add button")?;
        println!("  location: {}", doc.location());
        println!("  price:    {}", doc.tree.text_content(price));
        println!(
            "  button:   {} (disabled: {})",
            doc.tree.text_content(button),
            doc.tree.is_disabled(button)
        );
    }

    Ok(())
}
