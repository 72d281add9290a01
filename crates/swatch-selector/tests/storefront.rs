//! Full-page tests: HTML in, clicks and changes through the storefront loop,
//! DOM and address bar inspected afterwards.

use swatch_dom::{CustomElementOptions, Document, NodeId};
use swatch_selector::{SelectorConfig, StepStatus, Storefront, SyncStep, Trigger};

const URL: &str = "https://shop.test/products/lace-front?ref=home&utm_source=mail";

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Lace front wig</title></head>
<body>
  <div class="product__media-wrapper">
    <img src="//cdn.shop.test/files/honey.jpg?v=1" srcset="//cdn.shop.test/files/honey.jpg?v=1" alt="Honey">
  </div>

  <product-info id="MainProduct-main">
    <h1>Lace front wig</h1>
    <div class="price-block">
      <span class="price">$20.00</span>
      <span class="compare-price" style="display: none"></span>
    </div>
  </product-info>

  <div class="swatch-container" data-section-id="main" data-product-id="900">
    <div class="swatch-figure selected" data-variant-id="101"><img alt="Honey"></div>
    <div class="swatch-figure" data-variant-id="102"><img alt="Ash"></div>
    <div class="swatch-figure" data-variant-id="103"><img alt="Jet"></div>
    <div class="swatch-figure" data-variant-id="104"><img alt="Rose"></div>
  </div>

  <script type="application/json" id="variant-data-main">
    [
      {"id": 101, "title": "Honey", "option1": "Honey", "price": 2000, "compare_at_price": 2500,
       "featured_image": {"src": "//cdn.shop.test/files/honey.jpg?v=1", "alt": "Honey swatch"}, "available": true},
      {"id": "102", "title": "Ash", "option1": "Ash", "price": 2000, "compare_at_price": 1500,
       "featured_image": {"src": "//cdn.shop.test/files/ash.PNG", "alt": "Ash swatch"}, "available": true},
      {"id": 103, "title": "", "option1": "Jet", "price": 1050, "compare_at_price": null,
       "featured_image": {"src": "//cdn.shop.test/files/jet.webp"}, "available": false},
      {"id": 104, "title": "Rose", "option1": "Rose", "price": 0, "available": true}
    ]
  </script>

  <form id="product-form-main">
    <select id="variant-select-main" name="id">
      <option value="101" selected>Honey</option>
      <option value="102">Ash</option>
      <option value="103">Jet</option>
      <option value="104">Rose</option>
    </select>
    <button type="submit" name="add" data-add-to-cart-text="Add to bag" data-sold-out-text="Out of stock">Add to bag</button>
  </form>
</body>
</html>"#;

fn ready(html: &str) -> Storefront {
    let mut store = Storefront::from_html(html, URL, SelectorConfig::default()).unwrap();
    store.page_ready();
    store.run_until_idle();
    store
}

fn node(doc: &Document, selector: &str) -> NodeId {
    doc.query_selector(selector).unwrap().unwrap_or_else(|| panic!("no match for {}", selector))
}

fn swatch(store: &Storefront, id: &str) -> NodeId {
    node(store.document(), &format!(r#".swatch-figure[data-variant-id="{}"]"#, id))
}

fn selected_swatches(doc: &Document) -> Vec<String> {
    doc.query_selector_all(".swatch-figure.selected")
        .unwrap()
        .into_iter()
        .filter_map(|n| doc.tree.data(n, "variantId").map(str::to_string))
        .collect()
}

fn text(doc: &Document, selector: &str) -> String {
    doc.tree.text_content(node(doc, selector)).trim().to_string()
}

fn query_param(doc: &Document, key: &str) -> Vec<String> {
    doc.location()
        .query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

fn click(store: &mut Storefront, id: &str) {
    let target = swatch(store, id);
    store.click(target);
    store.run_until_idle();
}

#[test]
fn every_catalog_id_selects_exactly_one_swatch() {
    let mut store = ready(PAGE);
    for id in ["101", "102", "103", "104", "101"] {
        click(&mut store, id);
        let doc = store.document();
        assert_eq!(selected_swatches(doc), vec![id.to_string()]);
        assert_eq!(doc.tree.select_value(node(doc, "#variant-select-main")), id);
    }
}

#[test]
fn unknown_id_changes_nothing() {
    let html = PAGE.replace(
        r#"<div class="swatch-figure" data-variant-id="104">"#,
        r#"<div class="swatch-figure" data-variant-id="999">"#,
    );
    let mut store = ready(&html);
    click(&mut store, "102");
    let before = store.document().location().clone();
    let price = text(store.document(), ".price");

    let stray = swatch(&store, "999");
    store.click(stray);
    let reports = store.run_until_idle();

    assert!(reports.is_empty());
    let doc = store.document();
    assert_eq!(selected_swatches(doc), vec!["102".to_string()]);
    assert_eq!(doc.location(), &before);
    assert_eq!(text(doc, ".price"), price);
    assert_eq!(store.instance("main").unwrap().selected_id().map(|v| v.get()), Some(102));
}

#[test]
fn unavailable_variant_updates_page_but_disables_purchase() {
    let mut store = ready(PAGE);
    click(&mut store, "103");
    let doc = store.document();

    assert_eq!(text(doc, ".price"), "$10.50");
    let img = node(doc, ".product__media-wrapper img");
    assert_eq!(doc.tree.get_attribute(img, "src"), Some("//cdn.shop.test/files/jet_800x.webp"));
    // empty title and no image alt fall through to option1
    assert_eq!(doc.tree.get_attribute(img, "alt"), Some("Jet"));

    let button = node(doc, r#"[name="add"]"#);
    assert!(doc.tree.is_disabled(button));
    assert_eq!(text(doc, r#"[name="add"]"#), "Out of stock");
    assert_eq!(query_param(doc, "variant"), vec!["103"]);
}

#[test]
fn available_variant_reenables_purchase() {
    let mut store = ready(PAGE);
    click(&mut store, "103");
    click(&mut store, "101");
    let doc = store.document();

    let button = node(doc, r#"[name="add"]"#);
    assert!(!doc.tree.is_disabled(button));
    assert_eq!(text(doc, r#"[name="add"]"#), "Add to bag");
}

#[test]
fn compare_at_price_display() {
    let mut store = ready(PAGE);

    click(&mut store, "101");
    let doc = store.document();
    let price = node(doc, ".price");
    let compare = node(doc, ".compare-price");
    assert!(doc.tree.has_class(price, "price--on-sale"));
    assert_eq!(text(doc, ".compare-price"), "Regular price: $25.00");
    assert_eq!(doc.tree.style(compare).get("display"), None);

    click(&mut store, "102");
    let doc = store.document();
    assert!(!doc.tree.has_class(price, "price--on-sale"));
    assert_eq!(doc.tree.style(compare).get("display"), Some("none"));
    assert_eq!(text(doc, ".price"), "$20.00");
}

#[test]
fn zero_price_is_still_written() {
    let mut store = ready(PAGE);
    click(&mut store, "104");
    assert_eq!(text(store.document(), ".price"), "$0.00");
}

#[test]
fn image_alt_prefers_title_and_keeps_old_image_without_featured() {
    let mut store = ready(PAGE);
    click(&mut store, "102");
    let doc = store.document();
    let img = node(doc, ".product__media-wrapper img");
    assert_eq!(doc.tree.get_attribute(img, "src"), Some("//cdn.shop.test/files/ash_800x.PNG"));
    assert_eq!(doc.tree.get_attribute(img, "srcset"), Some("//cdn.shop.test/files/ash_800x.PNG"));
    assert_eq!(doc.tree.get_attribute(img, "alt"), Some("Ash"));

    click(&mut store, "104");
    let doc = store.document();
    assert_eq!(doc.tree.get_attribute(img, "src"), Some("//cdn.shop.test/files/ash_800x.PNG"));
}

#[test]
fn url_round_trip_preserves_other_params_and_history() {
    let mut store = ready(PAGE);
    let history_before = store.document().history().length();

    click(&mut store, "102");
    click(&mut store, "103");
    let doc = store.document();

    assert_eq!(query_param(doc, "variant"), vec!["103"]);
    assert_eq!(query_param(doc, "ref"), vec!["home"]);
    assert_eq!(query_param(doc, "utm_source"), vec!["mail"]);
    assert_eq!(doc.location().path(), "/products/lace-front");
    assert_eq!(doc.location().query(), Some("ref=home&utm_source=mail&variant=103"));
    assert_eq!(doc.history().length(), history_before);
}

#[test]
fn repeated_variant_param_collapses() {
    let mut store = Storefront::from_html(
        PAGE,
        "https://shop.test/products/lace-front?variant=1&color=ash&variant=2",
        SelectorConfig::default(),
    ).unwrap();
    store.page_ready();
    store.run_until_idle();

    click(&mut store, "101");
    assert_eq!(store.document().location().query(), Some("variant=101&color=ash"));
}

#[test]
fn selecting_twice_is_idempotent() {
    let mut store = ready(PAGE);
    click(&mut store, "102");
    let doc = store.document();
    let snapshot = (
        selected_swatches(doc),
        doc.location().clone(),
        text(doc, ".price"),
        doc.tree.get_attribute(node(doc, ".product__media-wrapper img"), "src").map(str::to_string),
        doc.history().length(),
    );

    click(&mut store, "102");
    let doc = store.document();
    let again = (
        selected_swatches(doc),
        doc.location().clone(),
        text(doc, ".price"),
        doc.tree.get_attribute(node(doc, ".product__media-wrapper img"), "src").map(str::to_string),
        doc.history().length(),
    );
    assert_eq!(snapshot, again);
}

#[test]
fn swatch_click_redispatches_change_once() {
    let mut store = ready(PAGE);
    let target = swatch(&store, "102");
    store.click(target);
    let reports = store.run_until_idle();

    let triggers: Vec<Trigger> = reports.iter().map(|r| r.trigger).collect();
    assert_eq!(triggers, vec![Trigger::Swatch, Trigger::SelectChange]);
    assert!(reports.iter().all(|r| r.variant_id.get() == 102 && r.is_clean()));
    assert_eq!(store.document().pending_event_count(), 0);
}

#[test]
fn swatch_without_option_keeps_its_variant() {
    let html = PAGE.replace(r#"<option value="104">Rose</option>"#, "");
    let mut store = ready(&html);
    let target = swatch(&store, "104");
    store.click(target);
    let reports = store.run_until_idle();

    // the redispatched change reads an empty select value and is ignored
    let order: Vec<(Trigger, u64)> =
        reports.iter().map(|r| (r.trigger, r.variant_id.get())).collect();
    assert_eq!(order, vec![(Trigger::Swatch, 104)]);
    assert!(matches!(reports[0].status(SyncStep::SelectValue), Some(StepStatus::Failed(_))));
    assert_eq!(reports[0].status(SyncStep::ChangeNotification), Some(&StepStatus::Applied(1)));

    let doc = store.document();
    assert_eq!(doc.tree.select_value(node(doc, "#variant-select-main")), "");
    assert_eq!(selected_swatches(doc), vec!["104".to_string()]);
    assert_eq!(query_param(doc, "variant"), vec!["104"]);
    assert_eq!(text(doc, ".price"), "$0.00");
    assert_eq!(store.instance("main").unwrap().selected_id().map(|v| v.get()), Some(104));
}

#[test]
fn repeated_clicks_do_not_grow_the_document() {
    let mut store = ready(PAGE);
    click(&mut store, "102");
    click(&mut store, "101");
    let settled = store.document().tree.len();

    for _ in 0..200 {
        click(&mut store, "102");
        click(&mut store, "101");
    }
    assert_eq!(store.document().tree.len(), settled);
    assert_eq!(text(store.document(), ".price"), "$20.00");
}

#[test]
fn events_complete_in_order() {
    let mut store = ready(PAGE);
    let first = swatch(&store, "102");
    let second = swatch(&store, "103");
    store.click(first);
    store.click(second);
    let reports = store.run_until_idle();

    let order: Vec<(Trigger, u64)> =
        reports.iter().map(|r| (r.trigger, r.variant_id.get())).collect();
    assert_eq!(order, vec![
        (Trigger::Swatch, 102),
        (Trigger::SelectChange, 102),
        (Trigger::Swatch, 103),
        (Trigger::SelectChange, 103),
    ]);
    assert_eq!(selected_swatches(store.document()), vec!["103".to_string()]);
}

#[test]
fn native_price_renderer_is_called_and_fallback_still_runs() {
    let mut store = Storefront::from_html(PAGE, URL, SelectorConfig::default()).unwrap();
    store.document_mut().define_element("product-info", CustomElementOptions {
        methods: vec!["setActiveVariant".into()],
        ..Default::default()
    }).unwrap();
    store.page_ready();
    store.run_until_idle();

    click(&mut store, "103");
    let doc = store.document();
    let calls: Vec<&str> = doc.method_calls().iter().map(|c| c.argument.as_str()).collect();
    // once for the click, once for the re-dispatched change
    assert_eq!(calls, vec!["103", "103"]);
    assert_eq!(text(doc, ".price"), "$10.50");
}

#[test]
fn missing_targets_are_skipped() {
    let html = r#"<body>
      <div class="swatch-container" data-section-id="bare">
        <span class="swatch-figure" data-variant-id="5"></span>
      </div>
      <script type="application/json" id="variant-data-bare">[{"id": 5, "price": 100, "available": false}]</script>
    </body>"#;
    let mut store = ready(html);
    let target = swatch(&store, "5");
    store.click(target);
    let reports = store.run_until_idle();

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert!(report.is_clean());
    for step in [SyncStep::SelectValue, SyncStep::NativePrice, SyncStep::Price, SyncStep::Image,
                 SyncStep::PurchaseControl, SyncStep::ChangeNotification] {
        assert_eq!(report.status(step), Some(&StepStatus::Skipped), "{}", step);
    }
    assert_eq!(report.status(SyncStep::Highlight), Some(&StepStatus::Applied(1)));
    assert_eq!(selected_swatches(store.document()), vec!["5".to_string()]);
}

#[test]
fn add_to_cart_default_labels() {
    let html = r#"<body>
      <div class="swatch-container" data-section-id="s1">
        <span class="swatch-figure" data-variant-id="5"></span>
      </div>
      <script type="application/json" id="variant-data-s1">[{"id": 5, "price": 100, "available": false}]</script>
      <div id="product-form-s1"><button name="add">Add to cart</button></div>
    </body>"#;
    let mut store = ready(html);
    click(&mut store, "5");
    let doc = store.document();

    assert!(doc.tree.is_disabled(node(doc, "button")));
    assert_eq!(text(doc, "button"), "Sold out");
}

#[test]
fn malformed_catalog_is_isolated() {
    let html = format!(r#"{}
      <div class="swatch-container" data-section-id="broken">
        <span class="swatch-figure" data-variant-id="1"></span>
      </div>
      <script type="application/json" id="variant-data-broken">{{"not": "an array"</script>"#, PAGE);
    let mut store = ready(&html);

    assert_eq!(store.instances().len(), 1);
    assert_eq!(store.failures().len(), 1);
    assert_eq!(store.failures()[0].section_id.as_deref(), Some("broken"));

    click(&mut store, "102");
    assert_eq!(query_param(store.document(), "variant"), vec!["102"]);

    let dead = node(store.document(), r#"[data-section-id="broken"] .swatch-figure"#);
    store.click(dead);
    assert!(store.run_until_idle().is_empty());
}

#[test]
fn independent_sections_do_not_interact() {
    let second = r#"
      <div class="swatch-container" data-section-id="quick">
        <span class="swatch-figure" data-variant-id="101"></span>
        <span class="swatch-figure" data-variant-id="7"></span>
      </div>
      <script type="application/json" id="variant-data-quick">[{"id": 7, "price": 700}, {"id": 101, "price": 1}]</script>
      <select id="variant-select-quick"><option value="101">x</option><option value="7">y</option></select>"#;
    let mut store = ready(&format!("{}{}", PAGE, second));
    assert_eq!(store.instances().len(), 2);

    let quick = node(store.document(), r#"[data-section-id="quick"] [data-variant-id="7"]"#);
    store.click(quick);
    store.run_until_idle();

    let doc = store.document();
    let main_selected: Vec<_> =
        doc.query_selector_all(r#"[data-section-id="main"] .selected"#).unwrap();
    assert_eq!(main_selected, vec![swatch(&store, "101")]);
    assert_eq!(doc.tree.select_value(node(doc, "#variant-select-main")), "101");
    assert_eq!(doc.tree.select_value(node(doc, "#variant-select-quick")), "7");
    assert_eq!(store.instance("main").unwrap().selected_id(), None);
    assert_eq!(store.instance("quick").unwrap().selected_id().map(|v| v.get()), Some(7));
}

#[test]
fn user_select_change_syncs_without_redispatch() {
    let mut store = ready(PAGE);
    let select = node(store.document(), "#variant-select-main");
    store.document_mut().tree.set_select_value(select, "103").unwrap();
    store.change(select);
    let reports = store.run_until_idle();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].trigger, Trigger::SelectChange);
    let doc = store.document();
    assert_eq!(selected_swatches(doc), vec!["103".to_string()]);
    assert_eq!(query_param(doc, "variant"), vec!["103"]);
    assert!(doc.tree.is_disabled(node(doc, r#"[name="add"]"#)));
}
