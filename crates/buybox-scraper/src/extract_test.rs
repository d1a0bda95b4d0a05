use super::*;

fn named(name: &str) -> Party {
    Party::Named(name.to_owned())
}

/// Product page with a desktop merchant-info block.
fn merchant_page(label: &str, text_inner: &str, extra: &str) -> String {
    format!(
        r#"<html><body>
        <div id="productTitle">Fone de ouvido</div>
        <div class="offer-display-feature-label" offer-display-feature-name="desktop-merchant-info">
          <span>{label}</span>
        </div>
        <div class="offer-display-feature-text" offer-display-feature-name="desktop-merchant-info">
          {text_inner}
        </div>
        {extra}
        </body></html>"#
    )
}

// -----------------------------------------------------------------------
// merchant info block
// -----------------------------------------------------------------------

#[test]
fn operator_in_merchant_block_is_operator_on_both_sides() {
    let html = merchant_page(
        "Vendido por",
        r#"<span class="offer-display-feature-text-message">Amazon.com.br</span>"#,
        "",
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Amazon"), named("Amazon")));
}

#[test]
fn operator_alias_wins_regardless_of_label() {
    let html = merchant_page(
        "Enviado por Loja XYZ",
        r#"<a id="sellerProfileTriggerId" href="/gp/help/seller/at-a-glance.html?seller=A1">Amazon Serviços de Varejo do Brasil Ltda.</a>"#,
        "",
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Amazon"), named("Amazon")));
}

#[test]
fn combined_label_makes_merchant_ship_and_sell() {
    let html = merchant_page(
        "Enviado / Vendido",
        r#"<a id="sellerProfileTriggerId" href="/gp/help/seller/at-a-glance.html?seller=A2">Loja XYZ</a>"#,
        r#"<i class="a-icon-prime"></i>"#,
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Loja XYZ"), named("Loja XYZ")));
}

#[test]
fn english_combined_label_is_recognized() {
    let html = merchant_page(
        "Shipped from and sold by",
        r#"<span class="offer-display-feature-text-message">Motorola Store</span>"#,
        "",
    );
    let info = extract_merchant_info(&html);
    assert_eq!(
        info,
        MerchantInfo::new(named("Motorola Store"), named("Motorola Store"))
    );
}

#[test]
fn shipped_by_operator_phrase_sets_operator_shipper() {
    let html = merchant_page(
        "Vendido por",
        r#"<a href="/gp/help/seller/at-a-glance.html?seller=A3">Loja XYZ</a>"#,
        "<div>Enviado por <b>Amazon</b></div>",
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Loja XYZ"), named("Amazon")));
}

#[test]
fn shipping_phrase_inside_script_is_ignored() {
    let html = merchant_page(
        "Vendido por",
        r#"<a href="/gp/help/seller/at-a-glance.html?seller=A4">Loja XYZ</a>"#,
        r#"<script>var i18n = {"fba": "Enviado por Amazon"};</script>
        <style>.x::after { content: "Ships from Amazon"; }</style>
        <template><div>Enviado por Amazon</div></template>
        <noscript>Enviado por Amazon</noscript>"#,
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Loja XYZ"), named("Loja XYZ")));
}

#[test]
fn english_ships_from_phrase_sets_operator_shipper() {
    let html = merchant_page(
        "Sold by",
        r#"<a href="/gp/help/seller/at-a-glance.html?seller=A3">Loja XYZ</a>"#,
        "<div>Ships from   Amazon</div>",
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info.shipper, named("Amazon"));
}

#[test]
fn fulfillment_badge_sets_operator_shipper() {
    let html = merchant_page(
        "Vendido por",
        r#"<a href="/gp/help/seller/at-a-glance.html?seller=A4">Loja XYZ</a>"#,
        r#"<img src="/badge.png" alt="Amazon Prime">"#,
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Loja XYZ"), named("Amazon")));
}

#[test]
fn merchant_ships_itself_without_operator_signal() {
    let html = merchant_page(
        "Vendido por",
        r#"<a href="/gp/help/seller/at-a-glance.html?seller=A5">Loja XYZ</a>"#,
        "<div>Entrega em 5 dias</div>",
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info, MerchantInfo::new(named("Loja XYZ"), named("Loja XYZ")));
}

#[test]
fn block_text_is_used_when_no_link_or_span() {
    let html = merchant_page("Enviado / Vendido", "  Casa \n  das   Pilhas ", "");
    let info = extract_merchant_info(&html);
    assert_eq!(
        info,
        MerchantInfo::new(named("Casa das Pilhas"), named("Casa das Pilhas"))
    );
}

#[test]
fn long_names_are_capped_at_eighty_chars() {
    let long_name = "X".repeat(120);
    let html = merchant_page(
        "Enviado / Vendido",
        &format!(r#"<span class="offer-display-feature-text-message">{long_name}</span>"#),
        "",
    );
    let info = extract_merchant_info(&html);
    let seller = info.seller.name().unwrap();
    assert_eq!(seller.chars().count(), MAX_NAME_CHARS);
}

// -----------------------------------------------------------------------
// fallback seller links
// -----------------------------------------------------------------------

#[test]
fn fallback_link_is_used_without_merchant_block() {
    let html = r#"<html><body>
        <div id="merchant-info">Vendido por
          <a id="sellerProfileTriggerId" href="/gp/help/seller/at-a-glance.html?seller=B1">Eletro Shop</a>
        </div>
        </body></html>"#;
    let info = extract_merchant_info(html);
    assert_eq!(
        info,
        MerchantInfo::new(named("Eletro Shop"), named("Eletro Shop"))
    );
}

#[test]
fn fallback_skips_wordy_candidates() {
    let html = r#"<html><body>
        <a href="/gp/help/seller/faq">Saiba mais sobre como vender na nossa loja hoje</a>
        <div class="sellerName"><a href="/shop/b2">Super Games</a></div>
        </body></html>"#;
    let info = extract_merchant_info(html);
    assert_eq!(info.seller, named("Super Games"));
}

#[test]
fn fallback_operator_link_short_circuits() {
    let html = r#"<html><body>
        <div id="sellerInfo"><a href="/about">Amazon.com.br</a></div>
        </body></html>"#;
    let info = extract_merchant_info(html);
    assert_eq!(info, MerchantInfo::new(named("Amazon"), named("Amazon")));
}

#[test]
fn empty_merchant_block_falls_back_to_links() {
    let html = merchant_page(
        "Vendido por",
        r#"<span class="offer-display-feature-text-message">   </span>"#,
        r#"<div class="sellerName"><a href="/shop/b3">Loja Fallback</a></div>"#,
    );
    let info = extract_merchant_info(&html);
    assert_eq!(info.seller, named("Loja Fallback"));
}

// -----------------------------------------------------------------------
// no offer
// -----------------------------------------------------------------------

#[test]
fn page_without_offer_structure_is_no_offer() {
    let html = r#"<html><body>
        <div id="productTitle">Fone de ouvido</div>
        <div id="outOfStock">Não disponível.</div>
        <i class="a-icon-prime"></i>
        </body></html>"#;
    assert_eq!(extract_merchant_info(html), MerchantInfo::no_offer());
}

#[test]
fn empty_document_is_no_offer() {
    assert_eq!(extract_merchant_info(""), MerchantInfo::no_offer());
}

#[test]
fn extraction_is_deterministic() {
    let html = merchant_page(
        "Vendido por",
        r#"<a href="/gp/help/seller/at-a-glance.html?seller=A6">Loja XYZ</a>"#,
        r#"<span class="prime-badge"></span>"#,
    );
    let first = extract_merchant_info(&html);
    for _ in 0..5 {
        assert_eq!(extract_merchant_info(&html), first);
    }
}
