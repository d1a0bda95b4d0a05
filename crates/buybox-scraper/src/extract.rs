//! Seller/shipper extraction from a product detail page.
//!
//! Extraction runs two ordered strategy lists. Seller strategies locate the
//! offer owner and, when the same markup settles it, the shipper. If the
//! shipper is still open, shipper strategies look for operator-shipping
//! signals; failing those, the seller is assumed to ship its own goods.
//! Each strategy is a pure function of the parsed document, so the same
//! markup always produces the same pair.

use std::sync::LazyLock;

use buybox_core::{MerchantInfo, Party};
use scraper::{ElementRef, Html, Selector};

use crate::classify::{is_operator_name, OPERATOR_NAME};

/// Longest display name kept, in characters.
pub const MAX_NAME_CHARS: usize = 80;

/// A fallback seller link with more words than this is page copy, not a name.
const MAX_FALLBACK_WORDS: usize = 6;

const COMBINED_LABELS: [&str; 2] = ["enviado / vendido", "shipped from and sold by"];
const SHIPPED_BY_OPERATOR_PHRASES: [&str; 2] = ["enviado por amazon", "ships from amazon"];

/// Elements whose text never renders.
const NON_VISIBLE_TAGS: [&str; 4] = ["script", "style", "template", "noscript"];

// Constant selectors; `Selector::parse` only fails on malformed CSS.
static MERCHANT_LABEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"div.offer-display-feature-label[offer-display-feature-name="desktop-merchant-info"]"#,
    )
    .expect("valid merchant label selector")
});
static MERCHANT_TEXT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"div.offer-display-feature-text[offer-display-feature-name="desktop-merchant-info"]"#,
    )
    .expect("valid merchant text selector")
});
static MERCHANT_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"a#sellerProfileTriggerId, a[href*="/gp/help/seller/"], a.offer-display-feature-text-message"#,
    )
    .expect("valid merchant link selector")
});
static MERCHANT_SPAN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.offer-display-feature-text-message")
        .expect("valid merchant span selector")
});
static FALLBACK_SELLER_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "#sellerProfileTriggerId, a[href*='/gp/help/seller/'], .sellerName a, [id*='seller'] a",
    )
    .expect("valid fallback seller selector")
});
static FULFILLMENT_BADGE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".a-icon-prime, [alt*='Prime'], #primeBadge, .prime-badge")
        .expect("valid fulfillment badge selector")
});

/// A seller located on the page. `shipper` is `Some` when the same markup
/// already settles who ships.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SellerMatch {
    seller: String,
    shipper: Option<String>,
}

impl SellerMatch {
    fn operator() -> Self {
        Self {
            seller: OPERATOR_NAME.to_owned(),
            shipper: Some(OPERATOR_NAME.to_owned()),
        }
    }
}

type SellerStrategy = fn(&Html) -> Option<SellerMatch>;
type ShipperStrategy = fn(&Html) -> Option<String>;

/// Tried in order; the first `Some` wins.
const SELLER_STRATEGIES: [SellerStrategy; 2] = [merchant_info_block, seller_link_fallback];

/// Tried in order when a seller was found but the shipper is still open.
const SHIPPER_STRATEGIES: [ShipperStrategy; 2] = [shipped_by_operator_phrase, fulfillment_badge];

/// Parses `html` and extracts the (seller, shipper) pair.
///
/// Runs synchronously: the parsed document never outlives this call.
#[must_use]
pub fn extract_merchant_info(html: &str) -> MerchantInfo {
    let document = Html::parse_document(html);
    extract(&document)
}

/// Extracts the (seller, shipper) pair from a parsed page.
///
/// Pages with no recognizable offer structure yield
/// [`MerchantInfo::no_offer`], never a guessed value.
#[must_use]
pub fn extract(document: &Html) -> MerchantInfo {
    let Some(found) = SELLER_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(document))
    else {
        return MerchantInfo::no_offer();
    };

    let shipper = found.shipper.unwrap_or_else(|| {
        SHIPPER_STRATEGIES
            .iter()
            .find_map(|strategy| strategy(document))
            .unwrap_or_else(|| found.seller.clone())
    });

    MerchantInfo::new(Party::Named(found.seller), Party::Named(shipper))
}

/// The structured "merchant info" block: a label element paired with a text
/// element holding the merchant name.
fn merchant_info_block(document: &Html) -> Option<SellerMatch> {
    let text_el = document.select(&MERCHANT_TEXT).next()?;
    let merchant = pick_merchant_text(text_el)?;
    if is_operator_name(&merchant) {
        return Some(SellerMatch::operator());
    }

    let label = document
        .select(&MERCHANT_LABEL)
        .next()
        .and_then(clean_text)
        .map(|l| l.to_lowercase())
        .unwrap_or_default();
    let combined = COMBINED_LABELS.iter().any(|phrase| label.contains(phrase));

    Some(SellerMatch {
        shipper: combined.then(|| merchant.clone()),
        seller: merchant,
    })
}

/// Name inside the merchant text block: seller link first, then the
/// message span, then the block's own text.
fn pick_merchant_text(root: ElementRef<'_>) -> Option<String> {
    if let Some(link) = root.select(&MERCHANT_LINK).next() {
        return clean_text(link);
    }
    if let Some(span) = root.select(&MERCHANT_SPAN).next() {
        return clean_text(span);
    }
    clean_text(root)
}

/// Loose scan of seller-link-like elements anywhere on the page.
fn seller_link_fallback(document: &Html) -> Option<SellerMatch> {
    document
        .select(&FALLBACK_SELLER_LINKS)
        .filter_map(clean_text)
        .find(|name| name.split_whitespace().count() <= MAX_FALLBACK_WORDS)
        .map(|name| {
            if is_operator_name(&name) {
                SellerMatch::operator()
            } else {
                SellerMatch {
                    seller: name,
                    shipper: None,
                }
            }
        })
}

/// Explicit "shipped by the operator" wording anywhere in the visible page
/// text.
fn shipped_by_operator_phrase(document: &Html) -> Option<String> {
    let page_text = visible_text(document).to_lowercase();
    SHIPPED_BY_OPERATOR_PHRASES
        .iter()
        .any(|phrase| page_text.contains(phrase))
        .then(|| OPERATOR_NAME.to_owned())
}

/// The operator's fulfillment badge.
fn fulfillment_badge(document: &Html) -> Option<String> {
    document
        .select(&FULFILLMENT_BADGE)
        .next()
        .map(|_| OPERATOR_NAME.to_owned())
}

/// Whitespace-normalized, length-capped text of `element`; `None` when empty.
fn clean_text(element: ElementRef<'_>) -> Option<String> {
    let normalized = normalize_whitespace(element.text());
    let capped: String = normalized.chars().take(MAX_NAME_CHARS).collect();
    let capped = capped.trim_end();
    (!capped.is_empty()).then(|| capped.to_owned())
}

/// Whitespace-normalized text of every node outside script-like elements.
fn visible_text(document: &Html) -> String {
    let fragments = document.root_element().descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_VISIBLE_TAGS.contains(&element.name()))
        });
        (!hidden).then_some(&**text)
    });
    normalize_whitespace(fragments)
}

fn normalize_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
