//! Marketplace product identifiers and the lossy batch validator.
//!
//! Raw input is split on commas and whitespace. Tokens that are not exactly
//! ten ASCII alphanumeric characters after trimming are dropped silently;
//! callers never see an error for a malformed token.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TOKEN_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("valid separator regex"));

/// Number of characters in a well-formed identifier.
pub const PRODUCT_ID_LEN: usize = 10;

/// A normalized (trimmed, upper-cased) 10-character alphanumeric identifier.
///
/// Validity is purely syntactic; nothing here checks that the product exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Normalizes `raw` and returns it if it is a well-formed identifier.
    ///
    /// Only ASCII letters and digits are accepted, so accented or other
    /// non-ASCII alphanumerics (`"ÁBCDEFGHIJ"`) are rejected even though a
    /// Unicode-aware alphanumeric check would let them through.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        let well_formed = normalized.len() == PRODUCT_ID_LEN
            && normalized.chars().all(|c| c.is_ascii_alphanumeric());
        well_formed.then_some(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits free-form text into identifiers, dropping malformed tokens and
/// duplicates. Order of first occurrence is preserved.
#[must_use]
pub fn parse_product_ids(text: &str) -> Vec<ProductId> {
    collect_product_ids([text])
}

/// Like [`parse_product_ids`], over several raw inputs. Each input may itself
/// hold several separated tokens.
#[must_use]
pub fn collect_product_ids<I, S>(inputs: I) -> Vec<ProductId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for input in inputs {
        for token in TOKEN_SEPARATOR_RE.split(input.as_ref()) {
            let Some(id) = ProductId::parse(token) else {
                continue;
            };
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }
    ids
}
