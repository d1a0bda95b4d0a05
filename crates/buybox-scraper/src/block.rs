//! Soft-block detection: rate limiting and anti-automation pages.
//!
//! Markers are deliberately narrow. A missed block only costs a wrong
//! `NoOffer`; a false positive would turn a genuine empty-offer page into a
//! retry storm.

/// Case-insensitive markers whose presence alone marks a page as blocked.
const BLOCK_MARKERS: [&str; 3] = [
    "digite os caracteres que você vê",
    "type the characters you see",
    "to discuss automated access",
];

/// Returns `true` when a response looks like a soft block.
///
/// `status` is `None` when no response arrived at all.
#[must_use]
pub fn is_blocked(status: Option<u16>, body: &str) -> bool {
    let Some(status) = status else {
        return true;
    };
    if matches!(status, 429 | 503) {
        return true;
    }

    let lowered = body.to_lowercase();
    if BLOCK_MARKERS.iter().any(|m| lowered.contains(m)) {
        return true;
    }
    lowered.contains("sorry") && lowered.contains("robot")
}
