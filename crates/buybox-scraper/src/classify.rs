//! Maps a (seller, shipper) pair to a [`ClassificationStatus`].

use buybox_core::{ClassificationStatus, Party};

/// Display name used whenever the marketplace operator is detected.
pub const OPERATOR_NAME: &str = "Amazon";

/// Lower-case fragments identifying the operator's retail entity.
const OPERATOR_ALIASES: [&str; 4] = [
    "amazon",
    "amazon.com.br",
    "amazon serviços de varejo",
    "amazon servicos de varejo",
];

/// Returns `true` when `name` contains one of the operator's aliases,
/// ignoring case and surrounding whitespace.
#[must_use]
pub fn is_operator_name(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();
    !lowered.is_empty() && OPERATOR_ALIASES.iter().any(|alias| lowered.contains(alias))
}

/// Pure classification of an extracted pair.
///
/// Both sides absent is `NoOffer`, both sides operator is
/// `OperatorFulfilled`, and every other pair involves a third party.
#[must_use]
pub fn classify(seller: &Party, shipper: &Party) -> ClassificationStatus {
    match (seller, shipper) {
        (Party::NoOffer, Party::NoOffer) => ClassificationStatus::NoOffer,
        (Party::Reprocess, Party::Reprocess) => ClassificationStatus::NeedsReprocess,
        (Party::Named(seller), Party::Named(shipper))
            if is_operator_name(seller) && is_operator_name(shipper) =>
        {
            ClassificationStatus::OperatorFulfilled
        }
        _ => ClassificationStatus::ThirdPartyOffer,
    }
}
