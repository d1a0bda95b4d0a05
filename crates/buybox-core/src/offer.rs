//! Offer ownership types shared by the scraper and its hosts.
//!
//! `Party::NoOffer` and `Party::Reprocess` are distinct values: the first
//! means a page was fetched and held no offer, the second means the page
//! could not be fetched at all. Reports must never fold one into the other.

use serde::Serialize;

use crate::identifier::ProductId;

/// One side (seller or shipper) of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Party {
    /// A resolved display name, whitespace-normalized and at most 80 chars.
    Named(String),
    /// The page was fetched but no offer owner could be found.
    NoOffer,
    /// Retrieval never succeeded; the identifier should be resubmitted.
    Reprocess,
}

impl Party {
    /// Returns the display name when the party was resolved.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Party::Named(name) => Some(name),
            Party::NoOffer | Party::Reprocess => None,
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::Named(name) => f.write_str(name),
            Party::NoOffer => f.write_str("No Offer"),
            Party::Reprocess => f.write_str("Reprocess"),
        }
    }
}

/// The (seller, shipper) pair extracted from a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantInfo {
    pub seller: Party,
    pub shipper: Party,
}

impl MerchantInfo {
    #[must_use]
    pub fn new(seller: Party, shipper: Party) -> Self {
        Self { seller, shipper }
    }

    #[must_use]
    pub fn no_offer() -> Self {
        Self::new(Party::NoOffer, Party::NoOffer)
    }
}

/// Who holds the primary offer for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStatus {
    /// Seller and shipper are both the marketplace operator.
    OperatorFulfilled,
    /// A third-party merchant takes part as seller or shipper.
    ThirdPartyOffer,
    /// The page was fetched and carried no offer.
    NoOffer,
    /// Access interference prevented a verdict.
    NeedsReprocess,
}

impl ClassificationStatus {
    pub const ALL: [ClassificationStatus; 4] = [
        ClassificationStatus::OperatorFulfilled,
        ClassificationStatus::ThirdPartyOffer,
        ClassificationStatus::NoOffer,
        ClassificationStatus::NeedsReprocess,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationStatus::OperatorFulfilled => "operator_fulfilled",
            ClassificationStatus::ThirdPartyOffer => "third_party_offer",
            ClassificationStatus::NoOffer => "no_offer",
            ClassificationStatus::NeedsReprocess => "needs_reprocess",
        }
    }
}

impl std::fmt::Display for ClassificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ClassificationStatus::OperatorFulfilled => "Operator FO",
            ClassificationStatus::ThirdPartyOffer => "Third-Party",
            ClassificationStatus::NoOffer => "No Offer",
            ClassificationStatus::NeedsReprocess => "Reprocess",
        };
        f.write_str(label)
    }
}

/// The unit handed back to callers: one per submitted identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    id: ProductId,
    seller: Party,
    shipper: Party,
    status: ClassificationStatus,
}

impl ClassifiedRecord {
    #[must_use]
    pub fn new(id: ProductId, info: MerchantInfo, status: ClassificationStatus) -> Self {
        Self {
            id,
            seller: info.seller,
            shipper: info.shipper,
            status,
        }
    }

    /// A record for a page that was fetched but had nothing to extract.
    #[must_use]
    pub fn no_offer(id: ProductId) -> Self {
        Self::new(id, MerchantInfo::no_offer(), ClassificationStatus::NoOffer)
    }

    /// A record for an identifier whose retrieval never succeeded.
    #[must_use]
    pub fn needs_reprocess(id: ProductId) -> Self {
        Self::new(
            id,
            MerchantInfo::new(Party::Reprocess, Party::Reprocess),
            ClassificationStatus::NeedsReprocess,
        )
    }

    #[must_use]
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn seller(&self) -> &Party {
        &self.seller
    }

    #[must_use]
    pub fn shipper(&self) -> &Party {
        &self.shipper
    }

    #[must_use]
    pub fn status(&self) -> ClassificationStatus {
        self.status
    }
}
