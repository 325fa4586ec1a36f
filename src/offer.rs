use crate::{item::ItemSet, user::User};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, PartialEq, Eq)]
pub struct OfferUID(pub Uuid);

impl OfferUID {
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for OfferUID {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for OfferUID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, Hash, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl OfferStatus {
    pub fn is_terminal(self) -> bool { self != Self::Pending }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Declined => "DECLINED",
        };

        f.write_str(name)
    }
}

/// Why an offer could not be accepted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AcceptError {
    #[error("offer has already been resolved as {0}")]
    AlreadyResolved(OfferStatus),

    #[error("proposer does not hold every offered item")]
    OfferedItemsNotOwned,

    #[error("counterparty does not hold every requested item")]
    RequestedItemsNotOwned,
}

/// A proposed exchange: `user_a` gives `offered_items` to `user_b` in return
/// for `requested_items`.
///
/// The item sets are only checked against the users when the offer is
/// accepted, never at construction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Offer {
    user_a: User,
    user_b: User,
    offered_items: ItemSet,
    requested_items: ItemSet,
    #[serde(default)]
    status: OfferStatus,
}

impl Offer {
    pub fn new(
        user_a: User,
        user_b: User,
        offered_items: ItemSet,
        requested_items: ItemSet,
    ) -> Self {
        Self::from_parts(
            user_a,
            user_b,
            offered_items,
            requested_items,
            OfferStatus::Pending,
        )
    }

    pub fn from_parts(
        user_a: User,
        user_b: User,
        offered_items: ItemSet,
        requested_items: ItemSet,
        status: OfferStatus,
    ) -> Self {
        Self {
            user_a,
            user_b,
            offered_items,
            requested_items,
            status,
        }
    }

    pub fn get_user_a(&self) -> &User { &self.user_a }
    pub fn get_user_b(&self) -> &User { &self.user_b }
    pub fn get_offered_items(&self) -> &ItemSet { &self.offered_items }
    pub fn get_requested_items(&self) -> &ItemSet { &self.requested_items }
    pub fn get_status(&self) -> OfferStatus { self.status }

    /// Returns a copy of this offer referencing different user snapshots.
    #[must_use]
    pub fn with_users(&self, user_a: User, user_b: User) -> Self {
        Self {
            user_a,
            user_b,
            ..self.clone()
        }
    }

    fn unchanged(&self) -> (Self, User, User) {
        (self.clone(), self.user_a.clone(), self.user_b.clone())
    }

    /// Accepts the offer, swapping both item sets.
    ///
    /// Does nothing if the offer is not pending or either party is missing
    /// an item they would have to hand over; check the returned status.
    #[must_use]
    pub fn accept(&self) -> (Self, User, User) {
        self.try_accept().unwrap_or_else(|_| self.unchanged())
    }

    /// Same as [`Offer::accept`], but says why nothing happened.
    ///
    /// # Errors
    ///
    /// Returns an [`AcceptError`] if the offer is no longer pending or a
    /// party does not hold the items they would give away.
    pub fn try_accept(&self) -> Result<(Self, User, User), AcceptError> {
        if self.status.is_terminal() {
            return Err(AcceptError::AlreadyResolved(self.status));
        }

        if !self.user_a.holds_all(&self.offered_items) {
            return Err(AcceptError::OfferedItemsNotOwned);
        }

        if !self.user_b.holds_all(&self.requested_items) {
            return Err(AcceptError::RequestedItemsNotOwned);
        }

        // Removal happens first, so an item both offered and requested stays
        // with user_a.
        let updated_user_a = self
            .user_a
            .with_items_removed(&self.offered_items)
            .with_items_added(&self.requested_items);
        let updated_user_b = self
            .user_b
            .with_items_removed(&self.requested_items)
            .with_items_added(&self.offered_items);

        let updated_offer = Self {
            user_a: updated_user_a.clone(),
            user_b: updated_user_b.clone(),
            status: OfferStatus::Accepted,
            ..self.clone()
        };

        Ok((updated_offer, updated_user_a, updated_user_b))
    }

    /// Declines a pending offer. No items change hands.
    #[must_use]
    pub fn decline(&self) -> Self {
        match self.status {
            OfferStatus::Pending => Self {
                status: OfferStatus::Declined,
                ..self.clone()
            },
            OfferStatus::Accepted | OfferStatus::Declined => self.clone(),
        }
    }
}
