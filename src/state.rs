use crate::{
    item::ItemSet,
    offer::{AcceptError, Offer, OfferStatus, OfferUID},
    user::{User, UserUID},
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("no user with ID \"{0}\"")]
    UnknownUser(UserUID),

    #[error("no offer with ID \"{0}\"")]
    UnknownOffer(OfferUID),

    #[error("user \"{0}\" cannot trade with themselves")]
    SelfTrade(UserUID),

    #[error("offer rejected: {0}")]
    Rejected(#[from] AcceptError),
}

/// A stored offer along with who it is between.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OfferRecord {
    offer: Offer,
    proposer: UserUID,
    counterparty: UserUID,
    created_at: DateTime<Utc>,
}

impl OfferRecord {
    pub fn get_offer(&self) -> &Offer { &self.offer }
    pub fn get_proposer(&self) -> UserUID { self.proposer }
    pub fn get_counterparty(&self) -> UserUID { self.counterparty }
    pub fn get_created_at(&self) -> DateTime<Utc> { self.created_at }

    fn involves(&self, user_id: UserUID) -> bool {
        self.proposer == user_id || self.counterparty == user_id
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfferSortBy {
    DateAscending,
    #[default]
    DateDescending,
}

pub(crate) fn offer_sort(sort_by: OfferSortBy, a: &OfferRecord, b: &OfferRecord) -> Ordering {
    match sort_by {
        OfferSortBy::DateAscending => a.created_at.cmp(&b.created_at),
        OfferSortBy::DateDescending => b.created_at.cmp(&a.created_at),
    }
}

pub(crate) type Offers = DashMap<OfferUID, OfferRecord>;
pub(crate) type Users = DashMap<UserUID, User>;

/// The authoritative copy of every user and offer.
///
/// Users and offers are immutable values, so every change here replaces the
/// stored value with the one returned by the core. Updates to a single entry
/// are atomic; nothing spans two users.
#[derive(Debug, Default)]
pub struct MarketState {
    users: Users,
    offers: Offers,
}

impl MarketState {
    pub fn new() -> Self { Self::default() }

    pub fn add_user(&self, user: User) -> UserUID {
        let user_id = UserUID::new();

        tracing::debug!("Adding user \"{}\" as {user_id}", user.get_username());
        self.users.insert(user_id, user);

        user_id
    }

    pub fn find_user(&self, username: &str) -> Option<UserUID> {
        self.users
            .par_iter()
            .map(|kv| (*kv.key(), kv.value().get_username() == username))
            .find_first(|(_, matches)| *matches)
            .map(|(id, _)| id)
    }

    pub fn get_or_add_user(&self, username: &str) -> UserUID {
        if let Some(user_id) = self.find_user(username) {
            user_id
        } else {
            self.add_user(User::new(username))
        }
    }

    pub fn get_user(&self, user_id: UserUID) -> Option<User> {
        self.users.get(&user_id).map(|kv| kv.value().clone())
    }

    fn update_user(
        &self,
        user_id: UserUID,
        update: impl FnOnce(&User) -> User,
    ) -> Result<User, MarketError> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or(MarketError::UnknownUser(user_id))?;

        let updated = update(entry.value());
        *entry.value_mut() = updated.clone();

        Ok(updated)
    }

    /// Gives `items` to a user.
    ///
    /// # Errors
    ///
    /// Fails if `user_id` is not known.
    pub fn give_items(&self, user_id: UserUID, items: &ItemSet) -> Result<User, MarketError> {
        self.update_user(user_id, |user| user.with_items_added(items))
    }

    /// Takes `items` away from a user. Items the user never held are ignored.
    ///
    /// # Errors
    ///
    /// Fails if `user_id` is not known.
    pub fn take_items(&self, user_id: UserUID, items: &ItemSet) -> Result<User, MarketError> {
        self.update_user(user_id, |user| user.with_items_removed(items))
    }

    /// Records a new pending offer against the current state of both users.
    ///
    /// # Errors
    ///
    /// Fails if either user is unknown or both IDs are the same user.
    pub fn propose(
        &self,
        proposer: UserUID,
        counterparty: UserUID,
        offered_items: ItemSet,
        requested_items: ItemSet,
    ) -> Result<OfferUID, MarketError> {
        if proposer == counterparty {
            return Err(MarketError::SelfTrade(proposer));
        }

        let user_a = self.get_user(proposer).ok_or(MarketError::UnknownUser(proposer))?;
        let user_b = self
            .get_user(counterparty)
            .ok_or(MarketError::UnknownUser(counterparty))?;

        let offer_id = OfferUID::new();
        let offer = Offer::new(user_a, user_b, offered_items, requested_items);

        tracing::debug!(
            "Offer {offer_id}: \"{}\" offers {} item(s) for {} item(s) from \"{}\"",
            offer.get_user_a().get_username(),
            offer.get_offered_items().len(),
            offer.get_requested_items().len(),
            offer.get_user_b().get_username()
        );

        self.offers.insert(
            offer_id,
            OfferRecord {
                offer,
                proposer,
                counterparty,
                created_at: Utc::now(),
            },
        );

        Ok(offer_id)
    }

    pub fn get_offer(&self, offer_id: OfferUID) -> Option<Offer> {
        self.offers.get(&offer_id).map(|kv| kv.value().offer.clone())
    }

    fn get_record(&self, offer_id: OfferUID) -> Result<OfferRecord, MarketError> {
        self.offers
            .get(&offer_id)
            .map(|kv| kv.value().clone())
            .ok_or(MarketError::UnknownOffer(offer_id))
    }

    /// Accepts a stored offer and writes both updated users back.
    ///
    /// A pending offer is checked against the users as they are now, not as
    /// they were when it was proposed.
    ///
    /// # Errors
    ///
    /// Fails if the offer or either user is unknown, or with
    /// [`MarketError::Rejected`] if the trade cannot go ahead. Nothing is
    /// written in that case.
    pub fn accept(&self, offer_id: OfferUID) -> Result<Offer, MarketError> {
        let record = self.get_record(offer_id)?;

        let offer = if record.offer.get_status() == OfferStatus::Pending {
            let user_a = self
                .get_user(record.proposer)
                .ok_or(MarketError::UnknownUser(record.proposer))?;
            let user_b = self
                .get_user(record.counterparty)
                .ok_or(MarketError::UnknownUser(record.counterparty))?;

            record.offer.with_users(user_a, user_b)
        } else {
            record.offer.clone()
        };

        let (accepted, user_a, user_b) = offer.try_accept().map_err(|e| {
            tracing::warn!("Offer {offer_id} could not be accepted: {e}");
            e
        })?;

        self.users.insert(record.proposer, user_a);
        self.users.insert(record.counterparty, user_b);
        self.offers.insert(
            offer_id,
            OfferRecord {
                offer: accepted.clone(),
                ..record
            },
        );

        tracing::info!(
            "Offer {offer_id} accepted: \"{}\" and \"{}\" traded {} for {} item(s)",
            accepted.get_user_a().get_username(),
            accepted.get_user_b().get_username(),
            accepted.get_offered_items().len(),
            accepted.get_requested_items().len()
        );

        Ok(accepted)
    }

    /// Declines a stored offer. Declining a resolved offer changes nothing.
    ///
    /// # Errors
    ///
    /// Fails if the offer is unknown.
    pub fn decline(&self, offer_id: OfferUID) -> Result<Offer, MarketError> {
        let mut entry = self
            .offers
            .get_mut(&offer_id)
            .ok_or(MarketError::UnknownOffer(offer_id))?;

        let declined = entry.offer.decline();

        if declined.get_status() == entry.offer.get_status() {
            tracing::debug!("Offer {offer_id} is already {}", declined.get_status());
        } else {
            tracing::info!("Offer {offer_id} declined");
        }

        entry.offer = declined.clone();

        Ok(declined)
    }

    pub fn offers_for_user(
        &self,
        user_id: UserUID,
        sort_by: OfferSortBy,
    ) -> Vec<(OfferUID, Offer)> {
        let mut records = self
            .offers
            .iter()
            .filter(|kv| kv.value().involves(user_id))
            .map(|kv| (*kv.key(), kv.value().clone()))
            .collect::<Vec<_>>();

        records.sort_by(|(_, a), (_, b)| offer_sort(sort_by, a, b));

        records
            .into_iter()
            .map(|(id, record)| (id, record.offer))
            .collect()
    }
}
