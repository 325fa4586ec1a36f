#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

//! Two-party barter between users holding sets of items.
//!
//! [`Item`], [`User`] and [`Offer`] are immutable values: every change hands
//! back a new value. [`MarketState`] keeps the current version of each user
//! and offer for callers that need one place to store them.

pub mod item;
pub mod offer;
pub mod state;
pub mod user;

pub use item::{Item, ItemSet};
pub use offer::{AcceptError, Offer, OfferStatus, OfferUID};
pub use state::{MarketError, MarketState, OfferRecord, OfferSortBy};
pub use user::{User, UserUID};
