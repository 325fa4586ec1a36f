use crate::item::{Item, ItemSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, PartialEq, Eq)]
pub struct UserUID(pub Uuid);

impl UserUID {
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for UserUID {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for UserUID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A user and a snapshot of the items they hold.
///
/// Every `with_*` method leaves `self` alone and hands back a new `User`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct User {
    username: String,
    #[serde(default)]
    items: ItemSet,
}

impl User {
    pub fn new(username: &str) -> Self { Self::holding(username, ItemSet::new()) }

    pub fn holding(username: &str, items: ItemSet) -> Self {
        Self {
            username: username.into(),
            items,
        }
    }

    pub fn get_username(&self) -> &str { &self.username }
    pub fn get_items(&self) -> &ItemSet { &self.items }

    pub fn holds(&self, item: &Item) -> bool { self.items.contains(item) }
    pub fn holds_all(&self, items: &ItemSet) -> bool { items.is_subset(&self.items) }

    fn with_items(&self, items: ItemSet) -> Self {
        Self {
            username: self.username.clone(),
            items,
        }
    }

    #[must_use]
    pub fn with_item_added(&self, item: &Item) -> Self {
        let mut items = self.items.clone();
        items.insert(item.clone());

        self.with_items(items)
    }

    #[must_use]
    pub fn with_items_added(&self, items: &ItemSet) -> Self {
        self.with_items(self.items.union(items).cloned().collect())
    }

    #[must_use]
    pub fn with_item_removed(&self, item: &Item) -> Self {
        let mut items = self.items.clone();
        items.remove(item);

        self.with_items(items)
    }

    #[must_use]
    pub fn with_items_removed(&self, items: &ItemSet) -> Self {
        self.with_items(self.items.difference(items).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Item { Item::new("Book/本", "A mystery novel/ミステリー小説") }
    fn pen() -> Item { Item::new("Pen/ペン", "A fancy fountain pen/高級万年筆") }

    #[test]
    fn new_user_holds_nothing() {
        let user = User::new("alice");

        assert_eq!(user.get_username(), "alice");
        assert!(user.get_items().is_empty());
    }

    #[test]
    fn adding_returns_new_user_and_leaves_original() {
        let alice = User::new("alice");
        let updated = alice.with_item_added(&book());

        assert!(alice.get_items().is_empty());
        assert!(updated.holds(&book()));
        assert_eq!(updated.get_username(), "alice");
    }

    #[test]
    fn adding_present_item_is_idempotent() {
        let alice = User::holding("alice", ItemSet::from([book()]));

        assert_eq!(alice.with_item_added(&book()), alice);
    }

    #[test]
    fn removing_absent_item_is_noop() {
        let alice = User::holding("alice", ItemSet::from([book()]));

        assert_eq!(alice.with_item_removed(&pen()), alice);
        assert_eq!(alice.with_items_removed(&ItemSet::from([pen()])), alice);
    }

    #[test]
    fn bulk_add_and_remove_are_union_and_difference() {
        let alice = User::holding("alice", ItemSet::from([book()]));

        let added = alice.with_items_added(&ItemSet::from([book(), pen()]));
        assert_eq!(added.get_items(), &ItemSet::from([book(), pen()]));

        let removed = added.with_items_removed(&ItemSet::from([book()]));
        assert_eq!(removed.get_items(), &ItemSet::from([pen()]));
        assert!(added.holds_all(&ItemSet::from([book(), pen()])));
    }

    mod proptest_tests {
        use super::*;
        use proptest::{collection::hash_set, prelude::*};

        fn item() -> impl Strategy<Value = Item> {
            ("[a-e]{1,2}", "[xy]{0,1}").prop_map(|(name, desc)| Item::new(&name, &desc))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            #[test]
            fn set_algebra_matches_std(
                held in hash_set(item(), 0..8),
                other in hash_set(item(), 0..8),
            ) {
                let user = User::holding("u", held.clone());

                let union: ItemSet = held.union(&other).cloned().collect();
                let difference: ItemSet = held.difference(&other).cloned().collect();

                let added = user.with_items_added(&other);
                let removed = user.with_items_removed(&other);
                prop_assert_eq!(added.get_items(), &union);
                prop_assert_eq!(removed.get_items(), &difference);
                prop_assert_eq!(user.get_items(), &held);
            }

            #[test]
            fn single_item_ops_agree_with_bulk_ops(
                held in hash_set(item(), 0..8),
                one in item(),
            ) {
                let user = User::holding("u", held);
                let single = ItemSet::from([one.clone()]);

                prop_assert_eq!(user.with_item_added(&one), user.with_items_added(&single));
                prop_assert_eq!(user.with_item_removed(&one), user.with_items_removed(&single));
            }
        }
    }
}
