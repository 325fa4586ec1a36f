use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// An unordered, duplicate-free collection of items.
pub type ItemSet = HashSet<Item>;

/// A single tradeable item.
///
/// Items are plain values: two items with the same name and description are
/// the same item as far as any set membership is concerned. By convention both
/// fields carry an `"english/japanese"` pair, but nothing here looks inside them.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    name: String,
    #[serde(default)]
    description: String,
}

impl Item {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn named(name: &str) -> Self { Self::new(name, "") }

    pub fn get_name(&self) -> &str { &self.name }
    pub fn get_description(&self) -> &str { &self.description }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_defaults_to_empty() {
        let pen = Item::named("Pen/ペン");

        assert_eq!(pen.get_name(), "Pen/ペン");
        assert_eq!(pen.get_description(), "");
        assert_eq!(pen, Item::new("Pen/ペン", ""));
    }

    #[test]
    fn equal_items_collapse_in_a_set() {
        let set: ItemSet = [
            Item::new("Book/本", "A mystery novel/ミステリー小説"),
            Item::new("Book/本", "A mystery novel/ミステリー小説"),
            Item::new("Book/本", "A cookbook/料理本"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn missing_description_deserializes_as_empty() {
        let item: Item = serde_json::from_str(r#"{"name":"Lamp/ランプ"}"#).unwrap();

        assert_eq!(item, Item::named("Lamp/ランプ"));
    }
}
