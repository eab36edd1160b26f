//! Tree type catalog.
//!
//! Static registry of plantable tree types. Loadable from a JSON asset so
//! new types can ship without a code change; falls back to the built-in set.

use serde::{Deserialize, Serialize};

use super::stage::GrowthStage;
use crate::error::{CoreError, ValidationError};

/// Rarity tier of a tree type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl TreeRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            TreeRarity::Common => "Common",
            TreeRarity::Uncommon => "Uncommon",
            TreeRarity::Rare => "Rare",
            TreeRarity::Legendary => "Legendary",
        }
    }
}

/// A plantable tree type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: TreeRarity,
    pub asset_prefix: String,
}

impl TreeType {
    /// Asset name for a specific growth stage, e.g. `tree_oak_sprout`.
    pub fn asset_name(&self, stage: GrowthStage) -> String {
        format!("{}_{}", self.asset_prefix, stage.asset_suffix())
    }
}

/// Registry of tree types, queried by id.
///
/// Never empty: construction rejects an empty type list.
#[derive(Debug, Clone)]
pub struct TreeCatalog {
    types: Vec<TreeType>,
}

impl TreeCatalog {
    /// Catalog with the built-in tree types.
    pub fn with_defaults() -> Self {
        Self {
            types: default_types(),
        }
    }

    /// Load a catalog from a JSON array of tree types.
    pub fn from_json(data: &str) -> Result<Self, CoreError> {
        let types: Vec<TreeType> = serde_json::from_str(data)?;
        if types.is_empty() {
            return Err(ValidationError::EmptyCollection("tree types".into()).into());
        }
        Ok(Self { types })
    }

    /// Replace the catalog contents from JSON (for future remote updates).
    pub fn reload_from_json(&mut self, data: &str) -> Result<(), CoreError> {
        *self = Self::from_json(data)?;
        Ok(())
    }

    pub fn types(&self) -> &[TreeType] {
        &self.types
    }

    /// Look up a tree type by id.
    pub fn tree_type(&self, id: &str) -> Option<&TreeType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// All tree types with a given rarity.
    pub fn by_rarity(&self, rarity: TreeRarity) -> Vec<&TreeType> {
        self.types.iter().filter(|t| t.rarity == rarity).collect()
    }

    /// The fallback type used for fresh trees.
    pub fn default_tree_type(&self) -> &TreeType {
        &self.types[0]
    }
}

impl Default for TreeCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn tree(id: &str, name: &str, description: &str, rarity: TreeRarity, prefix: &str) -> TreeType {
    TreeType {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        rarity,
        asset_prefix: prefix.into(),
    }
}

fn default_types() -> Vec<TreeType> {
    vec![
        tree(
            "oak",
            "Oak",
            "A mighty oak tree, symbol of strength and endurance.",
            TreeRarity::Common,
            "tree_oak",
        ),
        tree(
            "maple",
            "Maple",
            "Beautiful maple with vibrant autumn colors.",
            TreeRarity::Common,
            "tree_maple",
        ),
        tree(
            "pine",
            "Pine",
            "An evergreen pine that stays green year-round.",
            TreeRarity::Common,
            "tree_pine",
        ),
        tree(
            "cherry",
            "Cherry Blossom",
            "Delicate cherry tree with beautiful pink flowers.",
            TreeRarity::Uncommon,
            "tree_cherry",
        ),
        tree(
            "willow",
            "Willow",
            "Graceful willow with flowing branches.",
            TreeRarity::Uncommon,
            "tree_willow",
        ),
        tree(
            "birch",
            "Birch",
            "Elegant birch with distinctive white bark.",
            TreeRarity::Common,
            "tree_birch",
        ),
        tree(
            "apple",
            "Apple",
            "Fruitful apple tree for your garden.",
            TreeRarity::Uncommon,
            "tree_apple",
        ),
        tree(
            "palm",
            "Palm",
            "Tropical palm bringing vacation vibes.",
            TreeRarity::Rare,
            "tree_palm",
        ),
        tree(
            "redwood",
            "Redwood",
            "Ancient giant from the California forests.",
            TreeRarity::Rare,
            "tree_redwood",
        ),
        tree(
            "bonsai",
            "Bonsai",
            "Miniature masterpiece of living art.",
            TreeRarity::Legendary,
            "tree_bonsai",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let catalog = TreeCatalog::with_defaults();
        assert_eq!(catalog.tree_type("oak").unwrap().name, "Oak");
        assert!(catalog.tree_type("cactus").is_none());
    }

    #[test]
    fn default_type_is_first() {
        let catalog = TreeCatalog::with_defaults();
        assert_eq!(catalog.default_tree_type().id, "oak");
    }

    #[test]
    fn rarity_filter() {
        let catalog = TreeCatalog::with_defaults();
        let legendary = catalog.by_rarity(TreeRarity::Legendary);
        assert_eq!(legendary.len(), 1);
        assert_eq!(legendary[0].id, "bonsai");
    }

    #[test]
    fn asset_names_follow_prefix() {
        let catalog = TreeCatalog::with_defaults();
        let pine = catalog.tree_type("pine").unwrap();
        assert_eq!(pine.asset_name(GrowthStage::Young), "tree_pine_young");
    }

    #[test]
    fn json_round_trip_and_empty_rejection() {
        let catalog = TreeCatalog::with_defaults();
        let json = serde_json::to_string(catalog.types()).unwrap();
        let reloaded = TreeCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.types().len(), catalog.types().len());

        assert!(TreeCatalog::from_json("[]").is_err());
    }
}
