//! The host's catalog of translatable blocks and items.
//!
//! A catalog is a read-only snapshot handed to the translator. Hosts with a
//! live registry implement [`Catalog`] directly; [`StaticCatalog`] reads a
//! JSON dump so translation can run offline.

pub mod block;
pub mod item;
pub mod property;

pub use block::{BlockEntry, DisplayKind, ModelEntry, StateEntry, EMPTY_BLOCK_MODEL};
pub use item::{EquipmentSlot, FoodInfo, ItemEntry, ItemKind};
pub use property::{Property, PropertyKind, PropertySpace, PropertyValue, StateValues};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// Read-only access to the entities to translate, in catalog order.
pub trait Catalog {
    fn blocks(&self) -> &[BlockEntry];
    fn items(&self) -> &[ItemEntry];
}

/// A catalog loaded from a JSON snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    pub blocks: Vec<BlockEntry>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a snapshot. Blocks that list no states get the
    /// full product of their properties; blocks that fail validation are
    /// logged and dropped.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let mut catalog: StaticCatalog = serde_json::from_slice(data)?;
        catalog.blocks.retain_mut(|block| {
            block.expand_states();
            match block.validate() {
                Ok(()) => true,
                Err(e) => {
                    error!(block = %block.id, error = %e, "dropping invalid block");
                    false
                }
            }
        });
        debug!(
            blocks = catalog.blocks.len(),
            items = catalog.items.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

impl Catalog for StaticCatalog {
    fn blocks(&self) -> &[BlockEntry] {
        &self.blocks
    }

    fn items(&self) -> &[ItemEntry] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    #[test]
    fn test_from_json_expands_states() {
        let json = br#"{
            "blocks": [
                { "id": "mymod:lamp", "translation_key": "block.mymod.lamp",
                  "properties": [ { "name": "lit", "type": "bool" } ] }
            ],
            "items": [
                { "id": "mymod:ruby", "translation_key": "item.mymod.ruby" }
            ]
        }"#;

        let catalog = StaticCatalog::from_json(json).unwrap();
        assert_eq!(catalog.blocks()[0].states.len(), 2);
        assert_eq!(catalog.items().len(), 1);
    }

    #[test]
    fn test_from_json_drops_only_invalid_block() {
        let json = br#"{
            "blocks": [
                { "id": "mymod:good", "translation_key": "block.mymod.good" },
                { "id": "mymod:lamp", "translation_key": "block.mymod.lamp",
                  "properties": [ { "name": "lit", "type": "bool" } ],
                  "states": [ { "values": { "lit": 3 } } ] }
            ]
        }"#;

        let catalog = StaticCatalog::from_json(json).unwrap();
        let ids: Vec<String> = catalog.blocks().iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, vec!["mymod:good"]);
    }

    #[test]
    fn test_from_json_rejects_unknown_property_kind() {
        let json = br#"{
            "blocks": [
                { "id": "mymod:lamp", "translation_key": "block.mymod.lamp",
                  "properties": [ { "name": "lit", "type": "float" } ] }
            ]
        }"#;

        assert!(matches!(
            StaticCatalog::from_json(json),
            Err(BridgeError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, br#"{ "blocks": [], "items": [] }"#).unwrap();

        let catalog = StaticCatalog::from_path(&path).unwrap();
        assert!(catalog.blocks().is_empty());
    }
}
