//! The target-side registration API.
//!
//! Translators hand finished definitions to a [`TargetRegistry`] and keep no
//! reference to them afterwards.

pub mod block;
pub mod item;

pub use block::{
    BlockDefinition, BoxRegion, ComponentSet, CreativeCategory, DeclaredValues,
    JavaStateOverride, MaterialInstance, Permutation, PropertyDeclaration, StateOverride,
    Transformation,
};
pub use item::{ArmorSlot, ItemDefinition};

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Receives translated definitions.
pub trait TargetRegistry {
    fn register_block(&mut self, definition: BlockDefinition) -> Result<()>;

    /// Attach origin metadata to a state of an already registered block.
    fn register_state_override(&mut self, state: StateOverride) -> Result<()>;

    fn register_item(&mut self, definition: ItemDefinition) -> Result<()>;
}

/// Records every registration in order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecordingRegistry {
    pub blocks: Vec<BlockDefinition>,
    pub state_overrides: Vec<StateOverride>,
    pub items: Vec<ItemDefinition>,
    #[serde(skip)]
    identifiers: HashSet<String>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, identifier: &str) -> Option<&BlockDefinition> {
        self.blocks.iter().find(|b| b.identifier() == identifier)
    }

    pub fn item(&self, identifier: &str) -> Option<&ItemDefinition> {
        self.items.iter().find(|i| i.identifier == identifier)
    }

    /// Pretty-printed JSON of everything registered.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TargetRegistry for RecordingRegistry {
    fn register_block(&mut self, definition: BlockDefinition) -> Result<()> {
        if !self.identifiers.insert(definition.identifier()) {
            return Err(BridgeError::Registration(format!(
                "block {} registered twice",
                definition.identifier()
            )));
        }
        self.blocks.push(definition);
        Ok(())
    }

    fn register_state_override(&mut self, state: StateOverride) -> Result<()> {
        if self.block(&state.block).is_none() {
            return Err(BridgeError::Registration(format!(
                "state override for unregistered block {}",
                state.block
            )));
        }
        self.state_overrides.push(state);
        Ok(())
    }

    fn register_item(&mut self, definition: ItemDefinition) -> Result<()> {
        if self.item(&definition.identifier).is_some() {
            return Err(BridgeError::Registration(format!(
                "item {} registered twice",
                definition.identifier
            )));
        }
        self.items.push(definition);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StateValues;

    fn definition(name: &str) -> BlockDefinition {
        BlockDefinition {
            name: name.to_string(),
            namespace: "mymod".to_string(),
            creative_group: "itemGroup.mymod.blocks".to_string(),
            creative_category: CreativeCategory::Construction,
            included_in_creative_inventory: true,
            properties: Vec::new(),
            components: None,
            permutations: Vec::new(),
        }
    }

    fn state_override(block: &str) -> StateOverride {
        StateOverride {
            block: block.to_string(),
            state: StateValues::new(),
            java: JavaStateOverride {
                identifier: block.to_string(),
                java_id: Some(1),
                block_hardness: 1.5,
                can_break_with_hand: true,
                waterlogged: false,
                pick_item: block.to_string(),
                collision: Vec::new(),
            },
        }
    }

    #[test]
    fn test_override_requires_registered_block() {
        let mut registry = RecordingRegistry::new();
        assert!(registry
            .register_state_override(state_override("mymod:ruby_block"))
            .is_err());

        registry.register_block(definition("ruby_block")).unwrap();
        registry
            .register_state_override(state_override("mymod:ruby_block"))
            .unwrap();
        assert_eq!(registry.state_overrides.len(), 1);
    }

    #[test]
    fn test_duplicate_block_rejected() {
        let mut registry = RecordingRegistry::new();
        registry.register_block(definition("ruby_block")).unwrap();
        assert!(matches!(
            registry.register_block(definition("ruby_block")),
            Err(BridgeError::Registration(_))
        ));
    }

    #[test]
    fn test_to_json() {
        let mut registry = RecordingRegistry::new();
        registry.register_block(definition("ruby_block")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&registry.to_json().unwrap()).unwrap();
        assert_eq!(value["blocks"][0]["name"], "ruby_block");
        assert_eq!(value["blocks"][0]["creative_category"], "construction");
        assert!(value["blocks"][0].get("components").is_none());
        assert!(value.get("identifiers").is_none());
    }
}
