//! Item entries.

use crate::registry::ArmorSlot;
use crate::types::ResourceLocation;
use serde::{Deserialize, Serialize};

/// An item the host wants translated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: ResourceLocation,
    pub translation_key: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Item model of the stack origin clients are sent. `None` means the
    /// stack has no item model component.
    #[serde(default)]
    pub display_model: Option<ResourceLocation>,
    #[serde(default)]
    pub food: Option<FoodInfo>,
    /// Whether the stack carries a consumable component.
    #[serde(default)]
    pub consumable: bool,
    #[serde(default)]
    pub glint_override: Option<bool>,
    #[serde(default)]
    pub damageable: bool,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub equipment_slot: Option<EquipmentSlot>,
    /// Placeholder block backing this item, if it is a block item.
    #[serde(default)]
    pub block: Option<ResourceLocation>,
    #[serde(default)]
    pub raw_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodInfo {
    #[serde(default)]
    pub can_always_eat: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Other,
    Bow,
    Crossbow,
}

impl ItemKind {
    /// Bows and crossbows charge before use.
    pub fn is_chargeable(self) -> bool {
        matches!(self, ItemKind::Bow | ItemKind::Crossbow)
    }
}

/// Origin-side equipment slot names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Mainhand,
    Offhand,
    Feet,
    Legs,
    Chest,
    Head,
    Body,
    Saddle,
}

impl EquipmentSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentSlot::Mainhand => "mainhand",
            EquipmentSlot::Offhand => "offhand",
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Head => "head",
            EquipmentSlot::Body => "body",
            EquipmentSlot::Saddle => "saddle",
        }
    }

    /// The target armor slot. Saddles have no counterpart.
    pub fn armor_slot(self) -> ArmorSlot {
        match self {
            EquipmentSlot::Mainhand => ArmorSlot::MainHand,
            EquipmentSlot::Offhand => ArmorSlot::OffHand,
            EquipmentSlot::Feet => ArmorSlot::Boots,
            EquipmentSlot::Legs => ArmorSlot::Leggings,
            EquipmentSlot::Chest => ArmorSlot::Chestplate,
            EquipmentSlot::Head => ArmorSlot::Helmet,
            EquipmentSlot::Body => ArmorSlot::Body,
            EquipmentSlot::Saddle => ArmorSlot::Unsupported(self.as_str().to_string()),
        }
    }
}

impl ItemEntry {
    pub fn new(id: ResourceLocation, translation_key: impl Into<String>) -> Self {
        Self {
            id,
            translation_key: translation_key.into(),
            display_name: None,
            display_model: None,
            food: None,
            consumable: false,
            glint_override: None,
            damageable: false,
            kind: ItemKind::Other,
            equipment_slot: None,
            block: None,
            raw_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_entry() {
        let json = r#"{
            "id": "mymod:ruby_bow",
            "translation_key": "item.mymod.ruby_bow",
            "display_model": "mymod:ruby_bow",
            "kind": "bow",
            "damageable": true,
            "equipment_slot": "mainhand"
        }"#;

        let item: ItemEntry = serde_json::from_str(json).unwrap();
        assert!(item.kind.is_chargeable());
        assert!(item.damageable);
        assert!(item.food.is_none());
        assert_eq!(item.equipment_slot, Some(EquipmentSlot::Mainhand));
        assert!(item.block.is_none());
    }

    #[test]
    fn test_armor_slot_table() {
        assert_eq!(EquipmentSlot::Feet.armor_slot(), ArmorSlot::Boots);
        assert_eq!(EquipmentSlot::Legs.armor_slot(), ArmorSlot::Leggings);
        assert_eq!(EquipmentSlot::Chest.armor_slot(), ArmorSlot::Chestplate);
        assert_eq!(EquipmentSlot::Head.armor_slot(), ArmorSlot::Helmet);
        assert_eq!(EquipmentSlot::Offhand.armor_slot(), ArmorSlot::OffHand);
        assert_eq!(
            EquipmentSlot::Saddle.armor_slot(),
            ArmorSlot::Unsupported("saddle".to_string())
        );
    }
}
