//! Target-side item definitions.

use super::block::CreativeCategory;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A custom item registered with the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub identifier: String,
    pub display_name: String,
    pub creative_group: String,
    pub creative_category: CreativeCategory,
    pub allow_offhand: bool,
    pub edible: bool,
    pub can_always_eat: bool,
    pub foil: bool,
    pub chargeable: bool,
    /// Never loses durability; set for items that cannot be damaged.
    pub unbreakable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_type: Option<ArmorSlot>,
    pub display_handheld: bool,
    /// Texture atlas key of the icon; empty for block items.
    pub icon: String,
    /// Identifier of the block this item places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_id: Option<u32>,
}

/// Target armor slot names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArmorSlot {
    MainHand,
    OffHand,
    Boots,
    Leggings,
    Chestplate,
    Helmet,
    Body,
    /// An origin slot the target has no equivalent for, passed through by name.
    Unsupported(String),
}

impl ArmorSlot {
    pub fn as_str(&self) -> &str {
        match self {
            ArmorSlot::MainHand => "main_hand",
            ArmorSlot::OffHand => "off_hand",
            ArmorSlot::Boots => "boots",
            ArmorSlot::Leggings => "leggings",
            ArmorSlot::Chestplate => "chestplate",
            ArmorSlot::Helmet => "helmet",
            ArmorSlot::Body => "body",
            ArmorSlot::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ArmorSlot::Unsupported(_))
    }

    fn from_name(name: &str) -> Self {
        match name {
            "main_hand" => ArmorSlot::MainHand,
            "off_hand" => ArmorSlot::OffHand,
            "boots" => ArmorSlot::Boots,
            "leggings" => ArmorSlot::Leggings,
            "chestplate" => ArmorSlot::Chestplate,
            "helmet" => ArmorSlot::Helmet,
            "body" => ArmorSlot::Body,
            other => ArmorSlot::Unsupported(other.to_string()),
        }
    }
}

impl Serialize for ArmorSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ArmorSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}
