//! Item asset definitions from items/*.json.
//!
//! Only the plain `minecraft:model` form is understood; conditional, select
//! and range-dispatch item models are left as [`ItemModel::Other`].

use crate::types::ResourceLocation;
use serde::Deserialize;

/// An item asset: which model an item stack renders with.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemAsset {
    pub model: ItemModel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ItemModel {
    /// A single static model.
    #[serde(rename = "minecraft:model", alias = "model")]
    Basic { model: ResourceLocation },
    /// Any other item model kind.
    #[serde(other)]
    Other,
}

impl ItemAsset {
    /// The static model this asset points at, if it is a basic one.
    pub fn basic_model(&self) -> Option<&ResourceLocation> {
        match &self.model {
            ItemModel::Basic { model } => Some(model),
            ItemModel::Other => None,
        }
    }
}
