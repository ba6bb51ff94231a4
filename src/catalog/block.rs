//! Block entries and their states.

use super::property::{Property, PropertySpace, PropertyValue, StateValues};
use crate::error::{BridgeError, Result};
use crate::types::{Aabb, ResourceLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Model rendered for blocks whose visuals live entirely in an entity or item.
pub const EMPTY_BLOCK_MODEL: &str = "polymer:block/empty";

/// A block the host wants translated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    pub id: ResourceLocation,
    pub translation_key: String,
    /// Localized name, if the host resolved one.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Declared properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// One entry per property assignment. Generated from `properties` when
    /// left empty.
    #[serde(default)]
    pub states: Vec<StateEntry>,
    /// Whether every state must come with its own model.
    #[serde(default)]
    pub textured_placeholder: bool,
    /// The block item's item model, used as a fallback display.
    #[serde(default)]
    pub item_model: Option<ResourceLocation>,
    /// Item given by pick-block; defaults to the block id.
    #[serde(default)]
    pub pick_item: Option<ResourceLocation>,
}

/// One concrete block state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEntry {
    #[serde(default)]
    pub values: StateValues,
    /// Numeric state id on the origin side.
    #[serde(default)]
    pub raw_id: Option<u32>,
    /// Candidate models for the displayed state; the first is used.
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    /// What the state is shown as to origin clients.
    #[serde(default)]
    pub display: DisplayKind,
    /// Collision shape bounds in block units; `None` is an empty shape.
    #[serde(default)]
    pub collision_shape: Option<Aabb>,
    /// Outline (selection) shape bounds in block units.
    #[serde(default)]
    pub outline_shape: Option<Aabb>,
    #[serde(default)]
    pub luminance: u8,
    #[serde(default)]
    pub hardness: f32,
    #[serde(default)]
    pub tool_required: bool,
    #[serde(default = "default_opaque")]
    pub opaque: bool,
}

fn default_opaque() -> bool {
    true
}

/// How a state is displayed before translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    #[default]
    Model,
    Air,
    Barrier,
}

/// A model reference with per-state rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model: ResourceLocation,
    /// X rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    #[serde(default)]
    pub y: i32,
}

impl ModelEntry {
    pub fn new(model: ResourceLocation) -> Self {
        Self {
            model,
            x: 0,
            y: 0,
        }
    }

    pub fn is_empty_model(&self) -> bool {
        self.model.to_string() == EMPTY_BLOCK_MODEL
    }
}

impl StateEntry {
    /// A state with the given values and default physical attributes.
    pub fn with_values(values: StateValues) -> Self {
        Self {
            values,
            raw_id: None,
            models: Vec::new(),
            display: DisplayKind::Model,
            collision_shape: Some(Aabb::full_block()),
            outline_shape: Some(Aabb::full_block()),
            luminance: 0,
            hardness: 0.0,
            tool_required: false,
            opaque: default_opaque(),
        }
    }

    /// The model to display. Weighted candidates are not randomized; the
    /// first one wins.
    pub fn primary_model(&self) -> Option<&ModelEntry> {
        self.models.first()
    }

    /// Whether the displayed state needs a fallback model.
    pub fn needs_fallback(&self) -> bool {
        match self.display {
            DisplayKind::Air | DisplayKind::Barrier => true,
            DisplayKind::Model => self
                .primary_model()
                .map(ModelEntry::is_empty_model)
                .unwrap_or(true),
        }
    }

    pub fn waterlogged(&self) -> bool {
        matches!(self.values.get("waterlogged"), Some(PropertyValue::Bool(true)))
    }

    /// `id[name=value,...]`, properties sorted by name.
    pub fn state_string(&self, block: &ResourceLocation) -> String {
        if self.values.is_empty() {
            return block.to_string();
        }
        let pairs: Vec<String> = self
            .values
            .iter()
            .map(|(name, value)| format!("{}={}", name, value.normalized()))
            .collect();
        format!("{}[{}]", block, pairs.join(","))
    }
}

impl BlockEntry {
    pub fn new(id: ResourceLocation, translation_key: impl Into<String>) -> Self {
        Self {
            id,
            translation_key: translation_key.into(),
            display_name: None,
            properties: Vec::new(),
            states: Vec::new(),
            textured_placeholder: false,
            item_model: None,
            pick_item: None,
        }
    }

    pub fn property_space(&self) -> PropertySpace<'_> {
        PropertySpace::new(&self.properties)
    }

    pub fn pick_item(&self) -> &ResourceLocation {
        self.pick_item.as_ref().unwrap_or(&self.id)
    }

    /// Fill in generated states when none were listed.
    pub fn expand_states(&mut self) {
        if self.states.is_empty() {
            self.states = self
                .property_space()
                .states()
                .into_iter()
                .map(StateEntry::with_values)
                .collect();
        }
    }

    /// Check every state against the declared properties.
    pub fn validate(&self) -> Result<()> {
        let space = self.property_space();
        let mut seen = HashSet::new();
        for state in &self.states {
            space
                .validate(&state.values)
                .map_err(|e| BridgeError::InvalidCatalog(format!("{}: {}", self.id, e)))?;
            if !seen.insert(state.state_string(&self.id)) {
                return Err(BridgeError::InvalidCatalog(format!(
                    "{}: duplicate state {}",
                    self.id,
                    state.state_string(&self.id)
                )));
            }
        }
        Ok(())
    }
}
