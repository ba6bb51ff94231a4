//! Java model parsing.
//!
//! Models define geometry as cuboid elements and may inherit elements and
//! textures from a parent model.

use crate::types::{Direction, ElementRotation, ResourceLocation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Texture slot name to literal path or `#alias`.
pub type TextureRefMap = BTreeMap<String, String>;

/// A parsed model from models/*.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Texture variable definitions.
    #[serde(default)]
    pub textures: TextureRefMap,

    /// Model elements (cuboids). `None` means "inherit from parent".
    #[serde(default)]
    pub elements: Option<Vec<ModelElement>>,
}

impl ModelDefinition {
    /// Get the full parent resource location.
    pub fn parent_location(&self) -> Option<ResourceLocation> {
        self.parent.as_deref().map(ResourceLocation::parse)
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    /// Face definitions.
    #[serde(default)]
    pub faces: BTreeMap<Direction, ModelFace>,
}

impl ModelElement {
    /// Get the size of this element in Java coordinates (0-16).
    pub fn size(&self) -> [f32; 3] {
        [
            self.to[0] - self.from[0],
            self.to[1] - self.from[1],
            self.to[2] - self.from[2],
        ]
    }
}

/// A face of a model element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone"). Untextured
    /// faces still carry their UV.
    #[serde(default)]
    pub texture: Option<String>,
}

impl ModelFace {
    /// The UV origin Bedrock wants for this face, if the model declares one.
    pub fn uv_origin(&self) -> Option<[f32; 2]> {
        self.uv.map(|uv| [uv[0], uv[1]])
    }

    /// Texture slot name with any leading `#` removed.
    pub fn texture_key(&self) -> Option<&str> {
        let texture = self.texture.as_deref()?;
        Some(texture.strip_prefix('#').unwrap_or(texture))
    }
}
