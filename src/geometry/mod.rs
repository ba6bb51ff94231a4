//! Bedrock geometry documents.
//!
//! A geometry file (`models/blocks/<id>.geo.json`) holds one geometry with a
//! description and a list of bones. Each bone carries cubes expressed in
//! Bedrock space, where (0,0,0) is the center of the block's bottom face.

pub mod transformer;

pub use transformer::{
    archetype_face_map, extract_texture_face_map, ConversionResult, FaceBinding,
    GeometryTransformer, FULL_BLOCK_GEOMETRY,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete `.geo.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryFile {
    pub format_version: String,
    #[serde(rename = "minecraft:geometry")]
    pub geometry: Vec<Geometry>,
}

impl GeometryFile {
    /// Wrap a single geometry.
    pub fn single(format_version: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            format_version: format_version.into(),
            geometry: vec![geometry],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub description: GeometryDescription,
    pub bones: Vec<Bone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryDescription {
    pub identifier: String,
    pub texture_width: u32,
    pub texture_height: u32,
}

/// One bone per Java element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    pub pivot: [f32; 3],
    /// Degrees around X, Y, Z. Absent for unrotated elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    pub cubes: Vec<Cube>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub origin: [f32; 3],
    pub size: [f32; 3],
    /// Per-face UV origins keyed by face name, plus a `*` fallback.
    pub uv: BTreeMap<String, FaceUv>,
    pub inflate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceUv {
    pub uv: [f32; 2],
}
