//! Target-side block definitions.

use crate::catalog::{Property, PropertyKind, StateValues};
use crate::types::Aabb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Creative inventory tab an entity is placed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativeCategory {
    #[default]
    Construction,
    Nature,
    Equipment,
    Items,
}

/// A custom block registered with the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub name: String,
    pub namespace: String,
    pub creative_group: String,
    pub creative_category: CreativeCategory,
    pub included_in_creative_inventory: bool,
    pub properties: Vec<PropertyDeclaration>,
    /// Unconditional components, set for blocks without properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentSet>,
    #[serde(default)]
    pub permutations: Vec<Permutation>,
}

impl BlockDefinition {
    /// `namespace:name`.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }
}

/// A property as the target declares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub name: String,
    #[serde(flatten)]
    pub values: DeclaredValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeclaredValues {
    Int { values: Vec<i32> },
    Boolean,
    String { values: Vec<String> },
}

impl From<&Property> for PropertyDeclaration {
    fn from(property: &Property) -> Self {
        let values = match &property.kind {
            PropertyKind::Int { values } => DeclaredValues::Int {
                values: values.clone(),
            },
            PropertyKind::Bool => DeclaredValues::Boolean,
            PropertyKind::Enum { values } => DeclaredValues::String {
                values: values.iter().map(|v| v.to_lowercase()).collect(),
            },
        };
        Self {
            name: property.name.clone(),
            values,
        }
    }
}

/// Components active for one state (or unconditionally).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSet {
    pub geometry: String,
    /// Face slot (`*`, `north`, ...) to material.
    pub material_instances: BTreeMap<String, MaterialInstance>,
    pub transformation: Transformation,
    pub collision_box: BoxRegion,
    pub selection_box: BoxRegion,
    pub light_emission: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialInstance {
    pub texture: String,
    pub render_method: String,
    pub face_dimming: bool,
    pub ambient_occlusion: bool,
}

/// Whole-block rotation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub rotation: [i32; 3],
}

/// A box in target pixel units, origin at the bottom-face center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRegion {
    pub origin: [f32; 3],
    pub size: [f32; 3],
}

impl BoxRegion {
    /// Marks an empty shape.
    pub const EMPTY: BoxRegion = BoxRegion {
        origin: [0.0, 0.0, 0.0],
        size: [0.0, 0.0, 0.0],
    };

    /// Convert shape bounds in block units. `None` is an empty shape.
    pub fn from_shape(shape: Option<&Aabb>) -> Self {
        let Some(shape) = shape else {
            return Self::EMPTY;
        };
        let [dx, dy, dz] = shape.dimensions();
        if dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
            return Self::EMPTY;
        }

        let [min_x, min_y, min_z] = shape.min;
        Self {
            origin: [
                (min_x * 16.0 - 8.0) as f32,
                (min_y * 16.0) as f32,
                (min_z * 16.0 - 8.0) as f32,
            ],
            size: [(dx * 16.0) as f32, (dy * 16.0) as f32, (dz * 16.0) as f32],
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Components selected by a runtime condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permutation {
    pub condition: String,
    pub components: ComponentSet,
}

/// Origin-side metadata attached to one registered state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateOverride {
    /// Identifier of the registered block.
    pub block: String,
    pub state: StateValues,
    pub java: JavaStateOverride,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaStateOverride {
    /// Full state string, e.g. `mymod:lamp[lit=true]`.
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_id: Option<u32>,
    pub block_hardness: f32,
    /// Drops without the correct tool. The negation of the origin's
    /// tool requirement.
    pub can_break_with_hand: bool,
    pub waterlogged: bool,
    pub pick_item: String,
    /// Collision boxes in block units; empty for no collision.
    pub collision: Vec<Aabb>,
}
