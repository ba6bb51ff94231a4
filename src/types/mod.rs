//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{Axis, Direction, FaceSlot};
pub use transform::{invert_angle, invert_offset, to_target_space, ElementRotation};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace assumed when a location omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced resource location, e.g. `minecraft:block/stone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse `namespace:path`, defaulting the namespace to `minecraft`.
    pub fn parse(location: &str) -> Self {
        let (namespace, path) = parse_resource_location(location);
        Self::new(namespace, path)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this location lives in the vanilla namespace.
    pub fn is_default_namespace(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }

    /// Dotted form used for Bedrock identifiers and file names.
    /// "mymod:block/ruby_ore" -> "mymod.block.ruby_ore"
    pub fn dotted(&self) -> String {
        format!("{}.{}", self.namespace, self.path.replace('/', "."))
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl From<String> for ResourceLocation {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ResourceLocation {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ResourceLocation> for String {
    fn from(value: ResourceLocation) -> Self {
        value.to_string()
    }
}

/// Parse a resource location into namespace and path.
/// "minecraft:block/stone" -> ("minecraft", "block/stone")
/// "block/stone" -> ("minecraft", "block/stone")
pub fn parse_resource_location(resource_location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = resource_location.split_once(':') {
        (namespace, path)
    } else {
        (DEFAULT_NAMESPACE, resource_location)
    }
}

/// An axis-aligned box in block units (0.0 to 1.0 for a full block).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// A full 1x1x1 block.
    pub fn full_block() -> Self {
        Self::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    pub fn dimensions(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
