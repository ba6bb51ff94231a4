//! Convert Java model elements to Bedrock bones.

use super::{Bone, Cube, FaceUv, Geometry, GeometryDescription, GeometryFile};
use crate::error::{BridgeError, Result};
use crate::resolver::{resolve_texture_alias, ModelResolver};
use crate::resource_pack::texture::DEFAULT_TEXTURE_SIZE;
use crate::resource_pack::{
    texture_dimensions, texture_path, AssetSource, ModelElement, TextureRefMap,
};
use crate::types::{to_target_space, Direction, FaceSlot, ResourceLocation};
use std::collections::BTreeMap;
use tracing::debug;

/// Bedrock's built-in cube geometry.
pub const FULL_BLOCK_GEOMETRY: &str = "minecraft:geometry.full_block";

/// Texture slot bound to a Bedrock material-instance slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceBinding {
    /// Texture map key, without the leading `#`.
    pub texture_key: String,
    pub slot: FaceSlot,
}

impl FaceBinding {
    fn new(texture_key: &str, slot: FaceSlot) -> Self {
        Self {
            texture_key: texture_key.to_string(),
            slot,
        }
    }
}

/// A converted model.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Identifier the block components reference, e.g. `geometry.mymod.block.ruby`.
    pub geometry_identifier: String,
    /// File name stem under `models/blocks/`, e.g. `mymod.block.ruby`.
    pub file_stem: String,
    pub document: GeometryFile,
    /// The resolved Java elements the bones were built from.
    pub elements: Vec<ModelElement>,
    /// Texture map accumulated along the parent chain.
    pub textures: TextureRefMap,
}

/// Converts Java models into Bedrock geometry documents.
pub struct GeometryTransformer<'a> {
    source: &'a dyn AssetSource,
    resolver: ModelResolver<'a>,
    format_version: String,
}

impl<'a> GeometryTransformer<'a> {
    pub fn new(source: &'a dyn AssetSource, format_version: impl Into<String>) -> Self {
        Self {
            source,
            resolver: ModelResolver::new(source),
            format_version: format_version.into(),
        }
    }

    /// Load `location`, resolve its elements and build a geometry document.
    pub fn convert(&self, location: &ResourceLocation) -> Result<ConversionResult> {
        let model = self.resolver.resolve_model(location)?.ok_or_else(|| {
            BridgeError::ModelResolution(format!("Model not found: {}", location))
        })?;

        let resolved = self.resolver.resolve_elements(&model).ok_or_else(|| {
            BridgeError::Conversion(format!("No elements resolved for {}", location))
        })?;

        let bones = resolved
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| element_to_bone(index, element))
            .collect::<Vec<_>>();

        let (texture_width, texture_height) = self
            .texture_size(model.textures.keys(), &resolved.textures)
            .or_else(|| self.texture_size(resolved.textures.keys(), &resolved.textures))
            .unwrap_or(DEFAULT_TEXTURE_SIZE);
        let file_stem = location.dotted();
        let geometry_identifier = format!("geometry.{}", file_stem);

        let document = GeometryFile::single(
            self.format_version.clone(),
            Geometry {
                description: GeometryDescription {
                    identifier: geometry_identifier.clone(),
                    texture_width,
                    texture_height,
                },
                bones,
            },
        );

        Ok(ConversionResult {
            geometry_identifier,
            file_stem,
            document,
            elements: resolved.elements,
            textures: resolved.textures,
        })
    }

    /// Dimensions of the first readable non-particle texture among `keys`,
    /// resolved through the merged map.
    fn texture_size<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k String>,
        textures: &TextureRefMap,
    ) -> Option<(u32, u32)> {
        for key in keys {
            if key == "particle" {
                continue;
            }
            let Some(path) = resolve_texture_alias(textures, key) else {
                continue;
            };
            let location = ResourceLocation::parse(&path);
            let Some(data) = self.source.read(&texture_path(&location)) else {
                continue;
            };
            match texture_dimensions(&data) {
                Ok(size) => return Some(size),
                Err(e) => debug!(texture = %location, error = %e, "unreadable texture"),
            }
        }
        None
    }
}

/// Build the bone for one element. The coordinate shift happens here and
/// nowhere else.
fn element_to_bone(index: usize, element: &ModelElement) -> Bone {
    let mut uv: BTreeMap<String, FaceUv> = element
        .faces
        .iter()
        .map(|(direction, face)| {
            let origin = face.uv_origin().unwrap_or([0.0, 0.0]);
            (direction.to_string(), FaceUv { uv: origin })
        })
        .collect();
    uv.insert(FaceSlot::All.to_string(), FaceUv { uv: [0.0, 0.0] });

    let cube = Cube {
        origin: to_target_space(element.from),
        size: element.size(),
        uv,
        inflate: 0.0,
    };

    let (pivot, rotation) = match &element.rotation {
        Some(rotation) => (rotation.target_pivot(), Some(rotation.target_rotation())),
        None => ([0.0, 0.0, 0.0], None),
    };

    Bone {
        name: format!("element_{}", index),
        pivot,
        rotation,
        cubes: vec![cube],
    }
}

/// Every explicitly textured face, as (texture key, face slot) pairs.
pub fn extract_texture_face_map(elements: &[ModelElement]) -> Vec<FaceBinding> {
    elements
        .iter()
        .flat_map(|element| {
            element.faces.iter().filter_map(|(direction, face)| {
                face.texture_key()
                    .map(|key| FaceBinding::new(key, (*direction).into()))
            })
        })
        .collect()
}

/// Static face bindings for well-known vanilla parent models.
///
/// Used when a model's elements cannot be resolved (typically because the
/// vanilla parent is not bundled) but its parent is one of these archetypes.
pub fn archetype_face_map(parent: &ResourceLocation) -> Option<Vec<FaceBinding>> {
    if !parent.is_default_namespace() {
        return None;
    }

    let side_faces = |side: &str| {
        [Direction::North, Direction::South, Direction::East, Direction::West]
            .into_iter()
            .map(|d| FaceBinding::new(side, d.into()))
            .collect::<Vec<_>>()
    };

    let bindings = match parent.path() {
        "block/cube_all" => vec![FaceBinding::new("all", FaceSlot::All)],
        "block/cross" => vec![FaceBinding::new("cross", FaceSlot::All)],
        "block/cube_bottom_top" => {
            let mut bindings = vec![
                FaceBinding::new("side", FaceSlot::All),
                FaceBinding::new("top", Direction::Up.into()),
                FaceBinding::new("bottom", Direction::Down.into()),
            ];
            bindings.extend(side_faces("side"));
            bindings
        }
        "block/cube_column" | "block/cube_column_horizontal" => {
            let mut bindings = vec![
                FaceBinding::new("side", FaceSlot::All),
                FaceBinding::new("end", Direction::Up.into()),
                FaceBinding::new("end", Direction::Down.into()),
            ];
            bindings.extend(side_faces("side"));
            bindings
        }
        "block/orientable" => vec![
            FaceBinding::new("side", FaceSlot::All),
            FaceBinding::new("front", Direction::North.into()),
            FaceBinding::new("top", Direction::Up.into()),
            FaceBinding::new("bottom", Direction::Down.into()),
        ],
        _ => return None,
    };
    Some(bindings)
}
