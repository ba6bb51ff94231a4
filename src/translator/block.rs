//! Block translation: properties, permutations and state overrides.

use super::{display_text, Bridge, TextureKind, TranslationStats, TranslationUnit};
use crate::catalog::{BlockEntry, ModelEntry, StateEntry};
use crate::error::{BridgeError, Result};
use crate::geometry::{archetype_face_map, extract_texture_face_map, FaceBinding, FULL_BLOCK_GEOMETRY};
use crate::registry::{
    BlockDefinition, BoxRegion, ComponentSet, CreativeCategory, JavaStateOverride,
    MaterialInstance, Permutation, StateOverride, TargetRegistry, Transformation,
};
use crate::resolver::resolve_texture_alias;
use crate::resource_pack::{item_asset_path, AssetSource, ItemAsset, TextureRefMap};
use crate::types::{invert_offset, ResourceLocation};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Geometry and face bindings for one displayed model.
struct StateGeometry {
    identifier: String,
    bindings: Vec<FaceBinding>,
    textures: TextureRefMap,
}

impl<'a> Bridge<'a> {
    /// Translate one block and register it with all of its states.
    pub(super) fn translate_block(
        &self,
        block: &BlockEntry,
        registry: &mut dyn TargetRegistry,
        stats: &mut TranslationStats,
    ) -> Result<TranslationUnit> {
        let mut unit = TranslationUnit::new();
        unit.add_translation(
            format!("tile.{}.name", block.id),
            display_text(block.display_name.as_ref(), &block.translation_key),
        );

        let space = block.property_space();
        let mut definition = BlockDefinition {
            name: block.id.path().to_string(),
            namespace: block.id.namespace().to_string(),
            creative_group: format!("itemGroup.{}.blocks", block.id.namespace()),
            creative_category: CreativeCategory::Construction,
            included_in_creative_inventory: true,
            properties: block.properties.iter().map(Into::into).collect(),
            components: None,
            permutations: Vec::new(),
        };

        for state in &block.states {
            let state_id = state.state_string(&block.id);
            let (components, state_unit) = match self.translate_state(block, state) {
                Ok(Some(translated)) => translated,
                Ok(None) => {
                    stats.states_skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(state = %state_id, error = %e, "skipping block state");
                    stats.states_skipped += 1;
                    continue;
                }
            };

            match space.condition_for(&state.values) {
                Ok(None) => {
                    unit.merge(state_unit);
                    definition.components = Some(components);
                    break;
                }
                Ok(Some(condition)) => {
                    unit.merge(state_unit);
                    definition.permutations.push(Permutation {
                        condition,
                        components,
                    });
                }
                Err(e) => {
                    warn!(state = %state_id, error = %e, "skipping block state");
                    stats.states_skipped += 1;
                }
            }
        }

        let identifier = definition.identifier();
        registry.register_block(definition)?;

        for state in &block.states {
            registry.register_state_override(state_override(&identifier, block, state))?;
        }

        debug!(block = %block.id, states = block.states.len(), "registered block");
        Ok(unit)
    }

    /// Build the components for one state. `Ok(None)` means the state has
    /// no displayable model and was skipped.
    fn translate_state(
        &self,
        block: &BlockEntry,
        state: &StateEntry,
    ) -> Result<Option<(ComponentSet, TranslationUnit)>> {
        let Some(model) = self.select_model(block, state) else {
            warn!(
                state = %state.state_string(&block.id),
                "no model for block state, skipping"
            );
            return Ok(None);
        };

        let mut unit = TranslationUnit::new();
        let geometry = self.state_geometry(&model.model, &mut unit)?;

        let mut material_instances = BTreeMap::new();
        for binding in &geometry.bindings {
            let Some(texture) = resolve_texture_alias(&geometry.textures, &binding.texture_key)
            else {
                debug!(
                    model = %model.model,
                    texture = %binding.texture_key,
                    face = %binding.slot,
                    "unresolved texture, skipping face"
                );
                continue;
            };

            let texture = ResourceLocation::parse(&texture);
            let name = texture.to_string();
            unit.add_texture(name.clone(), &texture, TextureKind::Block);
            material_instances.insert(
                binding.slot.to_string(),
                MaterialInstance {
                    texture: name,
                    render_method: self.config.render_method.clone(),
                    face_dimming: state.opaque,
                    ambient_occlusion: state.opaque,
                },
            );
        }

        let components = ComponentSet {
            geometry: geometry.identifier,
            material_instances,
            transformation: Transformation {
                rotation: [invert_offset(model.x), invert_offset(model.y), 0],
            },
            collision_box: BoxRegion::from_shape(state.collision_shape.as_ref()),
            selection_box: BoxRegion::from_shape(state.outline_shape.as_ref()),
            light_emission: state.luminance,
        };
        Ok(Some((components, unit)))
    }

    /// The model shown for `state`, falling back to the block's item model
    /// when the state renders as air, a barrier or the empty model.
    fn select_model(&self, block: &BlockEntry, state: &StateEntry) -> Option<ModelEntry> {
        if state.models.is_empty() && block.textured_placeholder {
            return None;
        }
        if !state.needs_fallback() {
            return state.primary_model().cloned();
        }

        let item_model = block.item_model.as_ref()?;
        let data = self.source.read(&item_asset_path(item_model))?;
        let asset: ItemAsset = match serde_json::from_slice(&data) {
            Ok(asset) => asset,
            Err(e) => {
                warn!(item_model = %item_model, error = %e, "failed to parse item asset");
                return None;
            }
        };
        asset.basic_model().cloned().map(ModelEntry::new)
    }

    /// Convert `model`, or fall back to the full block geometry when the
    /// model inherits from a well-known cube archetype.
    fn state_geometry(
        &self,
        model: &ResourceLocation,
        unit: &mut TranslationUnit,
    ) -> Result<StateGeometry> {
        match self.transformer().convert(model) {
            Ok(result) => {
                let bindings = extract_texture_face_map(&result.elements);
                unit.add_geometry(result.file_stem, result.document);
                Ok(StateGeometry {
                    identifier: result.geometry_identifier,
                    bindings,
                    textures: result.textures,
                })
            }
            Err(e) => {
                let definition = self.resolver().resolve_model(model)?.ok_or_else(|| {
                    BridgeError::ModelResolution(format!("Model not found: {}", model))
                })?;
                let bindings = definition
                    .parent_location()
                    .and_then(|parent| archetype_face_map(&parent))
                    .ok_or(e)?;

                warn!(model = %model, "couldn't convert model, using full block geometry");
                Ok(StateGeometry {
                    identifier: FULL_BLOCK_GEOMETRY.to_string(),
                    bindings,
                    textures: definition.textures,
                })
            }
        }
    }
}

/// Origin-side metadata for one state.
fn state_override(identifier: &str, block: &BlockEntry, state: &StateEntry) -> StateOverride {
    StateOverride {
        block: identifier.to_string(),
        state: state
            .values
            .iter()
            .map(|(name, value)| (name.clone(), value.normalized()))
            .collect(),
        java: JavaStateOverride {
            identifier: state.state_string(&block.id),
            java_id: state.raw_id,
            block_hardness: state.hardness,
            can_break_with_hand: !state.tool_required,
            waterlogged: state.waterlogged(),
            pick_item: block.pick_item().to_string(),
            collision: state
                .collision_shape
                .iter()
                .filter(|shape| !BoxRegion::from_shape(Some(shape)).is_empty())
                .copied()
                .collect(),
        },
    }
}
