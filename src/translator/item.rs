//! Item translation: metadata, block links and flat icons.

use super::{display_text, Bridge, TextureKind, TranslationUnit};
use crate::catalog::ItemEntry;
use crate::error::Result;
use crate::registry::{CreativeCategory, ItemDefinition, TargetRegistry};
use crate::resolver::resolve_texture_alias;
use crate::resource_pack::{item_asset_path, AssetSource, ItemAsset};
use crate::types::ResourceLocation;
use tracing::{debug, warn};

/// Parent of flat item models.
const GENERATED_MODEL: &str = "minecraft:item/generated";
/// Parent of flat item models held like tools.
const HANDHELD_MODEL: &str = "minecraft:item/handheld";

/// A flat icon resolved from an item model.
struct Icon {
    texture: ResourceLocation,
    handheld: bool,
}

impl<'a> Bridge<'a> {
    /// Translate and register one item. `Ok(None)` means the item was
    /// skipped without registering anything.
    pub(super) fn translate_item(
        &self,
        item: &ItemEntry,
        registry: &mut dyn TargetRegistry,
    ) -> Result<Option<TranslationUnit>> {
        let Some(display_model) = &item.display_model else {
            debug!(item = %item.id, "item has no display model, skipping");
            return Ok(None);
        };

        // A stock model needs no translation unless a mod overrides it.
        if display_model.is_default_namespace()
            && !self.bundled.contains(&item_asset_path(display_model))
        {
            debug!(item = %item.id, model = %display_model, "stock item model, skipping");
            return Ok(None);
        }

        let identifier = item.id.to_string();
        let display_name = display_text(item.display_name.as_ref(), &item.translation_key);
        let armor_type = item.equipment_slot.map(|slot| slot.armor_slot());
        if let Some(slot) = armor_type.as_ref().filter(|slot| !slot.is_supported()) {
            warn!(item = %item.id, slot = slot.as_str(), "equipment slot has no target equivalent");
        }

        let mut definition = ItemDefinition {
            name: identifier.clone(),
            identifier: identifier.clone(),
            display_name: display_name.clone(),
            creative_group: format!("itemGroup.{}.items", item.id.namespace()),
            creative_category: CreativeCategory::Construction,
            allow_offhand: true,
            edible: item.food.is_some() && item.consumable,
            can_always_eat: item.food.map(|food| food.can_always_eat).unwrap_or(false),
            foil: item.glint_override.unwrap_or(false),
            chargeable: item.kind.is_chargeable(),
            unbreakable: !item.damageable,
            armor_type,
            display_handheld: false,
            icon: String::new(),
            block: None,
            java_id: item.raw_id,
        };

        let mut unit = TranslationUnit::new();
        if let Some(block) = &item.block {
            definition.block = Some(block.to_string());
        } else {
            unit.add_translation(format!("item.{}.name", identifier), display_name);

            let Some(icon) = self.resolve_icon(item, display_model) else {
                return Ok(None);
            };
            if let Some(icon) = icon {
                unit.add_texture(identifier.clone(), &icon.texture, TextureKind::Item);
                definition.icon = identifier;
                definition.display_handheld = icon.handheld;
            }
        }

        registry.register_item(definition)?;
        Ok(Some(unit))
    }

    /// Find the flat icon for `display_model`.
    ///
    /// `None` skips the item: its asset or model is missing or not a plain
    /// model. `Some(None)` registers it without an icon because its model
    /// is not a flat archetype.
    fn resolve_icon(
        &self,
        item: &ItemEntry,
        display_model: &ResourceLocation,
    ) -> Option<Option<Icon>> {
        let Some(data) = self.source.read(&item_asset_path(display_model)) else {
            warn!(item = %item.id, asset = %display_model, "item asset not found, skipping");
            return None;
        };
        let asset: ItemAsset = match serde_json::from_slice(&data) {
            Ok(asset) => asset,
            Err(e) => {
                warn!(item = %item.id, error = %e, "failed to parse item asset, skipping");
                return None;
            }
        };
        let Some(model_id) = asset.basic_model() else {
            warn!(item = %item.id, "item asset is not a plain model, skipping");
            return None;
        };
        let model = match self.resolver().resolve_model(model_id) {
            Ok(Some(model)) => model,
            Ok(None) => {
                warn!(item = %item.id, model = %model_id, "item model not found, skipping");
                return None;
            }
            Err(e) => {
                warn!(item = %item.id, error = %e, "skipping item");
                return None;
            }
        };

        let parent = model.parent_location().map(|p| p.to_string());
        let handheld = match parent.as_deref() {
            Some(GENERATED_MODEL) => false,
            Some(HANDHELD_MODEL) => true,
            _ => {
                debug!(item = %item.id, model = %model_id, "unsupported icon model, no icon");
                return Some(None);
            }
        };

        match resolve_texture_alias(&model.textures, "layer0") {
            Some(texture) => Some(Some(Icon {
                texture: ResourceLocation::parse(&texture),
                handheld,
            })),
            None => {
                debug!(item = %item.id, model = %model_id, "icon model has no layer0, no icon");
                Some(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::bundled_store;
    use super::super::{BridgeConfig, TranslationOutput};
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::registry::{ArmorSlot, RecordingRegistry};
    use crate::resource_pack::ResourceStore;

    fn store_with_items() -> ResourceStore {
        let mut store = bundled_store();
        store.insert(
            "assets/mymod/items/ruby.json",
            br#"{ "model": { "type": "minecraft:model", "model": "mymod:item/ruby" } }"#.to_vec(),
        );
        store.insert(
            "assets/mymod/models/item/ruby.json",
            br#"{ "parent": "minecraft:item/generated", "textures": { "layer0": "mymod:item/ruby" } }"#
                .to_vec(),
        );
        store.insert(
            "assets/mymod/items/ruby_sword.json",
            br#"{ "model": { "type": "minecraft:model", "model": "mymod:item/ruby_sword" } }"#.to_vec(),
        );
        store.insert(
            "assets/mymod/models/item/ruby_sword.json",
            br#"{ "parent": "item/handheld", "textures": { "layer0": "mymod:item/ruby_sword" } }"#
                .to_vec(),
        );
        store.insert(
            "assets/mymod/items/ruby_shield.json",
            br#"{ "model": { "type": "minecraft:model", "model": "mymod:item/ruby_shield" } }"#.to_vec(),
        );
        store.insert(
            "assets/mymod/models/item/ruby_shield.json",
            br#"{ "parent": "builtin/entity" }"#.to_vec(),
        );
        store.insert(
            "assets/mymod/items/ruby_bow.json",
            br#"{ "model": { "type": "minecraft:condition", "property": "minecraft:using_item",
                  "on_true": { "type": "minecraft:model", "model": "mymod:item/ruby_bow_pulling" },
                  "on_false": { "type": "minecraft:model", "model": "mymod:item/ruby_bow" } } }"#
                .to_vec(),
        );
        store
    }

    fn run(bundled: &ResourceStore, json: &str) -> (TranslationOutput, RecordingRegistry) {
        let overlay = ResourceStore::new();
        let bridge = Bridge::new(&overlay, bundled, BridgeConfig::default());
        let catalog = StaticCatalog::from_json(json.as_bytes()).unwrap();
        let mut registry = RecordingRegistry::new();
        let output = bridge.translate(&catalog, &mut registry);
        (output, registry)
    }

    #[test]
    fn test_flat_icon_item() {
        let bundled = store_with_items();
        let (output, registry) = run(
            &bundled,
            r#"{ "items": [ { "id": "mymod:ruby", "translation_key": "item.mymod.ruby",
                 "display_name": "Ruby", "display_model": "mymod:ruby", "raw_id": 900,
                 "food": { "can_always_eat": true }, "consumable": true,
                 "glint_override": true } ] }"#,
        );

        let item = registry.item("mymod:ruby").unwrap();
        assert_eq!(item.icon, "mymod:ruby");
        assert!(!item.display_handheld);
        assert!(item.edible);
        assert!(item.can_always_eat);
        assert!(item.foil);
        assert!(item.unbreakable);
        assert!(!item.chargeable);
        assert_eq!(item.java_id, Some(900));
        assert!(item.block.is_none());

        let atlas = output.contents.atlas(TextureKind::Item).unwrap();
        assert_eq!(atlas["mymod:ruby"], "textures/items/ruby");
        assert_eq!(output.contents.translations["item.mymod:ruby.name"], "Ruby");
        assert!(output.textured_items.contains(&ResourceLocation::parse("mymod:ruby")));
        // Flat icons never produce geometry.
        assert!(output.contents.geometries.is_empty());
    }

    #[test]
    fn test_handheld_item() {
        let bundled = store_with_items();
        let (_, registry) = run(
            &bundled,
            r#"{ "items": [ { "id": "mymod:ruby_sword", "translation_key": "item.mymod.ruby_sword",
                 "display_model": "mymod:ruby_sword", "damageable": true,
                 "equipment_slot": "mainhand" } ] }"#,
        );

        let item = registry.item("mymod:ruby_sword").unwrap();
        assert!(item.display_handheld);
        assert!(!item.unbreakable);
        assert_eq!(item.armor_type, Some(ArmorSlot::MainHand));
        assert_eq!(item.display_name, "item.mymod.ruby_sword");
    }

    #[test]
    fn test_block_item_links_block() {
        let bundled = store_with_items();
        let (output, registry) = run(
            &bundled,
            r#"{ "items": [ { "id": "mymod:ruby_block", "translation_key": "block.mymod.ruby_block",
                 "display_model": "mymod:ruby_block", "block": "mymod:ruby_block" } ] }"#,
        );

        let item = registry.item("mymod:ruby_block").unwrap();
        assert_eq!(item.block.as_deref(), Some("mymod:ruby_block"));
        assert!(item.icon.is_empty());
        assert!(output.contents.atlas(TextureKind::Item).is_none());
        assert!(output.contents.textures.is_empty());
        assert!(output.textured_items.contains(&ResourceLocation::parse("mymod:ruby_block")));
    }

    #[test]
    fn test_unsupported_icon_archetype_registers_without_icon() {
        let bundled = store_with_items();
        let (output, registry) = run(
            &bundled,
            r#"{ "items": [ { "id": "mymod:ruby_shield", "translation_key": "item.mymod.ruby_shield",
                 "display_model": "mymod:ruby_shield", "equipment_slot": "saddle" } ] }"#,
        );

        let item = registry.item("mymod:ruby_shield").unwrap();
        assert!(item.icon.is_empty());
        assert_eq!(item.armor_type, Some(ArmorSlot::Unsupported("saddle".to_string())));
        assert!(output.contents.textures.is_empty());
    }

    #[test]
    fn test_skipped_items() {
        let bundled = store_with_items();
        let (output, registry) = run(
            &bundled,
            r#"{ "items": [
                { "id": "mymod:plain", "translation_key": "item.mymod.plain" },
                { "id": "mymod:stick_like", "translation_key": "item.mymod.stick_like",
                  "display_model": "minecraft:stick" },
                { "id": "mymod:ruby_bow", "translation_key": "item.mymod.ruby_bow",
                  "display_model": "mymod:ruby_bow", "kind": "bow" },
                { "id": "mymod:ruby", "translation_key": "item.mymod.ruby",
                  "display_model": "mymod:ruby" }
            ] }"#,
        );

        assert_eq!(output.stats.items_skipped, 3);
        assert_eq!(output.stats.items_translated, 1);
        assert_eq!(registry.items.len(), 1);
        assert_eq!(output.textured_items.len(), 1);
    }

    #[test]
    fn test_mod_provided_vanilla_model_is_translated() {
        let mut bundled = store_with_items();
        bundled.insert(
            "assets/minecraft/items/emerald.json",
            br#"{ "model": { "type": "minecraft:model", "model": "minecraft:item/emerald" } }"#.to_vec(),
        );
        bundled.insert(
            "assets/minecraft/models/item/emerald.json",
            br#"{ "parent": "minecraft:item/generated", "textures": { "layer0": "minecraft:item/emerald" } }"#
                .to_vec(),
        );

        let (_, registry) = run(
            &bundled,
            r#"{ "items": [ { "id": "mymod:gem", "translation_key": "item.mymod.gem",
                 "display_model": "minecraft:emerald" } ] }"#,
        );
        assert_eq!(registry.item("mymod:gem").unwrap().icon, "mymod:gem");
    }

    #[test]
    fn test_item_registration_failure_is_isolated() {
        let bundled = store_with_items();
        let (output, registry) = run(
            &bundled,
            r#"{ "items": [
                { "id": "mymod:ruby", "translation_key": "item.mymod.ruby", "display_model": "mymod:ruby" },
                { "id": "mymod:ruby", "translation_key": "item.mymod.ruby", "display_model": "mymod:ruby" },
                { "id": "mymod:ruby_sword", "translation_key": "item.mymod.ruby_sword",
                  "display_model": "mymod:ruby_sword" }
            ] }"#,
        );

        assert_eq!(output.stats.items_failed, 1);
        assert_eq!(output.stats.items_translated, 2);
        assert_eq!(registry.items.len(), 2);
    }
}
