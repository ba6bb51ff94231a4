//! Model inheritance and texture alias resolution.

use crate::error::{BridgeError, Result};
use crate::resource_pack::{model_path, AssetSource, ModelDefinition, ModelElement, TextureRefMap};
use crate::types::ResourceLocation;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Maximum depth for model inheritance to prevent infinite loops.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Elements of a model together with the texture map accumulated while
/// walking its parent chain.
#[derive(Debug, Clone)]
pub struct ResolvedElements {
    pub elements: Vec<ModelElement>,
    pub textures: TextureRefMap,
}

/// Loads models and walks their inheritance chains.
///
/// Nothing is cached: a resolver lives for one translation run and models
/// are read fresh from the source each time.
pub struct ModelResolver<'a> {
    source: &'a dyn AssetSource,
}

impl<'a> ModelResolver<'a> {
    pub fn new(source: &'a dyn AssetSource) -> Self {
        Self { source }
    }

    /// Load and parse a single model, without following its parent.
    ///
    /// A model no source provides is `Ok(None)`; one that exists but does
    /// not parse is an error.
    pub fn resolve_model(&self, location: &ResourceLocation) -> Result<Option<ModelDefinition>> {
        let Some(data) = self.source.read(&model_path(location)) else {
            return Ok(None);
        };

        serde_json::from_slice(&data).map(Some).map_err(|e| {
            BridgeError::ModelResolution(format!("Failed to parse model {}: {}", location, e))
        })
    }

    /// Walk the parent chain until a model declares `elements`.
    ///
    /// Texture maps of every visited model are merged into the result; an
    /// entry from a more-derived model is never replaced by an ancestor's.
    /// Returns `None` if a parent fails to load, the chain ends without
    /// elements, or the chain is cyclic.
    pub fn resolve_elements(&self, model: &ModelDefinition) -> Option<ResolvedElements> {
        let mut textures = model.textures.clone();
        let mut visited = HashSet::new();
        let mut current = model.clone();

        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Some(elements) = current.elements.take() {
                return Some(ResolvedElements { elements, textures });
            }

            let parent = current.parent_location()?;
            if parent.path().starts_with("builtin/") {
                debug!(parent = %parent, "builtin parent has no elements");
                return None;
            }
            if !visited.insert(parent.clone()) {
                warn!(parent = %parent, "circular model inheritance");
                return None;
            }

            current = match self.resolve_model(&parent) {
                Ok(Some(model)) => model,
                Ok(None) => {
                    debug!(parent = %parent, "parent model not found");
                    return None;
                }
                Err(e) => {
                    warn!(error = %e, "parent model unreadable");
                    return None;
                }
            };
            for (key, value) in &current.textures {
                textures
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }

        warn!(
            depth = MAX_INHERITANCE_DEPTH,
            "model inheritance too deep, giving up"
        );
        None
    }
}

/// Follow `#`-prefixed references from `key` to a literal texture path.
///
/// Returns `None` for a missing key, a dangling reference mid-chain, or a
/// cycle. `key` may be given with or without its leading `#`.
pub fn resolve_texture_alias(textures: &TextureRefMap, key: &str) -> Option<String> {
    let mut key = key.strip_prefix('#').unwrap_or(key);
    let mut seen = HashSet::new();

    loop {
        if !seen.insert(key) {
            return None;
        }
        let value = textures.get(key)?;
        match value.strip_prefix('#') {
            Some(next) => key = next,
            None => return Some(value.clone()),
        }
    }
}
