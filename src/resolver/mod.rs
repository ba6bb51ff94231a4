//! Model resolution.
//!
//! This module loads Java models by location, walks their inheritance
//! chains and resolves texture aliases.

pub mod model_resolver;

pub use model_resolver::{resolve_texture_alias, ModelResolver, ResolvedElements};
