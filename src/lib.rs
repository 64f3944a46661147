//! Render JSON-LD structured data that is safe to embed in an HTML
//! `<script type="application/ld+json">` element.

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::markup::{
    head_script_props, with_context, HeadScriptProps, JsonLd, JSON_LD_MIME_TYPE,
    SCHEMA_ORG_CONTEXT,
};
pub use core::render::{render_item, RenderEngine};
pub use core::serializer::{escape_entities, serialize, SafeSerializer};
pub use domain::model::{Indent, OutputFormat, SerializedText, Value};
pub use utils::error::{JsonLdError, Result};
