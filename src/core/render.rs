use crate::core::markup::{head_script_props, with_context, JsonLd};
use crate::core::serializer::SafeSerializer;
use crate::core::{ConfigProvider, OutputFormat, Storage, Value};
use crate::utils::error::Result;
use tracing::{debug, info};

/// Reads a raw JSON item, renders it as configured, and writes the result.
pub struct RenderEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RenderEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Returns the number of bytes written.
    pub fn run(&self) -> Result<usize> {
        let raw = self.storage.read_input()?;
        debug!("Read {} bytes of input", raw.len());

        let rendered = render_item(&raw, &self.config)?;

        self.storage.write_output(rendered.as_bytes())?;
        info!(
            "Rendered {} bytes as {:?}",
            rendered.len(),
            self.config.output_format()
        );
        Ok(rendered.len())
    }
}

/// Parses `raw` as JSON, applies the default `@context`, and renders it in
/// the configured output format.
pub fn render_item(raw: &[u8], config: &impl ConfigProvider) -> Result<String> {
    let json: serde_json::Value = serde_json::from_slice(raw)?;
    let mut item = Value::from(json);

    if let Some(context) = config.default_context() {
        item = with_context(item, context)?;
    }

    let indent = config.indent();
    let rendered = match config.output_format() {
        OutputFormat::Json => SafeSerializer::new()
            .with_indent(indent)
            .serialize(&item)?
            .into_string(),
        OutputFormat::Script => JsonLd::new(item).with_indent(indent).render()?,
        OutputFormat::Helmet => serde_json::to_string_pretty(&head_script_props(&item, &indent)?)?,
    };
    Ok(rendered)
}
