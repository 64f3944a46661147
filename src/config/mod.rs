pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{Indent, OutputFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "jsonld-safe")]
#[command(about = "Render JSON-LD items that are safe to embed in HTML script elements")]
pub struct CliConfig {
    /// JSON file holding the item; reads stdin when omitted
    #[arg(short, long)]
    pub input: Option<String>,

    /// File to write; writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Spaces per level (0-10) or a whitespace string such as a tab
    #[arg(long)]
    pub indent: Option<Indent>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// `@context` to add when the item has none
    #[arg(long)]
    pub context: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(skip)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fills every setting not given on the command line from `file`.
    pub fn merge_toml(&mut self, file: &toml_config::TomlConfig) -> Result<()> {
        if self.indent.is_none() {
            self.indent = file.resolve_indent()?;
        }
        if self.format.is_none() {
            self.format = file.resolve_format()?;
        }
        if self.context.is_none() {
            self.context = file.item.context.clone();
        }
        if self.output.is_none() {
            self.output = file.output.path.clone();
        }
        self.verbose |= file.verbose();
        self.json_logs = file.json_logs();
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn indent(&self) -> Indent {
        self.indent.clone().unwrap_or_default()
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn default_context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            validate_path("input", input)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        if let Some(context) = &self.context {
            validate_url("context", context)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;

    #[test]
    fn test_parse_cli_args() {
        let config = CliConfig::try_parse_from([
            "jsonld-safe",
            "--indent",
            "4",
            "--format",
            "script",
            "--context",
            "https://schema.org",
        ])
        .unwrap();

        assert_eq!(config.indent(), Indent::Spaces(4));
        assert_eq!(config.output_format(), OutputFormat::Script);
        assert_eq!(config.default_context(), Some("https://schema.org"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_whitespace_indent() {
        assert!(CliConfig::try_parse_from(["jsonld-safe", "--indent", "xx"]).is_err());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[output]
format = "helmet"
indent = 2
path = "./from-file.json"

[item]
context = "https://schema.org"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let mut config =
            CliConfig::try_parse_from(["jsonld-safe", "--format", "json", "-o", "cli.json"])
                .unwrap();
        config.merge_toml(&file).unwrap();

        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.output_path(), Some("cli.json"));
        assert_eq!(config.indent(), Indent::Spaces(2));
        assert_eq!(config.default_context(), Some("https://schema.org"));
        assert!(config.json_logs);
    }
}
