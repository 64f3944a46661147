use crate::core::ConfigProvider;
use crate::domain::model::{Indent, OutputFormat, MAX_INDENT};
use crate::utils::error::{JsonLdError, Result};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_range, validate_url, validate_whitespace, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub item: ItemConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub indent: Option<IndentSetting>,
    pub path: Option<String>,
}

/// `indent = 2` or `indent = "\t"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndentSetting {
    Width(u64),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemConfig {
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(JsonLdError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| JsonLdError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_CONTEXT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| JsonLdError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(context) = &self.item.context {
            validate_url("item.context", context)?;
        }

        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }

        if let Some(format) = &self.output.format {
            validate_one_of("output.format", format, &OutputFormat::NAMES)?;
        }

        match &self.output.indent {
            Some(IndentSetting::Width(width)) => {
                validate_range("output.indent", *width, 0, MAX_INDENT as u64)?
            }
            Some(IndentSetting::Text(text)) => validate_whitespace("output.indent", text)?,
            None => {}
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }

        Ok(())
    }

    pub fn resolve_indent(&self) -> Result<Option<Indent>> {
        match &self.output.indent {
            Some(IndentSetting::Width(width)) => {
                let width = usize::try_from(*width).unwrap_or(MAX_INDENT);
                Ok(Some(Indent::spaces(width)))
            }
            Some(IndentSetting::Text(text)) => Indent::text(text).map(Some),
            None => Ok(None),
        }
    }

    pub fn resolve_format(&self) -> Result<Option<OutputFormat>> {
        match &self.output.format {
            Some(name) => OutputFormat::from_name(name).map(Some).ok_or_else(|| {
                JsonLdError::InvalidConfigValueError {
                    field: "output.format".to_string(),
                    value: name.clone(),
                    reason: format!("Valid formats: {}", OutputFormat::NAMES.join(", ")),
                }
            }),
            None => Ok(None),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|format| format == "json")
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

// Accessors fall back to defaults for invalid values; call `validate` first.
impl ConfigProvider for TomlConfig {
    fn indent(&self) -> Indent {
        self.resolve_indent().ok().flatten().unwrap_or_default()
    }

    fn output_format(&self) -> OutputFormat {
        self.resolve_format().ok().flatten().unwrap_or_default()
    }

    fn default_context(&self) -> Option<&str> {
        self.item.context.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[output]
format = "script"
indent = 2
path = "./out/person.html"

[item]
context = "https://schema.org"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.output_format(), OutputFormat::Script);
        assert_eq!(config.indent(), Indent::Spaces(2));
        assert_eq!(config.default_context(), Some("https://schema.org"));
        assert_eq!(config.output_path(), Some("./out/person.html"));
        assert!(!config.json_logs());
    }

    #[test]
    fn test_text_indent_and_json_logging() {
        let toml_content = r#"
[output]
indent = "\t"

[logging]
format = "json"
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.indent(), Indent::text("\t").unwrap());
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.json_logs());
        assert!(config.verbose());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.indent(), Indent::Compact);
        assert_eq!(config.default_context(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JSONLD_SAFE_TEST_CONTEXT", "https://example.org/ctx");

        let toml_content = r#"
[item]
context = "${JSONLD_SAFE_TEST_CONTEXT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.item.context.as_deref(), Some("https://example.org/ctx"));

        std::env::remove_var("JSONLD_SAFE_TEST_CONTEXT");
    }

    #[test]
    fn test_config_validation() {
        let bad_context = TomlConfig::from_toml_str("[item]\ncontext = \"schema.org\"\n").unwrap();
        assert!(bad_context.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[output]\nformat = \"yaml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let wide_indent = TomlConfig::from_toml_str("[output]\nindent = 12\n").unwrap();
        assert!(wide_indent.validate().is_err());

        let text_indent = TomlConfig::from_toml_str("[output]\nindent = \"--\"\n").unwrap();
        assert!(text_indent.validate().is_err());

        let bad_logging = TomlConfig::from_toml_str("[logging]\nformat = \"pretty\"\n").unwrap();
        assert!(bad_logging.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[output\nformat = ").unwrap_err();
        assert!(matches!(err, JsonLdError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[output]
format = "helmet"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Helmet);
    }
}
