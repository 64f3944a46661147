use crate::domain::model::{Indent, OutputFormat};
use crate::utils::error::Result;

/// Where the raw item is read from and the rendered payload is written to.
pub trait Storage {
    fn read_input(&self) -> Result<Vec<u8>>;
    fn write_output(&self, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn indent(&self) -> Indent;
    fn output_format(&self) -> OutputFormat;
    /// `@context` to add to items that do not carry one.
    fn default_context(&self) -> Option<&str>;
    fn output_path(&self) -> Option<&str>;
}
