pub mod markup;
pub mod render;
pub mod serializer;

pub use crate::domain::model::{Indent, OutputFormat, SerializedText, Value};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
