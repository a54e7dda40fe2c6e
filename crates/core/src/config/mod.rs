//! Configuration sources layered under the command line

pub mod document;
pub mod loader;

pub use document::{read_document, DocumentFormat};
pub use loader::{default_config_name, ConfigLoader, ConfigObject};
