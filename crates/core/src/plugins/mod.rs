//! Plugin loading
//!
//! Plugins come from two sources: modules discovered by naming convention
//! (`<tool>-*`) and modules requested explicitly through `--plugins` or the
//! config file. Both land in one [`PluginRegistry`].

pub mod loader;
pub mod registry;

pub use loader::PluginLoader;
pub use registry::PluginRegistry;
