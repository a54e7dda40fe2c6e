//! Built-in options present in every parse pass

use super::{OptionDescriptor, OptionSchema};

pub const HELP: &str = "help";
pub const VERSION: &str = "version";
pub const CWD: &str = "cwd";
pub const CONFIG_PATH: &str = "configPath";
pub const PLUGINS: &str = "plugins";

/// Key under which positional arguments are reported by the parser
pub const POSITIONAL: &str = "_";
/// Program-name marker
pub const PROGRAM_NAME: &str = "$0";

/// Bookkeeping keys that never reach a session's `options`
pub const INTERNAL_KEYS: [&str; 7] = [POSITIONAL, PROGRAM_NAME, HELP, VERSION, CWD, CONFIG_PATH, PLUGINS];

pub fn is_internal_key(name: &str) -> bool {
    INTERNAL_KEYS.contains(&name)
}

pub fn builtin_options() -> OptionSchema {
    OptionSchema::new()
        .with(HELP, OptionDescriptor::boolean().with_description("Show this help."))
        .with(
            VERSION,
            OptionDescriptor::boolean().with_description("Print the global and local versions."),
        )
        .with(
            CWD,
            OptionDescriptor::string().with_description("Change the current working directory."),
        )
        .with(
            CONFIG_PATH,
            OptionDescriptor::string().with_description("Path to config file."),
        )
        .with(
            PLUGINS,
            OptionDescriptor::string_array().with_description("Additional plugins to include."),
        )
}
