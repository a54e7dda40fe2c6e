pub mod naming;
pub mod serde_helpers;

pub use naming::{camel_case, env_var_name, kebab_case, screaming_snake_case};
