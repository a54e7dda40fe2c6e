//! Help and version text

use crate::parser::build_grammar;
use crate::schema::MergedSchema;

/// Usage line shown when neither the program nor the tool provides one
pub fn default_usage(tool: &str) -> String {
    format!("  {tool} [options]")
}

/// Full help text: usage, general options, then one group per plugin
pub fn help_text(tool: &str, schema: &MergedSchema, usage: &str) -> String {
    let grammar = build_grammar(tool, schema, Some(usage));
    let mut command = grammar.command.help_template("USAGE:\n{usage}\n\n{all-args}");
    command.render_help().to_string().trim_end().to_string()
}

/// `1.0.0`, or both versions when a local install is known
pub fn version_banner(global: &str, local: Option<&str>) -> String {
    match local {
        Some(local) => format!("CLI Version: {global}\nLocal Version: {local}"),
        None => global.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CollisionPolicy, OptionDescriptor, OptionGroup, OptionSchema};

    #[test]
    fn test_help_layout() {
        let tool = OptionSchema::new().with("arg", OptionDescriptor::string().with_description("An argument"));
        let plugin = OptionSchema::new().with("pretty", OptionDescriptor::boolean());
        let schema = MergedSchema::builtins()
            .extend(&tool, OptionGroup::General, CollisionPolicy::Override)
            .unwrap()
            .extend(&plugin, OptionGroup::Plugin("json".into()), CollisionPolicy::Override)
            .unwrap();

        let help = help_text("pawn", &schema, &default_usage("pawn"));

        assert!(help.starts_with("USAGE:\n  pawn [options]"), "{help}");
        let general = help.find("OPTIONS:").unwrap();
        let plugins = help.find("[+] json Options:").unwrap();
        assert!(general < plugins);
        assert!(help.contains("Show this help."));
        assert!(help.contains("An argument"));
        assert!(help.contains("--pretty"));
    }

    #[test]
    fn test_version_banner() {
        assert_eq!(version_banner("1.0.0", None), "1.0.0");
        assert_eq!(
            version_banner("1.0.0", Some("2.0.0")),
            "CLI Version: 1.0.0\nLocal Version: 2.0.0"
        );
    }
}
