//! Translation of a merged schema into a `clap::Command`

use crate::schema::builtins::POSITIONAL;
use crate::schema::{MergedSchema, OptionGroup, OptionKind};
use crate::utils::kebab_case;
use clap::{Arg, ArgAction, Command};
use std::collections::HashSet;

/// A clap command plus the option names it actually declares
pub struct Grammar {
    pub command: Command,
    pub declared: HashSet<String>,
}

/// Heading built-in and tool options are listed under in help output
pub const GENERAL_HEADING: &str = "OPTIONS";

/// Heading plugin options are grouped under in help output
pub fn plugin_heading(id: &str) -> String {
    format!("[+] {} Options", kebab_case(id))
}

/// Build the clap grammar for `schema`.
///
/// Each option gets a kebab-case long flag and, when it differs, its schema
/// name as an alias (`--config-path` / `--configPath`). Value-taking options
/// accept negative numbers (`--arg -5`). Two options whose
/// spellings clash keep the first one; the second is logged and skipped.
pub fn build_grammar(tool: &str, schema: &MergedSchema, usage: Option<&str>) -> Grammar {
    let mut command = Command::new(tool.to_string())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true);
    if let Some(usage) = usage {
        command = command.override_usage(usage.to_string());
    }

    let mut spellings: HashSet<String> = HashSet::new();
    let mut declared = HashSet::new();

    for (name, entry) in schema.iter() {
        if name == POSITIONAL {
            continue;
        }
        let long = kebab_case(name);
        if spellings.contains(&long) || spellings.contains(name) {
            tracing::warn!("Option '{}' clashes with an existing flag spelling; ignoring it", name);
            continue;
        }

        let mut arg = Arg::new(name.to_string()).long(long.clone());
        spellings.insert(long.clone());
        if long != name {
            arg = arg.visible_alias(name.to_string());
            spellings.insert(name.to_string());
        }
        if let Some(description) = &entry.descriptor.description {
            arg = arg.help(description.clone());
        }
        arg = match entry.descriptor.kind {
            OptionKind::Boolean => arg.action(ArgAction::SetTrue),
            OptionKind::String => arg.action(ArgAction::Set).num_args(1).allow_negative_numbers(true),
            OptionKind::StringArray => arg
                .action(ArgAction::Append)
                .num_args(1..)
                .allow_negative_numbers(true),
        };
        arg = match &entry.group {
            OptionGroup::General => arg.help_heading(GENERAL_HEADING),
            OptionGroup::Plugin(id) => arg.help_heading(plugin_heading(id)),
        };

        command = command.arg(arg);
        declared.insert(name.to_string());
    }

    command = command.arg(
        Arg::new(POSITIONAL)
            .num_args(1..)
            .action(ArgAction::Append)
            .hide(true),
    );

    Grammar { command, declared }
}
