use super::ResolvedFacts;
use crate::parser::mentions_option;
use crate::schema::builtins::{CONFIG_PATH, CWD};
use crate::utils::kebab_case;
use std::path::Path;

/// Merge probed facts into the original tokens.
///
/// A fact is added only when the invocation did not set that option itself.
/// Added flags go before a `--` separator so they stay flags.
pub fn reconcile(tokens: &[String], facts: &ResolvedFacts) -> Vec<String> {
    let mut added = Vec::new();
    push_fact(&mut added, tokens, CWD, facts.cwd.as_deref());
    push_fact(&mut added, tokens, CONFIG_PATH, facts.config_path.as_deref());

    if added.is_empty() {
        return tokens.to_vec();
    }

    let split = tokens.iter().position(|t| t == "--").unwrap_or(tokens.len());
    let mut merged = Vec::with_capacity(tokens.len() + added.len());
    merged.extend_from_slice(&tokens[..split]);
    merged.extend(added);
    merged.extend_from_slice(&tokens[split..]);
    merged
}

fn push_fact(added: &mut Vec<String>, tokens: &[String], name: &str, value: Option<&Path>) {
    if let Some(value) = value {
        if mentions_option(tokens, name) {
            tracing::debug!("Keeping explicit --{} over the probed {:?}", kebab_case(name), value);
        } else {
            added.push(format!("--{}", kebab_case(name)));
            added.push(value.to_string_lossy().into_owned());
        }
    }
}
