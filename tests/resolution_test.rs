//! End-to-end resolution through the `Pawn` facade

use pawn::services::{ManifestModuleResolver, StaticModuleResolver, VirtualEnvironment};
use pawn::{
    Environment, FlagBag, OptionDescriptor, OptionSchema, Outcome, Pawn, Plugin, Program, Session,
};
use serde_json::json;
use std::any::Any;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Program that keeps every session it is handed
#[derive(Clone, Default)]
struct Capture {
    sessions: Arc<Mutex<Vec<Session>>>,
}

impl Capture {
    fn last(&self) -> Session {
        self.sessions.lock().unwrap().last().cloned().unwrap()
    }
}

impl Program for Capture {
    fn options(&self) -> OptionSchema {
        OptionSchema::new().with("arg", OptionDescriptor::string())
    }

    fn execute(&self, session: &Session) -> anyhow::Result<()> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }
}

#[derive(Debug)]
struct Module(&'static str);

impl Plugin for Module {
    fn options(&self) -> Option<OptionSchema> {
        Some(OptionSchema::new().with("test", OptionDescriptor::string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn run(pawn: &Pawn, args: &[&str], env: &mut VirtualEnvironment) -> Session {
    match pawn.execute(args.to_vec(), env).unwrap() {
        Outcome::Executed(session) => session,
        other => panic!("expected execution, got {other:?}"),
    }
}

fn modules() -> StaticModuleResolver {
    StaticModuleResolver::new()
        .with_module("pawn-module", Module("convention"))
        .with_module("pawn-other-module", Module("convention"))
        .with_module("other-module", Module("explicit"))
}

#[test]
fn test_working_directory_untouched_without_cwd() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default());
    let mut env = VirtualEnvironment::new(temp.path());

    run(&pawn, &["--arg", "x", "positional"], &mut env);
    assert_eq!(env.current_dir().unwrap(), temp.path());
}

#[test]
fn test_cwd_applies_before_config_path() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("custom.toml"), "arg = \"from-project\"\n").unwrap();

    let capture = Capture::default();
    let pawn = Pawn::new("pawn", capture.clone());
    let mut env = VirtualEnvironment::new(temp.path());

    let session = run(&pawn, &["--cwd", "project", "--config-path", "custom.toml"], &mut env);

    assert_eq!(env.current_dir().unwrap(), project);
    assert_eq!(session.option_str("arg"), Some("from-project"));
}

#[test]
fn test_precedence_law() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pawnfile.json"), r#"{"arg": "config"}"#).unwrap();
    let pawn = Pawn::new("pawn", Capture::default());
    let mut env = VirtualEnvironment::new(temp.path()).with_var("PAWN_ARG", "env");

    assert_eq!(run(&pawn, &["--arg", "cli"], &mut env).option_str("arg"), Some("cli"));
    assert_eq!(run(&pawn, &[], &mut env).option_str("arg"), Some("config"));

    fs::remove_file(temp.path().join("pawnfile.json")).unwrap();
    assert_eq!(run(&pawn, &[], &mut env).option_str("arg"), Some("env"));

    env.remove_var("PAWN_ARG");
    assert_eq!(run(&pawn, &[], &mut env).option("arg"), None);
}

#[test]
fn test_default_config_scenario() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pawnfile.json"), r#"{"arg": "value"}"#).unwrap();
    let pawn = Pawn::new("pawn", Capture::default());
    let mut env = VirtualEnvironment::new(temp.path());

    assert_eq!(run(&pawn, &[], &mut env).option_str("arg"), Some("value"));
}

#[test]
fn test_environment_variable_scenario() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default());
    let mut env = VirtualEnvironment::new(temp.path()).with_var("PAWN_ARG", "value");

    assert_eq!(run(&pawn, &[], &mut env).option_str("arg"), Some("value"));
}

#[test]
fn test_custom_config_path_scenario() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("x/custompawnfile.json");
    fs::create_dir_all(config.parent().unwrap()).unwrap();
    fs::write(&config, r#"{"custom": "value"}"#).unwrap();
    let pawn = Pawn::new("pawn", Capture::default());
    let mut env = VirtualEnvironment::new(temp.path());

    let path = config.to_string_lossy().into_owned();
    let session = run(&pawn, &["--configPath", &path], &mut env);
    assert_eq!(session.option_str("custom"), Some("value"));
}

#[test]
fn test_broken_config_is_ignored() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pawnfile.json"), "{ not json").unwrap();
    let pawn = Pawn::new("pawn", Capture::default());
    let mut env = VirtualEnvironment::new(temp.path());

    assert_eq!(run(&pawn, &["--arg", "ok"], &mut env).option_str("arg"), Some("ok"));
}

#[test]
fn test_internal_keys_never_reach_session() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pawnfile.json"), r#"{"plugins": []}"#).unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());

    let dir = temp.path().to_string_lossy().into_owned();
    let session = run(
        &pawn,
        &["pos", "--cwd", &dir, "--configPath", "pawnfile.json", "--plugins", "other-module"],
        &mut env,
    );

    for key in pawn::schema::INTERNAL_KEYS {
        assert!(session.option(key).is_none(), "{key} leaked");
    }
    assert_eq!(session.args, vec!["pos"]);
}

#[test]
fn test_explicit_and_convention_plugins_scenario() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());

    let session = run(&pawn, &["--plugins", "other-module"], &mut env);

    assert!(session.plugins.contains("module"));
    assert!(session.plugins.contains("otherModule"));
}

#[test]
fn test_plugin_merge_law() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());

    let without = run(&pawn, &[], &mut env);
    assert_eq!(without.plugins.get_as::<Module>("otherModule").map(|m| m.0), Some("convention"));

    let with = run(&pawn, &["--plugins", "other-module"], &mut env);
    assert_eq!(with.plugins.get_as::<Module>("otherModule").map(|m| m.0), Some("explicit"));
}

#[test]
fn test_plugin_options_are_parsed() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path()).with_var("PAWN_TEST", "env");

    let session = run(&pawn, &["--test", "value"], &mut env);
    assert_eq!(session.option_str("test"), Some("value"));

    let session = run(&pawn, &[], &mut env);
    assert_eq!(session.option_str("test"), Some("env"));
}

#[test]
fn test_resolution_is_idempotent() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("pawnfile.json"), r#"{"arg": "value", "extra": [1, 2]}"#).unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());
    let args = ["--cwd", ".", "--plugins", "other-module", "--test", "t"];

    let first = run(&pawn, &args, &mut env);
    let second = run(&pawn, &args, &mut env);

    assert_eq!(first.options, second.options);
    assert_eq!(first.plugins.ids().collect::<Vec<_>>(), second.plugins.ids().collect::<Vec<_>>());
}

#[test]
fn test_flag_bag_input() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());

    let flags = FlagBag::new()
        .with("_", json!(["build"]))
        .with("arg", "value")
        .with("plugins", json!(["other-module"]))
        .with("test", "x");
    let outcome = pawn.execute(flags, &mut env).unwrap();

    match outcome {
        Outcome::Executed(session) => {
            assert_eq!(session.args, vec!["build"]);
            assert_eq!(session.option_str("arg"), Some("value"));
            assert_eq!(session.option_str("test"), Some("x"));
        }
        other => panic!("expected execution, got {other:?}"),
    }
}

#[test]
fn test_manifest_plugins_from_directory() {
    let temp = TempDir::new().unwrap();
    let plugins = temp.path().join(".pawn/plugins");
    fs::create_dir_all(&plugins).unwrap();
    fs::write(plugins.join("pawn-banner.toml"), "[options.banner]\ntype = \"string\"\n").unwrap();
    fs::write(
        temp.path().join("extra.json"),
        r#"{"name": "my-extra", "options": {"shout": {"type": "boolean"}}}"#,
    )
    .unwrap();

    let pawn = Pawn::new("pawn", Capture::default())
        .with_module_resolver(ManifestModuleResolver::new(Path::new(".pawn/plugins")));
    let mut env = VirtualEnvironment::new(temp.path());

    let session = run(&pawn, &["--banner", "hi", "--plugins", "extra.json", "--shout"], &mut env);

    assert_eq!(session.plugins.ids().collect::<Vec<_>>(), vec!["banner", "myExtra"]);
    assert_eq!(session.option_str("banner"), Some("hi"));
    assert!(session.flag("shout"));
}

#[test]
fn test_negative_number_reaches_plugin_option() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());

    let session = run(&pawn, &["--arg", "-5", "--test", "-1.5"], &mut env);
    assert_eq!(session.option_str("arg"), Some("-5"));
    assert_eq!(session.option_str("test"), Some("-1.5"));
}

#[test]
fn test_failures_share_one_channel() {
    let temp = TempDir::new().unwrap();
    let pawn = Pawn::new("pawn", Capture::default()).with_module_resolver(modules());
    let mut env = VirtualEnvironment::new(temp.path());

    let parse = pawn.execute(vec!["--unknown"], &mut env).unwrap_err();
    assert!(matches!(parse, pawn::Error::ArgumentParse { .. }));

    let plugin = pawn.execute(vec!["--plugins", "nowhere"], &mut env).unwrap_err();
    assert!(matches!(plugin, pawn::Error::PluginLoad { .. }));

    let cwd = pawn.execute(vec!["--cwd", "missing-dir"], &mut env).unwrap_err();
    assert!(matches!(cwd, pawn::Error::WorkingDirectory { .. }));
}
