use anyhow::{Context, Result};
use pawn_core::services::ProcessEnvironment;
use pawn_core::{Environment, Error, Outcome};
use tracing::debug;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut env = ProcessEnvironment::new();
    let pawn = pawn_cli::build(env.current_exe());

    match pawn.run_from_cli(std::env::args().skip(1), &mut env) {
        Ok(Outcome::Help(text)) | Ok(Outcome::Version(text)) => println!("{text}"),
        Ok(Outcome::Executed(session)) => debug!("Executed with {} option(s)", session.options.len()),
        Ok(Outcome::Delegated { entry }) => debug!("Delegated to {}", entry.display()),
        Err(Error::DelegateExit { code, .. }) => std::process::exit(code.unwrap_or(1)),
        Err(e) => return Err(e).context("pawn failed"),
    }

    Ok(())
}
