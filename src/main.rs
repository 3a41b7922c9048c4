//! wrtpack CLI
//!
//! Usage: wrtpack [OPTIONS] [COMMAND]
//!
//! Commands:
//!   dist       Clean, transform assets and copy common files
//!   wgt        dist + widget package
//!   crx        dist + extension package
//!   install    wgt + deploy to the device and debug
//!   reinstall  install, replacing the old copy
//!   restart    Stop and start the installed application
//!   default    Same as wgt (also runs when no command is given)

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use wrtpack::config::{apply_overrides, load_or_default};
use wrtpack::presentation::{
    create_build_context, create_orchestrator, exit_code, render_failure, render_plan, render_run,
    Cli, OutputFormat, RunSummary, EXIT_FAILURE,
};
use wrtpack::WrtError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = OutputFormat::from_json_flag(cli.json);
    match run(&cli, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<WrtError>() {
                Some(wrt) => {
                    let code = exit_code(wrt);
                    match render_failure(format, wrt, code) {
                        Ok(rendered) if format == OutputFormat::Json => println!("{}", rendered),
                        Ok(rendered) => eprintln!("{}", rendered),
                        Err(_) => eprintln!("error: {}", wrt),
                    }
                    code
                }
                None => {
                    eprintln!("error: {:#}", err);
                    EXIT_FAILURE
                }
            };
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
/// `WRTPACK_LOG` overrides the level chosen by `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("WRTPACK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("wrtpack={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, format: OutputFormat) -> anyhow::Result<()> {
    let entry = cli.entry();
    let orchestrator = create_orchestrator()?;

    if cli.plan {
        let plan = orchestrator.plan(entry)?;
        println!("{}", render_plan(format, entry, &plan)?);
        return Ok(());
    }

    let root = std::env::current_dir().context("cannot determine the project directory")?;
    let (config, warnings) = load_or_default(&root, cli.config.as_deref())?;
    for warning in &warnings {
        warn!("{}", warning);
    }
    let config = apply_overrides(config, |key| std::env::var(key).ok())?;

    let mut context = create_build_context(config)?;
    let report = orchestrator.run(entry, &mut context)?;

    let summary = RunSummary::new(&report, context.artifacts()).with_device(
        context.session().state(),
        context.session().debug_url(),
    );
    println!("{}", render_run(format, &summary)?);
    Ok(())
}
