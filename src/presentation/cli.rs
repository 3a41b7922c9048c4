//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--verbose`, `--config`, `--plan`) are accepted
//! before or after the operation. Running without an operation is the same
//! as `wrtpack default`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::tasks::DEFAULT_ENTRY;

/// wrtpack - build, package and deploy web runtime applications
#[derive(Parser, Debug)]
#[command(name = "wrtpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print a JSON run report instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./wrtpack.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the resolved task plan and exit without running it
    #[arg(long, global = true)]
    pub plan: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Clean, transform assets and copy common files into the build dir
    Dist,
    /// dist, then assemble and archive the widget package
    Wgt,
    /// dist, then assemble the extension package
    Crx,
    /// wgt, then prepare the device, push, install and debug
    Install,
    /// Like install, but stop and uninstall the old copy first
    Reinstall,
    /// Stop and start the installed application
    Restart,
    /// Same as wgt
    Default,
}

impl Commands {
    /// Entry task this operation resolves from
    pub fn entry(&self) -> &'static str {
        match self {
            Commands::Dist => "dist",
            Commands::Wgt => "wgt",
            Commands::Crx => "crx",
            Commands::Install => "install",
            Commands::Reinstall => "reinstall",
            Commands::Restart => "restart",
            Commands::Default => DEFAULT_ENTRY,
        }
    }
}

impl Cli {
    pub fn entry(&self) -> &'static str {
        self.command.map(|c| c.entry()).unwrap_or(DEFAULT_ENTRY)
    }
}
