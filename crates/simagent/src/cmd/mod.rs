use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod liability;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a liability exchange against a simserver.
    Liability(LiabilityArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Liability(args) => liability::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct LiabilityArgs {
    /// Server endpoint as host:port.
    #[arg(env = "SIMAGENT_ENDPOINT")]
    pub endpoint: String,
    /// Drone identifier.
    #[arg(long, env = "SIMAGENT_DRONE")]
    pub drone: String,
    /// Contract identifier.
    #[arg(long, env = "SIMAGENT_CONTRACT")]
    pub contract: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
