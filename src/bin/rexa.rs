//! Rexa CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;

use rexa::cli::args::*;
use rexa::cli::commands::*;

fn run(args: RexaArgs) -> anyhow::Result<()> {
    let command = format!("{:?}", args.command);
    execute_command(args).with_context(|| format!("command failed: {command}"))
}

fn main() {
    let args = RexaArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .parse_env("REXA_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
