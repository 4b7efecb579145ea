use clap::Parser;
use std::process;

use coursetrack::cli;
use coursetrack::cli::commands::{Cli, Commands};

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output),
    };

    process::exit(exit_code);
}
