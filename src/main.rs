use clap::Parser;
use stockman::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
