use clap::Parser;
use finanalytica::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
