use clap::Parser;
use tradelog::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    dotenv::dotenv().ok();
    run(Cli::parse())
}
