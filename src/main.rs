use clap::Parser;
use reshelf::cli::{Cli, run};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        reshelf::output::error(&e);
        std::process::exit(1);
    }
}
