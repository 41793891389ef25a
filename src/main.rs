//! iamgate CLI entry point.

use clap::Parser;

use iamgate::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = cli::run(cli) {
        cli::handle_error(&err, json_mode);
    }
}
