//! The binary only invokes `cli::run()` and turns errors into an exit code.
//! See `cli/mod.rs` for the command line behavior.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
