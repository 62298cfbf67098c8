//! # CLI Behavior
//!
//! This is **one possible UI client** for notecraft. It is the only place that
//! knows about terminal I/O, exit codes, logging setup and output formatting.
//!
//! ## Data Directory
//!
//! Counters, the session id and `config.json` live in one directory:
//!
//! 1. `--data-dir <DIR>` or `NOTECRAFT_HOME`, when given.
//! 2. Otherwise the OS data directory (via the `directories` crate).
//!
//! ## Input
//!
//! `segment` reads `--file` when given, stdin otherwise. `preview` and `print`
//! take a JSON form file.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context wiring and per-command handlers
//! - `print`: Output formatting (messages, ids, lines)

mod commands;
mod print;
pub mod setup;

pub use commands::run;
