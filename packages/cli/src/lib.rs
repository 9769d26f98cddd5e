//! # persistence-cli
//!
//! The `persist` command: read and write data sources from the shell.
//!
//! ```bash
//! persist json://data/players.json set players.notch.home 0,64,0
//! persist json://data/players.json get players.notch.home
//! persist readonly:ini://bundle.zip/defaults.ini keys
//! persist https:json://example.com/motd.json get motd
//! ```
//!
//! Relative file locations resolve against `--root` (or `PERSIST_ROOT`,
//! default: the current directory). Set `RUST_LOG=debug` to trace I/O.

pub mod commands;
pub mod context;

pub use commands::{execute, CliError, Command};
pub use context::open_store;
