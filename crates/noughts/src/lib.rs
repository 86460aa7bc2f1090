//! Terminal front end for noughts.
//!
//! Provides the command-line definition, TOML match configuration, a console
//! driver for interactive games, and batch computer-versus-computer play.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod console;
mod simulate;

pub use cli::{Cli, Command, MatchArgs};
pub use config::MatchConfig;
pub use console::Console;
pub use simulate::{Tally, simulate};
