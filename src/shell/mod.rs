//! Terminal shell
//!
//! Line-oriented front end over the FAT store: command parsing, session state,
//! command handlers and the read/reply loop.

pub mod commands;
pub mod handlers;
pub mod runner;
pub mod session;

pub use commands::{Command, parse_command};
pub use handlers::{CommandResult, CommandStatus, handle_command};
pub use runner::run_shell;
pub use session::Session;
