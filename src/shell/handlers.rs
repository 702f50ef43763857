//! Command handlers
//!
//! Dispatches parsed shell commands to the store and renders replies.

use log::info;

use crate::error::FatError;
use crate::error::handlers::{error_to_reply_code, handle_error};
use crate::permissions::PermissionAction;
use crate::shell::commands::Command;
use crate::shell::session::Session;
use crate::system::FatSystem;

pub const OK: u16 = 200;
pub const LISTING: u16 = 211;
pub const HELP: u16 = 214;
pub const GOODBYE: u16 = 221;
pub const USER_SELECTED: u16 = 230;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const NOT_LOGGED_IN: u16 = 530;

const HELP_TEXT: &str = "Commands:
  USER <name>                       select (and register) the session user
  WHOAMI | USERS | LOGOUT
  LIST [ALL]                        list files, ALL includes the trash
  CREATE <name> <content>           \\n in content becomes a newline
  OPEN <name>
  WRITE <name> <content>
  TRASH <name> | RESTORE <name>
  GRANT <name> <user> <read|write>
  REVOKE <name> <user> <read|write>
  QUIT";

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseSession,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub code: u16,
    pub message: String,
}

impl CommandResult {
    fn success(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            code,
            message: message.into(),
        }
    }

    fn failure(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: CommandStatus::Failure(message.clone()),
            code,
            message,
        }
    }

    fn from_error(err: impl Into<FatError>) -> Self {
        let err = err.into();
        handle_error(&err);
        Self::failure(error_to_reply_code(&err), err.to_string())
    }

    /// Reply text as shown to the user
    pub fn render(&self) -> String {
        format!("{} {}", self.code, self.message)
    }
}

/// Dispatches a parsed command.
pub fn handle_command(
    session: &mut Session,
    fat: &mut FatSystem,
    command: &Command,
) -> CommandResult {
    match command {
        Command::Quit => CommandResult {
            status: CommandStatus::CloseSession,
            code: GOODBYE,
            message: "Goodbye".into(),
        },
        Command::Help => CommandResult::success(HELP, HELP_TEXT),
        Command::Unknown(raw) => CommandResult::failure(
            UNKNOWN_COMMAND,
            format!("Unknown or malformed command: {}", raw),
        ),
        Command::User(name) => handle_cmd_user(session, fat, name),
        Command::Whoami => match session.user() {
            Some(user) => CommandResult::success(OK, user),
            None => not_logged_in(),
        },
        Command::Users => CommandResult::success(LISTING, fat.users().users().join("\n")),
        Command::Logout => {
            if session.logout() {
                CommandResult::success(OK, "Logged out")
            } else {
                not_logged_in()
            }
        }
        Command::List { include_trashed } => handle_cmd_list(fat, *include_trashed),
        _ => {
            let Some(user) = session.user().map(str::to_string) else {
                return not_logged_in();
            };
            handle_file_command(fat, command, &user)
        }
    }
}

fn not_logged_in() -> CommandResult {
    CommandResult::failure(NOT_LOGGED_IN, "Not logged in. Use USER <name>")
}

fn handle_cmd_user(session: &mut Session, fat: &mut FatSystem, name: &str) -> CommandResult {
    match fat.register_user(name) {
        Ok(registered) => {
            let user = name.trim().to_lowercase();
            let message = if registered {
                format!("User {} registered and selected", user)
            } else {
                format!("Switched to user {}", user)
            };
            info!("Session user is now {}", user);
            session.set_user(user);
            CommandResult::success(USER_SELECTED, message)
        }
        Err(e) => CommandResult::from_error(e),
    }
}

fn handle_cmd_list(fat: &FatSystem, include_trashed: bool) -> CommandResult {
    let files = fat.list_files(include_trashed);
    if files.is_empty() {
        return CommandResult::success(LISTING, "No files");
    }
    let lines: Vec<String> = files.iter().map(|f| f.to_string()).collect();
    CommandResult::success(LISTING, lines.join("\n"))
}

fn handle_file_command(fat: &mut FatSystem, command: &Command, user: &str) -> CommandResult {
    match command {
        Command::Create { name, content } => match fat.create_file(name, content, user) {
            Ok(()) => CommandResult::success(OK, format!("File {} created", name)),
            Err(e) => CommandResult::from_error(e),
        },
        Command::Open(name) => match fat.open_file(name, user) {
            Ok(opened) => {
                let mut message = format!("{}\n---\n{}", opened.metadata, opened.content);
                if !opened.complete {
                    message.push_str("\n--- (chain broken, content may be incomplete)");
                }
                CommandResult::success(OK, message)
            }
            Err(e) => CommandResult::from_error(e),
        },
        Command::Write { name, content } => match fat.modify_file(name, content, user) {
            Ok(()) => CommandResult::success(OK, format!("File {} modified", name)),
            Err(e) => CommandResult::from_error(e),
        },
        Command::Trash(name) => match fat.trash_file(name, user) {
            Ok(()) => CommandResult::success(OK, format!("File {} moved to the trash", name)),
            Err(e) => CommandResult::from_error(e),
        },
        Command::Restore(name) => match fat.restore_file(name, user) {
            Ok(()) => CommandResult::success(OK, format!("File {} restored", name)),
            Err(e) => CommandResult::from_error(e),
        },
        Command::Permission {
            action,
            name,
            target,
            kind,
        } => match fat.set_permission(name, target, *kind, *action, user) {
            Ok(()) => {
                let verb = match action {
                    PermissionAction::Grant => "granted to",
                    PermissionAction::Revoke => "revoked from",
                };
                CommandResult::success(OK, format!("'{}' on {} {} {}", kind, name, verb, target))
            }
            Err(e) => CommandResult::from_error(e),
        },
        other => {
            CommandResult::failure(UNKNOWN_COMMAND, format!("Unsupported command: {:?}", other))
        }
    }
}
