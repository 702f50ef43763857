//! Shell commands
//!
//! Parses one input line into a `Command`.

use crate::permissions::{PermissionAction, PermissionKind};

#[derive(Debug, PartialEq)]
pub enum Command {
    User(String),
    Whoami,
    Users,
    Logout,
    List { include_trashed: bool },
    Create { name: String, content: String },
    Open(String),
    Write { name: String, content: String },
    Trash(String),
    Restore(String),
    Permission {
        action: PermissionAction,
        name: String,
        target: String,
        kind: PermissionKind,
    },
    Help,
    Quit,
    Unknown(String),
}

/// Turns the two-character sequence `\n` into a newline.
fn unescape_content(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Splits `NAME REST...` into the name and the untouched remainder.
fn split_name(arg: &str) -> (&str, &str) {
    match arg.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (arg, ""),
    }
}

fn parse_permission(action: PermissionAction, arg: &str) -> Option<Command> {
    let mut parts = arg.split_whitespace();
    let name = parts.next()?;
    let target = parts.next()?;
    let kind = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Permission {
        action,
        name: name.to_string(),
        target: target.to_string(),
        kind,
    })
}

/// Parses a raw input line into the `Command` enum.
///
/// Known verbs with missing or malformed arguments parse as `Unknown`.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim_start();

    let parsed = match cmd.as_str() {
        "QUIT" | "Q" | "EXIT" => Some(Command::Quit),
        "HELP" | "?" => Some(Command::Help),
        "WHOAMI" => Some(Command::Whoami),
        "USERS" => Some(Command::Users),
        "LOGOUT" => Some(Command::Logout),
        "USER" | "LOGIN" if !arg.trim().is_empty() => Some(Command::User(arg.trim().to_string())),
        "LIST" | "LS" => match arg.trim().to_ascii_uppercase().as_str() {
            "" => Some(Command::List { include_trashed: false }),
            "ALL" | "-A" => Some(Command::List { include_trashed: true }),
            _ => None,
        },
        "CREATE" if !arg.trim().is_empty() => {
            let (name, content) = split_name(arg);
            Some(Command::Create {
                name: name.to_string(),
                content: unescape_content(content),
            })
        }
        "WRITE" | "EDIT" if !arg.trim().is_empty() => {
            let (name, content) = split_name(arg);
            Some(Command::Write {
                name: name.to_string(),
                content: unescape_content(content),
            })
        }
        "OPEN" | "CAT" if !arg.trim().is_empty() => Some(Command::Open(arg.trim().to_string())),
        "TRASH" | "RM" if !arg.trim().is_empty() => Some(Command::Trash(arg.trim().to_string())),
        "RESTORE" if !arg.trim().is_empty() => Some(Command::Restore(arg.trim().to_string())),
        "GRANT" => parse_permission(PermissionAction::Grant, arg),
        "REVOKE" => parse_permission(PermissionAction::Revoke, arg),
        _ => None,
    };

    parsed.unwrap_or_else(|| Command::Unknown(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("LIST"), Command::List { include_trashed: false });
        assert_eq!(parse_command("ls all"), Command::List { include_trashed: true });
        assert_eq!(parse_command("LOGOUT"), Command::Logout);
        assert_eq!(parse_command("whoami"), Command::Whoami);
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(parse_command("USER Alice"), Command::User("Alice".to_string()));
        assert_eq!(parse_command("OPEN a.txt"), Command::Open("a.txt".to_string()));
        assert_eq!(parse_command("TRASH a.txt"), Command::Trash("a.txt".to_string()));
        assert_eq!(parse_command("RESTORE a.txt"), Command::Restore("a.txt".to_string()));
        assert_eq!(
            parse_command("CREATE a.txt Hello  World"),
            Command::Create {
                name: "a.txt".to_string(),
                content: "Hello  World".to_string(),
            }
        );
        assert_eq!(
            parse_command("WRITE a.txt line1\\nline2"),
            Command::Write {
                name: "a.txt".to_string(),
                content: "line1\nline2".to_string(),
            }
        );
        assert_eq!(
            parse_command("GRANT a.txt bob read"),
            Command::Permission {
                action: PermissionAction::Grant,
                name: "a.txt".to_string(),
                target: "bob".to_string(),
                kind: PermissionKind::Read,
            }
        );
    }

    #[test]
    fn test_create_without_content_is_passed_through() {
        assert_eq!(
            parse_command("CREATE a.txt"),
            Command::Create {
                name: "a.txt".to_string(),
                content: String::new(),
            }
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(parse_command("INVALID"), Command::Unknown("INVALID".to_string()));
        assert_eq!(parse_command("USER"), Command::Unknown("USER".to_string()));
        assert_eq!(
            parse_command("GRANT a.txt bob execute"),
            Command::Unknown("GRANT a.txt bob execute".to_string())
        );
        assert_eq!(
            parse_command("LIST sideways"),
            Command::Unknown("LIST sideways".to_string())
        );
        assert_eq!(parse_command(""), Command::Unknown("".to_string()));
    }
}
