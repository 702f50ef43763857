//! Shell loop
//!
//! Reads commands line by line and writes one reply per command.

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::shell::commands::parse_command;
use crate::shell::handlers::{CommandStatus, handle_command};
use crate::shell::session::Session;
use crate::system::FatSystem;

pub const PROMPT: &str = "fat> ";

/// Runs the shell until QUIT or end of input.
pub async fn run_shell<R, W>(fat: &mut FatSystem, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new();
    let mut lines = reader.lines();

    writer
        .write_all(b"220 RAX FAT store ready. Type HELP for commands.\n")
        .await?;

    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            info!("End of input, closing shell");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = parse_command(&line);
        debug!("Command: {:?}", command);
        let result = handle_command(&mut session, fat, &command);

        writer.write_all(result.render().as_bytes()).await?;
        writer.write_all(b"\n").await?;

        if result.status == CommandStatus::CloseSession {
            break;
        }
    }

    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[tokio::test]
    async fn test_run_shell_script() {
        let mut fat = FatSystem::open(&StoreConfig::volatile(5)).unwrap();
        let script = b"USER alice\nCREATE a.txt Hello World\n\nLIST\nQUIT\nCREATE b.txt never\n";
        let mut output = Vec::new();

        run_shell(&mut fat, &script[..], &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("220 "));
        assert!(output.contains("230 User alice registered and selected"));
        assert!(output.contains("211 a.txt (alice) - 11 chars"));
        assert!(output.contains("221 Goodbye"));
        assert!(fat.table().get("b.txt").is_none());
    }

    #[tokio::test]
    async fn test_run_shell_stops_at_eof() {
        let mut fat = FatSystem::open(&StoreConfig::volatile(5)).unwrap();
        let mut output = Vec::new();
        run_shell(&mut fat, &b"USERS"[..], &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("211 admin"));
    }
}
