//! Interactive terminal front-end: turns input lines into session events
//! and renders what the controller produces.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::agent::{SessionController, SessionStats};

/// Slash commands understood by the REPL, with their help text.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/reset", "Clear the conversation, your name and the counters"),
    ("/export [path]", "Save the conversation as plain text"),
    ("/stats", "Show session statistics"),
    ("/history", "Preview the conversation so far"),
    ("/help", "Show available commands"),
    ("/quit", "Leave the chat"),
];

const FAREWELL: &str = "\nGood luck in your games! ♟️\n";

/// One UI event parsed from an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Message(String),
    Reset,
    Export(Option<String>),
    Stats,
    History,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<ReplCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Some(ReplCommand::Message(trimmed.to_string()));
    };

    let (name, args) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "reset" | "clear" => ReplCommand::Reset,
        "export" | "download" => {
            ReplCommand::Export(Some(args.to_string()).filter(|a| !a.is_empty()))
        }
        "stats" => ReplCommand::Stats,
        "history" => ReplCommand::History,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(format!("/{name}")),
    };
    Some(command)
}

pub fn help_text() -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for (cmd, desc) in COMMANDS {
        lines.push(format!("  {cmd:<16} {desc}"));
    }
    lines.push("Anything else is sent as a chess question.".to_string());
    lines.join("\n")
}

pub fn render_stats(stats: &SessionStats) -> String {
    let mut lines = Vec::with_capacity(6);
    if let Some(name) = &stats.user_name {
        lines.push(format!("👤 User:             {name}"));
    }
    lines.push(format!("❓ Questions asked:  {}", stats.question_count));
    lines.push(format!("💬 Total messages:   {}", stats.message_count));
    lines.push(format!("🧠 Memory window:    {}", stats.memory_len));
    lines.push(format!(
        "🕐 Session started:  {}",
        stats
            .started_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
    ));
    lines.join("\n")
}

/// Where an export lands: an explicit path as given, otherwise the default
/// file name inside `export_dir` (or the working directory).
pub fn export_path(
    requested: Option<&str>,
    export_dir: Option<&Path>,
    default_name: &str,
) -> PathBuf {
    match requested {
        Some(path) => PathBuf::from(path),
        None => export_dir.map_or_else(|| PathBuf::from(default_name), |d| d.join(default_name)),
    }
}

async fn write_export(controller: &SessionController, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create export directory: {}", parent.display()))?;
    }
    tokio::fs::write(path, controller.export())
        .await
        .with_context(|| format!("Failed to write export: {}", path.display()))
}

/// Drive a session from line-oriented input until EOF or `/quit`.
pub async fn run<R, W>(
    controller: &mut SessionController,
    export_dir: Option<&Path>,
    reader: R,
    writer: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for message in controller.state().transcript() {
        writer.write_all(format!("{}\n\n", message.text()).as_bytes()).await?;
    }
    writer
        .write_all(b"Type /help for commands, /quit to leave.\n")
        .await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(b"\n> ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = parse_line(&line) else {
            continue;
        };

        let output = match command {
            ReplCommand::Quit => break,
            ReplCommand::Message(text) => {
                controller.handle_message(&text).await.text().to_string()
            }
            ReplCommand::Reset => {
                controller.reset();
                controller
                    .state()
                    .transcript()
                    .first()
                    .map_or_else(|| "Session cleared.".to_string(), |m| m.text().to_string())
            }
            ReplCommand::Export(requested) => {
                if controller.has_conversation() {
                    let path = export_path(
                        requested.as_deref(),
                        export_dir,
                        &controller.export_file_name(),
                    );
                    match write_export(controller, &path).await {
                        Ok(()) => format!("📥 Conversation saved to {}", path.display()),
                        Err(e) => {
                            tracing::warn!(error = %e, "Export failed");
                            format!("⚠️ Export failed: {e:#}")
                        }
                    }
                } else {
                    "Nothing to export yet. Ask a chess question first!".to_string()
                }
            }
            ReplCommand::Stats => render_stats(&controller.stats()),
            ReplCommand::History => {
                let preview = controller.history_preview();
                if preview.is_empty() {
                    "No messages yet. Start chatting!".to_string()
                } else {
                    preview.join("\n")
                }
            }
            ReplCommand::Help => help_text(),
            ReplCommand::Unknown(name) => {
                format!("Unknown command {name}. Type /help for the list.")
            }
        };

        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.write_all(FAREWELL.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
