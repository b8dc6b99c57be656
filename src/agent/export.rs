//! Plain-text transcript export.

use chrono::{DateTime, Local, Utc};

use super::session::SessionState;

const RULE_WIDTH: usize = 60;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

/// Render the full session transcript: a `#` header with the session
/// counters, a rule, then one numbered block per message in order.
pub fn render_transcript(state: &SessionState, exported_at: DateTime<Utc>) -> String {
    let header = format!(
        "# Chess Q&A Chatbot - Conversation History\n\
         # Session Started: {}\n\
         # User: {}\n\
         # Total Questions: {}\n\
         # Total Messages: {}\n\
         # Export Time: {}\n\n\
         {}\n\n",
        local_time(state.started_at()),
        state.user_name().unwrap_or("Anonymous"),
        state.question_count(),
        state.message_count(),
        local_time(exported_at),
        "=".repeat(RULE_WIDTH),
    );

    state
        .transcript()
        .iter()
        .enumerate()
        .fold(header, |mut out, (idx, message)| {
            out.push_str(&format!(
                "{}. {}:\n{}\n\n",
                idx + 1,
                message.role().label(),
                message.text()
            ));
            out
        })
}

/// `chess_chat_<name>.txt`, or `chess_chat_anonymous.txt` without a name.
/// Characters that are unsafe in file names become `_`.
pub fn default_file_name(user_name: Option<&str>) -> String {
    let stem: String = user_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("anonymous")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("chess_chat_{stem}.txt")
}
