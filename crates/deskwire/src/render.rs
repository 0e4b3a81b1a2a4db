// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line rendering shared by `show` and `watch`.

use deskwire_core::{Message, SenderRole};

/// One printed line per message: time, author, content. Optimistic entries
/// still awaiting their server echo carry a sending marker.
pub fn message_line(message: &Message, use_color: bool) -> String {
    let time = short_time(&message.timestamp);
    let author = format!("{}/{}", message.sender_role, message.sender_id);
    let marker = if message.id.starts_with("local-") {
        " (sending)"
    } else {
        ""
    };

    if use_color {
        use colored::Colorize;
        let author = match message.sender_role {
            SenderRole::Customer => author.green(),
            SenderRole::Agent => author.cyan(),
            SenderRole::System => author.yellow(),
        };
        format!(
            "  [{}] {}: {}{}",
            time.dimmed(),
            author,
            message.content,
            marker.dimmed()
        )
    } else {
        format!("  [{}] {}: {}{}", time, author, message.content, marker)
    }
}

/// A transient informational line.
pub fn notice_line(text: &str, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("  {} {}", "*".yellow(), text.dimmed())
    } else {
        format!("  * {text}")
    }
}

/// The HH:MM:SS portion of an RFC 3339 timestamp, or the raw value when it
/// does not look like one.
fn short_time(timestamp: &str) -> &str {
    timestamp
        .split('T')
        .nth(1)
        .and_then(|time| time.get(..8))
        .unwrap_or(timestamp)
}
