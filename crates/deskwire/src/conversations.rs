// SPDX-FileCopyrightText: 2026 Deskwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation commands: `conversations`, `show`, `new`, and the one-shot
//! `send`.

use std::collections::HashMap;
use std::io::IsTerminal;

use deskwire_api::{ApiClient, ConversationFilter, CreateConversationRequest, SendMessageRequest};
use deskwire_config::DeskwireConfig;
use deskwire_core::{Channel, Conversation, ConversationStatus, DeskwireError, Priority};

use crate::render::message_line;

/// Runs the `deskwire conversations` command.
pub async fn run_list(
    config: &DeskwireConfig,
    status: Option<&str>,
    page: u32,
    page_size: u32,
    json: bool,
    plain: bool,
) -> Result<(), DeskwireError> {
    let status = status.map(parse_status).transpose()?;
    let api = ApiClient::new(&config.api)?;
    let listing = api
        .list_conversations(&ConversationFilter {
            status,
            page,
            page_size,
        })
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&listing).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    let pages = page_count(listing.total, listing.page_size);
    println!();
    println!(
        "  conversations (page {} of {}, {} total)",
        listing.page, pages, listing.total
    );
    println!("  {}", "-".repeat(35));
    for conversation in &listing.conversations {
        print_listing_line(conversation, use_color);
    }
    println!();
    Ok(())
}

/// Runs the `deskwire show` command.
pub async fn run_show(
    config: &DeskwireConfig,
    conversation_id: &str,
    json: bool,
    plain: bool,
) -> Result<(), DeskwireError> {
    let api = ApiClient::new(&config.api)?;
    let conversation = api.get_conversation(conversation_id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&conversation).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  conversation {}", conversation.id);
    println!("  {}", "-".repeat(35));
    println!(
        "    status:   {} ({})",
        conversation.status, conversation.priority
    );
    println!(
        "    customer: {} via {}",
        conversation.customer_id, conversation.channel
    );
    println!(
        "    agent:    {}",
        conversation.assigned_agent_id.as_deref().unwrap_or("unassigned")
    );
    if let Some(subject) = &conversation.subject {
        println!("    subject:  {subject}");
    }
    println!();
    for message in &conversation.messages {
        println!("{}", message_line(message, use_color));
    }
    println!();
    Ok(())
}

/// Runs the `deskwire new` command.
pub async fn run_new(
    config: &DeskwireConfig,
    message: &str,
    channel: &str,
    priority: &str,
    email: Option<String>,
    name: Option<String>,
    plain: bool,
) -> Result<(), DeskwireError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(DeskwireError::EmptyMessage);
    }

    let request = CreateConversationRequest {
        customer_email: email,
        customer_name: name,
        channel: parse_channel(channel)?,
        initial_message: message.to_string(),
        priority: parse_priority(priority)?,
        metadata: HashMap::new(),
    };

    let api = ApiClient::new(&config.api)?;
    let conversation = api.create_conversation(&request).await?;

    let use_color = !plain && std::io::stdout().is_terminal();
    if use_color {
        use colored::Colorize;
        println!(
            "{} created conversation {}",
            "✓".green(),
            conversation.id.bold()
        );
    } else {
        println!("created conversation {}", conversation.id);
    }
    println!("  follow it with: deskwire watch {}", conversation.id);
    Ok(())
}

/// Runs the `deskwire send` command. One REST call, no live channel and no
/// optimistic bookkeeping; the reply lands in the conversation for the next
/// `show` or `watch`.
pub async fn run_send(
    config: &DeskwireConfig,
    conversation_id: &str,
    text: &str,
    plain: bool,
) -> Result<(), DeskwireError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DeskwireError::EmptyMessage);
    }

    let api = ApiClient::new(&config.api)?;
    api.send_message(
        conversation_id,
        &SendMessageRequest {
            content: text.to_string(),
            attachments: Vec::new(),
            metadata: HashMap::new(),
        },
    )
    .await?;

    let use_color = !plain && std::io::stdout().is_terminal();
    if use_color {
        use colored::Colorize;
        println!("{} sent to {conversation_id}", "✓".green());
    } else {
        println!("sent to {conversation_id}");
    }
    Ok(())
}

fn print_listing_line(conversation: &Conversation, use_color: bool) {
    let state = format!("{}/{}", conversation.status, conversation.priority);
    let subject = conversation.subject.as_deref().unwrap_or("-");
    if use_color {
        use colored::Colorize;
        let state = match conversation.status {
            ConversationStatus::Active | ConversationStatus::Pending => state.green(),
            ConversationStatus::Escalated => state.red(),
            ConversationStatus::Resolved | ConversationStatus::Closed => state.dimmed(),
        };
        println!(
            "    {}  {}  {}  {}",
            conversation.id.bold(),
            state,
            conversation.customer_id,
            subject
        );
    } else {
        println!(
            "    {}  {}  {}  {}",
            conversation.id, state, conversation.customer_id, subject
        );
    }
}

fn parse_status(value: &str) -> Result<ConversationStatus, DeskwireError> {
    value.parse().map_err(|_| {
        DeskwireError::Config(format!(
            "unknown status '{value}' (expected active, pending, resolved, escalated, closed)"
        ))
    })
}

fn parse_channel(value: &str) -> Result<Channel, DeskwireError> {
    value.parse().map_err(|_| {
        DeskwireError::Config(format!(
            "unknown channel '{value}' (expected web_chat, email, phone, sms, whatsapp, api)"
        ))
    })
}

fn parse_priority(value: &str) -> Result<Priority, DeskwireError> {
    value.parse().map_err(|_| {
        DeskwireError::Config(format!(
            "unknown priority '{value}' (expected low, medium, high, urgent)"
        ))
    })
}

/// Pages needed for `total` items at `page_size` per page, at least one.
fn page_count(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1))).max(1)
}
