use chrono::{DateTime, Utc};
use std::fmt;

// Define an enum for message types

#[derive(Clone)]
pub enum MessageType {
    Error,
    Warning,
    Info,
    Priority,
    Status,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message_type_str = match self {
            MessageType::Error => "Error",
            MessageType::Warning => "Warning",
            MessageType::Info => "Info",
            MessageType::Priority => "Priority",
            MessageType::Status => "Status",
        };
        write!(f, "{}", message_type_str)
    }
}

#[derive(Clone)]
pub struct StatusMessage {
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
    pub content: String,
}

impl StatusMessage {
    pub fn new(message_type: MessageType, content: String) -> Self {
        StatusMessage {
            timestamp: Utc::now(),
            message_type,
            content,
        }
    }
}

pub struct MessageLog {
    messages: Vec<StatusMessage>,
    headless: bool,
    max_size: usize,
}

impl MessageLog {
    pub fn new(headless: bool, max_size: Option<usize>) -> Self {
        MessageLog {
            messages: Vec::new(),
            headless,
            max_size: max_size.unwrap_or(500),
        }
    }

    pub fn add_message(&mut self, message: StatusMessage) {
        if self.messages.len() == self.max_size {
            self.messages.remove(0);
        }

        self.messages.push(message.clone());

        if self.headless {
            let color = match message.message_type {
                MessageType::Error => "\x1b[31m",
                MessageType::Warning => "\x1b[33m",
                MessageType::Info => "\x1b[0m",
                MessageType::Priority => "\x1b[32m",
                MessageType::Status => "\x1b[36m",
            };
            let white = "\x1b[0m";
            println!(
                "{}{} | {:^8} | {}{}",
                color,
                message.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                message.message_type,
                message.content,
                white,
            )
        }
    }

    pub fn latest(&self, count: usize) -> &[StatusMessage] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    pub fn size(&self) -> usize {
        self.messages.len()
    }
}

/// The traffic counters the dashboard renders.
#[derive(Debug, Default)]
pub struct TrafficMetrics {
    pub total_packets: u64,
    pub junk_packets: u64,
    pub packets_2g: u64,
    pub packets_5g: u64,
    pub interactions: u64,
    pub beacons: u64,
    pub mesh_rebroadcasts: u64,
}

impl TrafficMetrics {
    /// Band split in whole percent, 2.4 GHz first.
    pub fn band_split(&self) -> (u64, u64) {
        let total = self.packets_2g + self.packets_5g;
        if total == 0 {
            return (0, 0);
        }
        (
            self.packets_2g * 100 / total,
            self.packets_5g * 100 / total,
        )
    }
}
