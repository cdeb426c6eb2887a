//! Outbound messages and the channel abstraction they are sent through.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::NotifyError;
use crate::training::{ChannelId, UserId};

const TITLE_PREFIX: &str = "🍩 Sugar Rush Training";
const FOOTER: &str = "Simulation Mode • Take your time and learn!";

/// Accent colour of a notification card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Main brand orange.
    Brand,
    /// Green, for a job well done.
    Success,
    /// Blue, for information and waiting.
    Wait,
}

impl Tone {
    pub fn color(self) -> u32 {
        match self {
            Tone::Brand => 0xFFA500,
            Tone::Success => 0x2ECC71,
            Tone::Wait => 0x3498DB,
        }
    }
}

/// A formatted notification card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub tone: Tone,
    /// Embed colour, `0xRRGGBB`.
    pub color: u32,
    pub footer: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: &str, description: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: format!("{TITLE_PREFIX}: {title}"),
            description: description.into(),
            tone,
            color: tone.color(),
            footer: FOOTER.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Anything sent back to chat: a reply, a channel post or a direct message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Plain text above the card, typically a mention.
    pub content: Option<String>,
    pub notification: Option<Notification>,
    /// Visible only to the invoking user.
    pub ephemeral: bool,
}

impl Message {
    /// A caller-only text reply.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            notification: None,
            ephemeral: true,
        }
    }

    /// A public card.
    pub fn card(notification: Notification) -> Self {
        Self {
            content: None,
            notification: Some(notification),
            ephemeral: false,
        }
    }

    /// Put `content` above the card.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[cfg(test)]
    pub fn mentions(&self, user: &UserId) -> bool {
        self.content
            .as_deref()
            .is_some_and(|c| c.contains(&user.mention()))
    }
}

/// The chat surface the academy talks through outside of direct replies.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post `message` in `channel`.
    async fn send_channel(&self, channel: &ChannelId, message: Message) -> Result<(), NotifyError>;

    /// Try to message `user` privately. Callers treat failure as non-fatal.
    async fn send_direct(&self, user: &UserId, message: Message) -> Result<(), NotifyError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_is_branded() {
        let n = Notification::new("Ticket Accepted!", "body", Tone::Success);
        assert_eq!(n.title, "🍩 Sugar Rush Training: Ticket Accepted!");
        assert_eq!(n.footer, FOOTER);
        assert_eq!(n.color, 0x2ECC71);
    }

    #[test]
    fn ephemeral_reply_has_no_card() {
        let m = Message::ephemeral("nope");
        assert!(m.ephemeral);
        assert!(m.notification.is_none());
        assert_eq!(m.content.as_deref(), Some("nope"));
    }

    #[test]
    fn mentions_checks_content() {
        let user = UserId::new("9");
        let m = Message::card(Notification::new("t", "d", Tone::Brand)).with_content(user.mention());
        assert!(m.mentions(&user));
        assert!(!m.mentions(&UserId::new("10")));
    }
}
