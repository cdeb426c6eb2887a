//! Binds inbound commands to academy operations and turns outcomes into replies.

use serde_json::{Value, json};
use tracing::{debug, error};

use crate::academy::Academy;
use crate::auth::Member;
use crate::error::TrainerError;
use crate::notify::Message;
use crate::training::{ChannelId, Mode, UserId};

const APOLOGY: &str = "⚠️ Oops! The bot had a hiccup.";

/// An uploaded file accompanying a command. Never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
}

impl Attachment {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// A named command with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Train { trainee: UserId, mode: Mode },
    Claim,
    Cook { image: Attachment },
    Deliver,
}

/// A command as delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub member: Member,
    pub channel: ChannelId,
    pub command: Command,
}

async fn handle(academy: &Academy, interaction: Interaction) -> Result<Message, TrainerError> {
    let Interaction {
        member,
        channel,
        command,
    } = interaction;

    match command {
        Command::Train { trainee, mode } => academy.train(&member, &trainee, mode),
        Command::Claim => academy.claim(&member.user),
        // The completion timer is left to run on its own.
        Command::Cook { image } => academy
            .cook(&member.user, &channel, &image)
            .map(|started| started.reply),
        Command::Deliver => academy.deliver(&member.user).await,
    }
}

/// Run one interaction to a reply. Never fails: expected rejections become
/// caller-only replies, and anything else (including a panic inside the
/// handler) becomes a generic apology.
pub async fn dispatch(academy: &Academy, interaction: Interaction) -> Message {
    debug!(user = %interaction.member.user, command = ?interaction.command, "dispatching");
    let academy = academy.clone();
    let outcome = tokio::spawn(async move { handle(&academy, interaction).await })
        .await
        .unwrap_or_else(|e| Err(TrainerError::Fault(e.to_string())));

    match outcome {
        Ok(reply) => reply,
        Err(e) if e.is_user_facing() => Message::ephemeral(e.to_string()),
        Err(e) => {
            error!(error = %e, "command failed");
            Message::ephemeral(APOLOGY)
        }
    }
}

/// Parse a console line of the form `<user>[@role,role] /<command> [args]`.
///
/// ```text
/// coach@1454876343878549630 /train rookie full
/// rookie /claim
/// rookie /cook donut.png
/// rookie /deliver
/// ```
pub fn parse_line(line: &str, channel: &ChannelId) -> Result<Interaction, TrainerError> {
    let mut words = line.split_whitespace();
    let who = words
        .next()
        .ok_or_else(|| TrainerError::InvalidCommand("empty line".into()))?;
    let name = words
        .next()
        .and_then(|w| w.strip_prefix('/'))
        .ok_or_else(|| TrainerError::InvalidCommand("expected `<user> /<command>`".into()))?;

    let (user, roles) = match who.split_once('@') {
        Some((user, roles)) => (
            user,
            roles
                .split(',')
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        None => (who, Vec::new()),
    };
    if user.is_empty() {
        return Err(TrainerError::InvalidCommand("missing user".into()));
    }

    let command = match name {
        "train" => {
            let trainee = words
                .next()
                .ok_or_else(|| TrainerError::InvalidCommand("/train needs a trainee".into()))?;
            let mode = words
                .next()
                .ok_or_else(|| TrainerError::InvalidCommand("/train needs a mode".into()))?
                .parse::<Mode>()?;
            Command::Train {
                trainee: UserId::new(trainee),
                mode,
            }
        }
        "claim" => Command::Claim,
        "cook" => {
            let image = words.next().ok_or_else(|| {
                TrainerError::InvalidCommand("/cook needs an image attachment".into())
            })?;
            Command::Cook {
                image: Attachment::new(image),
            }
        }
        "deliver" => Command::Deliver,
        other => {
            return Err(TrainerError::InvalidCommand(format!(
                "unknown command `/{other}`"
            )));
        }
    };

    if let Some(extra) = words.next() {
        return Err(TrainerError::InvalidCommand(format!(
            "unexpected argument `{extra}`"
        )));
    }

    Ok(Interaction {
        member: Member::new(UserId::new(user), roles),
        channel: channel.clone(),
        command,
    })
}

// Application command option types.
const OPTION_STRING: u8 = 3;
const OPTION_USER: u8 = 6;
const OPTION_ATTACHMENT: u8 = 11;

/// The slash-command schema to register with the chat platform.
pub fn command_definitions() -> Value {
    json!([
        {
            "name": "train",
            "description": "Start a training session (Manager/Teacher)",
            "options": [
                {
                    "name": "trainee",
                    "type": OPTION_USER,
                    "description": "The user to train",
                    "required": true
                },
                {
                    "name": "mode",
                    "type": OPTION_STRING,
                    "description": "Training Track",
                    "required": true,
                    "choices": [
                        { "name": "👨‍🍳 Cook (Claim -> Cook)", "value": Mode::Cook },
                        { "name": "🚚 Delivery (Deliver Only)", "value": Mode::Delivery },
                        { "name": "🚀 Full Cycle (Claim -> Cook -> Deliver)", "value": Mode::Full }
                    ]
                }
            ]
        },
        { "name": "claim", "description": "Training: Claim current order" },
        {
            "name": "cook",
            "description": "Training: Cook current order",
            "options": [
                {
                    "name": "image",
                    "type": OPTION_ATTACHMENT,
                    "description": "Proof",
                    "required": true
                }
            ]
        },
        { "name": "deliver", "description": "Training: Deliver current order" }
    ])
}
