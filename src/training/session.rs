use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::content::OrderDetails;
use crate::error::TrainerError;

/// Identity of a chat user (trainee or instructor).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Chat mention markup for this user, e.g. `<@123>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the channel an interaction arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The training track chosen by the instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Claim -> Cook.
    Cook,
    /// Deliver only.
    Delivery,
    /// Claim -> Cook -> Deliver.
    Full,
}

impl Mode {
    /// The step a fresh session of this track starts at.
    pub fn entry_step(self) -> Step {
        match self {
            Mode::Cook | Mode::Full => Step::Claim,
            Mode::Delivery => Step::Deliver,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Cook => write!(f, "cook"),
            Mode::Delivery => write!(f, "delivery"),
            Mode::Full => write!(f, "full"),
        }
    }
}

impl FromStr for Mode {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cook" => Ok(Mode::Cook),
            "delivery" => Ok(Mode::Delivery),
            "full" => Ok(Mode::Full),
            other => Err(TrainerError::InvalidCommand(format!(
                "unknown training mode `{other}` (expected cook, delivery or full)"
            ))),
        }
    }
}

/// The next action a trainee is required to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Claim,
    Cook,
    Deliver,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Claim => write!(f, "claim"),
            Step::Cook => write!(f, "cook"),
            Step::Deliver => write!(f, "deliver"),
        }
    }
}

/// A single trainee's training session.
///
/// Everything except `current_step` and `cooking` is fixed at creation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique per session instance; a replaced session never shares it.
    pub id: String,
    pub instructor_id: UserId,
    pub item: String,
    pub mode: Mode,
    pub order_id: String,
    pub current_step: Step,
    /// Set while a cook timer is pending for this session.
    pub cooking: bool,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(instructor_id: UserId, mode: Mode, details: OrderDetails) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            instructor_id,
            item: details.item,
            mode,
            order_id: details.order_id,
            current_step: mode.entry_step(),
            cooking: false,
            started_at: Utc::now(),
        }
    }
}
