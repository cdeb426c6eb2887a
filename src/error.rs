use thiserror::Error;

use crate::training::{Step, TraineeCommand, UserId};

/// Failures a command invocation can end with.
///
/// The first four variants are expected outcomes shown only to the caller;
/// anything else is treated as a fault by the gateway.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("🚫 Sorry! Only Managers and Teachers can start training sessions.")]
    AuthorizationDenied,

    #[error(
        "🤔 You don't have a training session active right now. Ask a Manager or Teacher to start one for you!"
    )]
    NoActiveSession,

    #[error("{}", step_mismatch_message(.command, .current))]
    StepMismatch {
        command: TraineeCommand,
        current: Step,
    },

    #[error("🔥 Your order is still in the oven! Wait for it to finish before your next step.")]
    CookInProgress,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Internal fault: {0}")]
    Fault(String),
}

impl TrainerError {
    /// Whether the error text is meant for the invoking user.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TrainerError::AuthorizationDenied
                | TrainerError::NoActiveSession
                | TrainerError::StepMismatch { .. }
                | TrainerError::CookInProgress
                | TrainerError::InvalidCommand(_)
        )
    }
}

fn step_mismatch_message(command: &TraineeCommand, current: &Step) -> String {
    let lead = match command {
        TraineeCommand::Claim => "🚫 Whoops! You can't do that yet.",
        TraineeCommand::Cook => "🚫 Hold on! You can't cook right now.",
        TraineeCommand::Deliver => "🚫 Not yet! The food isn't ready.",
    };
    format!("{lead} You need to **/{current}** first!")
}

/// A notification could not be delivered.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("user {0} does not accept direct messages")]
    DirectMessagesClosed(UserId),

    #[error("channel send failed: {0}")]
    Channel(String),
}
