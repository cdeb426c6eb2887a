use std::fmt;

use super::session::{Mode, Session, Step};
use crate::error::TrainerError;

/// A step command a trainee can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraineeCommand {
    Claim,
    Cook,
    Deliver,
}

impl TraineeCommand {
    /// The step the session must be at for this command to be accepted.
    pub fn required_step(self) -> Step {
        match self {
            TraineeCommand::Claim => Step::Claim,
            TraineeCommand::Cook => Step::Cook,
            TraineeCommand::Deliver => Step::Deliver,
        }
    }
}

impl fmt::Display for TraineeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.required_step())
    }
}

/// The result of applying an accepted trainee command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Advance to the next step.
    Next(Step),
    /// Cooking started; the session stays at `cook` until the timer fires.
    CookingStarted,
    /// The session is finished and must be removed from the store.
    Complete,
}

/// The branch taken when a cook timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookOutcome {
    /// Cook-only track: the trainee passed and the session is over.
    Passed,
    /// The order moves on to delivery.
    ReadyForDelivery,
}

/// Drives a `Session` through its track.
pub struct StateMachine;

impl StateMachine {
    /// Validate `command` against the session and apply it.
    ///
    /// - A pending cook timer rejects every command.
    /// - A command whose step differs from `current_step` is rejected
    ///   naming the step the trainee should perform instead.
    /// - On rejection the session is untouched.
    pub fn next(session: &mut Session, command: TraineeCommand) -> Result<Transition, TrainerError> {
        if session.cooking {
            return Err(TrainerError::CookInProgress);
        }
        if session.current_step != command.required_step() {
            return Err(TrainerError::StepMismatch {
                command,
                current: session.current_step,
            });
        }

        let transition = match command {
            TraineeCommand::Claim => Transition::Next(Step::Cook),
            TraineeCommand::Cook => Transition::CookingStarted,
            TraineeCommand::Deliver => Transition::Complete,
        };

        match transition {
            Transition::Next(step) => session.current_step = step,
            Transition::CookingStarted => session.cooking = true,
            Transition::Complete => {}
        }

        Ok(transition)
    }

    /// Resolve a fired cook timer. Returns `None` when the session is not
    /// actually waiting on one.
    pub fn finish_cooking(session: &mut Session) -> Option<CookOutcome> {
        if !session.cooking || session.current_step != Step::Cook {
            return None;
        }
        session.cooking = false;

        match session.mode {
            Mode::Cook => Some(CookOutcome::Passed),
            Mode::Full | Mode::Delivery => {
                session.current_step = Step::Deliver;
                Some(CookOutcome::ReadyForDelivery)
            }
        }
    }
}
