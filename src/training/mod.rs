mod machine;
mod session;

pub use machine::{CookOutcome, StateMachine, TraineeCommand, Transition};
pub use session::{ChannelId, Mode, Session, Step, UserId};
