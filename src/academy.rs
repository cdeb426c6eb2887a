use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth::{InstructorRoles, Member, is_instructor};
use crate::cards;
use crate::content::ContentGenerator;
use crate::error::TrainerError;
use crate::gateway::Attachment;
use crate::notify::{Message, Messenger};
use crate::store::SessionStore;
use crate::training::{
    ChannelId, CookOutcome, Mode, Session, StateMachine, TraineeCommand, Transition, UserId,
};

/// How long the simulated kitchen takes to cook an order.
pub const COOK_DELAY: Duration = Duration::from_secs(5);

/// Returned by [`Academy::cook`]: the immediate reply plus the pending timer.
pub struct CookStarted {
    pub reply: Message,
    /// The menu item now in the oven.
    pub item: String,
    pub completion: JoinHandle<()>,
}

/// Runs training sessions against an injected store and messenger.
///
/// Every read-modify-write of the store happens under `writer`, so a
/// trainee's record has a single writer at a time even with the cook
/// timer running on another task.
#[derive(Clone)]
pub struct Academy {
    store: Arc<dyn SessionStore>,
    content: Arc<dyn ContentGenerator>,
    messenger: Arc<dyn Messenger>,
    roles: InstructorRoles,
    writer: Arc<Mutex<()>>,
}

impl Academy {
    pub fn new(
        store: Arc<dyn SessionStore>,
        content: Arc<dyn ContentGenerator>,
        messenger: Arc<dyn Messenger>,
        roles: InstructorRoles,
    ) -> Self {
        Self {
            store,
            content,
            messenger,
            roles,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a session for `trainee`, replacing any session they already have.
    pub fn train(
        &self,
        invoker: &Member,
        trainee: &UserId,
        mode: Mode,
    ) -> Result<Message, TrainerError> {
        if !is_instructor(invoker, &self.roles) {
            warn!(invoker = %invoker.user, %trainee, "non-instructor tried to start a session");
            return Err(TrainerError::AuthorizationDenied);
        }

        let session = Session::new(invoker.user.clone(), mode, self.content.generate());
        let reply = cards::session_started(trainee, &session);

        {
            let _guard = self.lock();
            if let Some(previous) = self.store.get(trainee) {
                info!(%trainee, previous = %previous.id, "discarding previous session");
            }
            info!(
                %trainee,
                instructor = %invoker.user,
                %mode,
                session = %session.id,
                item = %session.item,
                order = %session.order_id,
                step = %session.current_step,
                "training session started"
            );
            self.store.set(trainee, session);
        }

        Ok(reply)
    }

    pub fn claim(&self, trainee: &UserId) -> Result<Message, TrainerError> {
        let session = self.advance(trainee, TraineeCommand::Claim)?;
        Ok(cards::ticket_claimed(&session))
    }

    /// Accept the cook step and schedule its completion after [`COOK_DELAY`].
    ///
    /// The scheduled task keeps only identifiers; it re-reads the store when
    /// it fires.
    pub fn cook(
        &self,
        trainee: &UserId,
        channel: &ChannelId,
        image: &Attachment,
    ) -> Result<CookStarted, TrainerError> {
        let session = self.advance(trainee, TraineeCommand::Cook)?;
        debug!(%trainee, proof = %image.filename, "cook proof received");

        let academy = self.clone();
        let trainee = trainee.clone();
        let channel = channel.clone();
        let session_id = session.id.clone();
        let completion = tokio::spawn(async move {
            tokio::time::sleep(COOK_DELAY).await;
            academy.finish_cooking(&trainee, &channel, &session_id).await;
        });

        Ok(CookStarted {
            reply: cards::cooking_started(&session, COOK_DELAY.as_secs()),
            item: session.item,
            completion,
        })
    }

    /// Finish the session with the dispatch step. A failed DM is logged and
    /// does not stop the handoff to the instructor.
    pub async fn deliver(&self, trainee: &UserId) -> Result<Message, TrainerError> {
        let session = self.advance(trainee, TraineeCommand::Deliver)?;

        if let Err(e) = self
            .messenger
            .send_direct(trainee, cards::dispatch_instructions(&session))
            .await
        {
            warn!(%trainee, error = %e, "dispatch DM could not be delivered");
        }

        log_finished(trainee, &session, "delivery simulation complete");
        Ok(cards::delivery_complete(trainee, &session))
    }

    // Fetch, validate and apply one trainee command as a single store write.
    fn advance(&self, trainee: &UserId, command: TraineeCommand) -> Result<Session, TrainerError> {
        let _guard = self.lock();
        let mut session = self
            .store
            .get(trainee)
            .ok_or(TrainerError::NoActiveSession)?;

        let transition = StateMachine::next(&mut session, command)?;
        match transition {
            Transition::Complete => self.store.delete(trainee),
            Transition::Next(step) => {
                info!(%trainee, %step, "trainee advanced");
                self.store.set(trainee, session.clone());
            }
            Transition::CookingStarted => self.store.set(trainee, session.clone()),
        }
        debug!(%trainee, %command, ?transition, "command applied");

        Ok(session)
    }

    async fn finish_cooking(&self, trainee: &UserId, channel: &ChannelId, session_id: &str) {
        let resolved = {
            let _guard = self.lock();
            match self.store.get(trainee) {
                Some(mut session) if session.id == session_id => {
                    let outcome = StateMachine::finish_cooking(&mut session);
                    match outcome {
                        Some(CookOutcome::Passed) => self.store.delete(trainee),
                        Some(CookOutcome::ReadyForDelivery) => {
                            self.store.set(trainee, session.clone())
                        }
                        None => {}
                    }
                    outcome.map(|outcome| (outcome, session))
                }
                _ => None,
            }
        };

        let Some((outcome, session)) = resolved else {
            warn!(%trainee, session = session_id, "cook timer fired for a session that is no longer active");
            return;
        };

        let message = match outcome {
            CookOutcome::Passed => {
                log_finished(trainee, &session, "cooking training passed");
                cards::cooking_passed(trainee, &session)
            }
            CookOutcome::ReadyForDelivery => {
                info!(%trainee, session = %session.id, "order ready for delivery");
                cards::ready_for_delivery(trainee, &session)
            }
        };

        if let Err(e) = self.messenger.send_channel(channel, message).await {
            warn!(%trainee, %channel, error = %e, "cook completion notice could not be posted");
        }
    }
}

fn log_finished(trainee: &UserId, session: &Session, what: &str) {
    let elapsed = Utc::now() - session.started_at;
    info!(
        %trainee,
        instructor = %session.instructor_id,
        mode = %session.mode,
        session = %session.id,
        duration_ms = elapsed.num_milliseconds(),
        "{what}"
    );
}
