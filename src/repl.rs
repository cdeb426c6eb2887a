//! Console stand-ins for the chat platform: a messenger that prints to the
//! terminal and a line-oriented gateway reading commands from stdin.

use std::collections::HashSet;
use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use console::Style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::academy::Academy;
use crate::error::NotifyError;
use crate::gateway;
use crate::notify::{Message, Messenger};
use crate::training::{ChannelId, UserId};
use crate::ui;

const HELP: &str = "\
Commands are typed as `<user>[@role,role] /<command> [args]`:
  coach@<role-id> /train <trainee> <cook|delivery|full>
  <trainee> /claim
  <trainee> /cook <image-file>
  <trainee> /deliver
Other input: `status`, `help`, `quit`.";

/// Prints every message to stdout. DMs to users in `closed_dms` fail.
#[derive(Debug, Default)]
pub struct ConsoleMessenger {
    closed_dms: HashSet<UserId>,
}

impl ConsoleMessenger {
    pub fn new(closed_dms: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            closed_dms: closed_dms.into_iter().collect(),
        }
    }

    fn print(&self, audience: &str, message: &Message) -> Result<(), NotifyError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", ui::render(audience, message))
            .map_err(|e| NotifyError::Channel(e.to_string()))
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_channel(&self, channel: &ChannelId, message: Message) -> Result<(), NotifyError> {
        self.print(&channel.to_string(), &message)
    }

    async fn send_direct(&self, user: &UserId, message: Message) -> Result<(), NotifyError> {
        if self.closed_dms.contains(user) {
            return Err(NotifyError::DirectMessagesClosed(user.clone()));
        }
        self.print(&format!("DM → {user}"), &message)
    }
}

/// Why the console gateway stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// The operator typed `quit`.
    Quit,
    /// Input reached EOF, e.g. stdin is `/dev/null` under a supervisor.
    Closed,
}

/// Read commands from `input` until EOF or `quit`, replying on stdout.
pub async fn run_repl<R>(academy: Academy, channel: ChannelId, input: R) -> Result<ConsoleExit>
where
    R: AsyncBufRead + Unpin,
{
    let red = Style::new().red();
    let mut lines = input.lines();
    println!("{HELP}");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => {
                info!("console gateway quit");
                return Ok(ConsoleExit::Quit);
            }
            "help" => {
                println!("{HELP}");
                continue;
            }
            "status" => {
                println!("{} active session(s)", academy.active_sessions());
                continue;
            }
            _ => {}
        }

        match gateway::parse_line(line, &channel) {
            Ok(interaction) => {
                let audience = format!("{channel} → {}", interaction.member.user);
                let reply = gateway::dispatch(&academy, interaction).await;
                println!("{}", ui::render(&audience, &reply));
            }
            Err(e) => eprintln!("{}", red.apply_to(e)),
        }
    }

    info!("console gateway closed");
    Ok(ConsoleExit::Closed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::InstructorRoles;
    use crate::content::RandomMenu;
    use crate::notify::testing::RecordingMessenger;
    use crate::notify::{Notification, Tone};
    use crate::store::InMemorySessionStore;

    fn academy() -> Academy {
        Academy::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(RandomMenu),
            Arc::new(RecordingMessenger::default()),
            InstructorRoles {
                manager: "mgr".into(),
                teacher: "tch".into(),
            },
        )
    }

    #[tokio::test]
    async fn eof_and_quit_are_told_apart() {
        let channel = ChannelId::new("training");

        let exit = run_repl(academy(), channel.clone(), &b""[..]).await.unwrap();
        assert_eq!(exit, ConsoleExit::Closed);

        let exit = run_repl(academy(), channel, &b"status\nquit\nrookie /claim\n"[..])
            .await
            .unwrap();
        assert_eq!(exit, ConsoleExit::Quit);
    }

    #[tokio::test]
    async fn commands_reach_the_academy() {
        let academy = academy();
        let input = b"coach@mgr /train rookie full\nrookie /claim\nnot a command\n";

        let exit = run_repl(academy.clone(), ChannelId::new("training"), &input[..])
            .await
            .unwrap();
        assert_eq!(exit, ConsoleExit::Closed);
        assert_eq!(academy.active_sessions(), 1);
    }

    #[tokio::test]
    async fn closed_dms_fail() {
        let messenger = ConsoleMessenger::new([UserId::new("shy")]);
        let message = Message::card(Notification::new("t", "d", Tone::Brand));

        let err = messenger
            .send_direct(&UserId::new("shy"), message.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::DirectMessagesClosed(_)));

        messenger
            .send_direct(&UserId::new("open"), message.clone())
            .await
            .unwrap();
        messenger
            .send_channel(&ChannelId::new("training"), message)
            .await
            .unwrap();
    }
}
