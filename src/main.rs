mod academy;
mod auth;
mod cards;
mod cli;
mod config;
mod content;
mod error;
mod gateway;
mod keepalive;
mod notify;
mod repl;
mod store;
mod training;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use academy::Academy;
use auth::{InstructorRoles, Member};
use cli::{Cli, Command};
use config::TrainerConfig;
use content::RandomMenu;
use repl::{ConsoleExit, ConsoleMessenger};
use store::InMemorySessionStore;
use training::{ChannelId, Mode, Step, UserId};

const TRAINING_CHANNEL: &str = "training";

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_academy(config: &TrainerConfig) -> Academy {
    let messenger = ConsoleMessenger::new(config.closed_dms.iter().map(UserId::new));
    Academy::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(RandomMenu),
        Arc::new(messenger),
        InstructorRoles::from_config(config),
    )
}

async fn serve(config: TrainerConfig) -> Result<()> {
    if config.token.is_empty() {
        warn!("TRAINING_BOT_TOKEN is not set; running with the console gateway only");
    }
    let academy = build_academy(&config);
    let listener = keepalive::bind(config.port).await?;
    info!(port = config.port, "🎓 Friendly Trainer online");

    let input = BufReader::new(tokio::io::stdin());
    run_gateways(academy, listener, input, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Run the keep-alive endpoint for the life of the process alongside the
/// console gateway. The process ends on `quit`, on `shutdown`, or if the
/// endpoint fails; console EOF alone leaves the endpoint up.
async fn run_gateways<R, S>(
    academy: Academy,
    listener: TcpListener,
    input: R,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut server = tokio::spawn(keepalive::serve(listener));
    let console = repl::run_repl(academy, ChannelId::new(TRAINING_CHANNEL), input);
    tokio::pin!(shutdown);

    tokio::select! {
        joined = &mut server => return joined.context("keep-alive task panicked")?,
        () = &mut shutdown => {
            info!("shutdown requested");
            server.abort();
            return Ok(());
        }
        exit = console => match exit? {
            ConsoleExit::Quit => {
                server.abort();
                return Ok(());
            }
            ConsoleExit::Closed => {
                info!("console input closed; keep-alive endpoint stays up");
            }
        },
    }

    tokio::select! {
        joined = &mut server => joined.context("keep-alive task panicked")?,
        () = &mut shutdown => {
            info!("shutdown requested");
            server.abort();
            Ok(())
        }
    }
}

async fn demo(config: TrainerConfig, mode: Mode) -> Result<()> {
    let academy = build_academy(&config);
    let channel = ChannelId::new(TRAINING_CHANNEL);
    let instructor = Member::new(UserId::new("instructor"), vec![config.manager_role.clone()]);
    let trainee = UserId::new("trainee");
    let show = |who: &str, reply: &notify::Message| {
        println!("{}", ui::render(&format!("{channel} → {who}"), reply));
    };

    show("instructor", &academy.train(&instructor, &trainee, mode)?);

    if mode.entry_step() == Step::Claim {
        show("trainee", &academy.claim(&trainee)?);

        let started = academy.cook(&trainee, &channel, &gateway::Attachment::new("proof.png"))?;
        show("trainee", &started.reply);
        let spinner = ui::CookSpinner::start(&started.item);
        started.completion.await.context("cook timer task failed")?;
        spinner.finish();
    }

    if mode != Mode::Cook {
        show("trainee", &academy.deliver(&trainee).await?);
    }

    info!(active = academy.active_sessions(), "demo finished");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = TrainerConfig::load().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Demo { mode } => demo(config, mode.into()).await,
        Command::Commands => {
            let definitions = gateway::command_definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;

    fn academy() -> Academy {
        build_academy(&TrainerConfig::default())
    }

    async fn get_alive(port: u16) -> String {
        reqwest::get(format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn endpoint_outlives_closed_console() {
        let listener = keepalive::bind(0).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (stop, stopped) = oneshot::channel::<()>();

        let running = tokio::spawn(run_gateways(academy(), listener, &b""[..], async {
            let _ = stopped.await;
        }));

        // Give the console time to hit EOF before probing the endpoint.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!running.is_finished());
        assert_eq!(get_alive(port).await, keepalive::ALIVE);
        assert!(!running.is_finished());

        stop.send(()).unwrap();
        running.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn quit_ends_serving() {
        let listener = keepalive::bind(0).await.unwrap();

        tokio::time::timeout(
            Duration::from_secs(5),
            run_gateways(academy(), listener, &b"quit\n"[..], std::future::pending()),
        )
        .await
        .unwrap()
        .unwrap();
    }
}
