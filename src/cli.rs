//! Interface de linha de comando do trainer baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (serve, demo, commands)
//! e flags globais (--port, --verbose).

use clap::{Parser, Subcommand, ValueEnum};

use crate::training::Mode;

/// Sugar Rush Training Academy — simulação de treinamento de cozinha e entrega.
#[derive(Debug, Parser)]
#[command(name = "trainer", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Porta do endpoint de keep-alive (sobrepõe `PORT` e `trainer.toml`).
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Trilha aceita pela CLI, mapeada para [`Mode`] internamente.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Claim -> Cook.
    Cook,
    /// Apenas Deliver.
    Delivery,
    /// Claim -> Cook -> Deliver.
    Full,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Cook => Mode::Cook,
            ModeArg::Delivery => Mode::Delivery,
            ModeArg::Full => Mode::Full,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia o keep-alive e o gateway de console.
    Serve,

    /// Executa uma sessão de treinamento roteirizada do início ao fim.
    Demo {
        /// Trilha de treinamento a demonstrar.
        #[arg(long, value_enum, default_value_t = ModeArg::Full)]
        mode: ModeArg,
    },

    /// Imprime o esquema JSON dos slash commands para registro.
    Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_serve_with_global_flags() {
        let cli = Cli::parse_from(["trainer", "--port", "8080", "--verbose", "serve"]);
        assert!(matches!(cli.command, Command::Serve));
        assert_eq!(cli.port, Some(8080));
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_demo_mode() {
        let cli = Cli::parse_from(["trainer", "demo", "--mode", "delivery"]);
        match cli.command {
            Command::Demo { mode } => assert_eq!(Mode::from(mode), Mode::Delivery),
            _ => panic!("expected Demo command"),
        }
    }

    #[test]
    fn demo_defaults_to_full_track() {
        let cli = Cli::parse_from(["trainer", "demo"]);
        match cli.command {
            Command::Demo { mode } => assert_eq!(Mode::from(mode), Mode::Full),
            _ => panic!("expected Demo command"),
        }
        assert_eq!(cli.port, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
