//! Interface de linha de comando do cadence baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, cycle, demo)
//! e flags globais (--backlog, --keep-going, --verbose).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cadence — Guarda a ordem das cerimônias Scrum e a duração dos sprints.
#[derive(Debug, Parser)]
#[command(name = "cadence", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Arquivo JSON do product backlog (sobrepõe `cadence.toml`).
    #[arg(long, global = true)]
    pub backlog: Option<PathBuf>,

    /// Continua após uma cerimônia rejeitada em vez de parar.
    #[arg(long, global = true, default_value_t = false)]
    pub keep_going: bool,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reproduz um script TOML de cerimônias.
    Run {
        /// Caminho para o script.
        script: PathBuf,
    },

    /// Executa iterações completas com parâmetros fixos.
    Cycle {
        /// Itens puxados do backlog em cada planning.
        #[arg(long)]
        items: u32,

        /// Duração de cada sprint em dias.
        #[arg(long)]
        days: u32,

        /// Número de iterações.
        #[arg(long, default_value_t = 1)]
        iterations: u32,
    },

    /// Executa o cenário de demonstração embutido.
    Demo,
}
