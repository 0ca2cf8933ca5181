//! Interface de terminal do cadence — barra de progresso e saída colorida.
//!
//! Usa as crates `indicatif` para a barra de progresso e `console` para
//! estilização com cores. O [`ReplayProgress`] acompanha visualmente
//! a reprodução de um script de cerimônias no terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use cadence::ceremony::RunReport;
use cadence::error::CadenceError;
use cadence::script::{ReplaySummary, Step};

/// Indicador visual de progresso para a reprodução de um script.
///
/// Cerimônias aceitas aparecem em verde, rejeitadas em vermelho e
/// daily scrums (que não alteram o estado) em amarelo.
pub struct ReplayProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl ReplayProgress {
    /// Inicia a barra com o número total de passos do script.
    pub fn start(total_steps: usize) -> Self {
        let pb = ProgressBar::new(total_steps as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Registra o resultado de um passo e avança a barra.
    pub fn step(&self, index: usize, step: &Step, outcome: Result<(), &CadenceError>) {
        let line = match (step, outcome) {
            (Step::DailyScrum, Ok(())) => {
                format!("  {} #{index} {step}: no change", self.yellow.apply_to("·"))
            }
            (_, Ok(())) => format!("  {} #{index} {step}", self.green.apply_to("✓")),
            (_, Err(e)) => format!("  {} #{index} {step}: {e}", self.red.apply_to("✗")),
        };
        self.pb.println(line);
        self.pb.set_message(step.to_string());
        self.pb.inc(1);
    }

    /// Finaliza a barra e exibe o resumo da reprodução.
    pub fn complete(&self, summary: &ReplaySummary) {
        self.pb.finish_and_clear();
        if summary.is_clean() {
            println!(
                "  {} {} ceremonies applied",
                self.green.apply_to("✓"),
                summary.applied
            );
        } else {
            println!(
                "  {} {} applied, {} rejected{}",
                self.red.apply_to("✗"),
                summary.applied,
                summary.rejected.len(),
                if summary.halted { " (halted)" } else { "" }
            );
        }
    }
}

/// Imprime o relatório da execução em JSON com estilo colorido.
pub fn print_report(report: &RunReport) {
    let style = if report.rejected == 0 {
        Style::new().green().bold()
    } else {
        Style::new().red().bold()
    };
    println!();
    println!("{}", style.apply_to("─── Run Report ───"));
    println!(
        "{}",
        serde_json::to_string_pretty(report).unwrap_or_default()
    );
}

/// Imprime uma linha para cada chamada do cenário de demonstração.
pub fn print_demo_line(call: &str, outcome: Result<String, &CadenceError>) {
    match outcome {
        Ok(current) => println!(
            "  {} {call:<28} current = {current}",
            Style::new().green().bold().apply_to("✓")
        ),
        Err(e) => println!(
            "  {} {call:<28} {e}",
            Style::new().red().bold().apply_to("✗")
        ),
    }
}
