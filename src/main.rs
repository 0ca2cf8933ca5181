mod cli;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use cadence::backlog::{BacklogItem, ProductBacklog};
use cadence::ceremony::{Event, RunReport, Scrum};
use cadence::config::CadenceConfig;
use cadence::error::CadenceError;
use cadence::script::{self, CeremonyScript};
use cadence::telemetry;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CadenceConfig::load()?;
    if let Some(path) = &cli.backlog {
        config.backlog_path = Some(path.display().to_string());
    }
    telemetry::init(cli.verbose, config.json_logs())?;

    let fail_fast = config.fail_fast && !cli.keep_going;
    let clean = match cli.command {
        Command::Run { script: path } => {
            let ceremonies = CeremonyScript::load(&path)
                .with_context(|| format!("failed to load script {}", path.display()))?;
            run_script(&config, &ceremonies, fail_fast)?
        }
        Command::Cycle {
            items,
            days,
            iterations,
        } => run_script(&config, &CeremonyScript::cycles(items, days, iterations), fail_fast)?,
        Command::Demo => {
            run_demo();
            true
        }
    };

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}

fn run_script(config: &CadenceConfig, ceremonies: &CeremonyScript, fail_fast: bool) -> Result<bool> {
    let backlog = config.load_backlog()?;
    let mut scrum = Scrum::new(&backlog);

    let progress = ui::ReplayProgress::start(ceremonies.steps.len());
    let summary = script::replay(&mut scrum, ceremonies, fail_fast, |index, step, outcome| {
        progress.step(index, step, outcome)
    })?;
    progress.complete(&summary);

    ui::print_report(&RunReport::from_scrum(&scrum));
    Ok(summary.is_clean())
}

/// Walks the controller through a run that starts mid-cycle and then
/// proposes ceremonies out of order.
fn run_demo() {
    let backlog = ProductBacklog::with_items(vec![
        BacklogItem::new("PB-1", "User login", 5),
        BacklogItem::new("PB-2", "Password reset", 3),
        BacklogItem::new("PB-3", "Session timeout", 2),
    ]);
    let mut scrum = Scrum::new(&backlog);

    fn show(call: &str, result: Result<&Event, CadenceError>) {
        ui::print_demo_line(call, result.as_ref().map(|e| e.to_string()));
    }

    show("start_sprint(10)", scrum.start_sprint(10));
    show("review_sprint()", scrum.review_sprint());
    show("start_sprint(10)", scrum.start_sprint(10));
    show("do_sprint_retrospective()", scrum.do_sprint_retrospective());
    show("start_sprint(14)", scrum.start_sprint(14));
    show("plan_sprint(2)", scrum.plan_sprint(2));
    show("start_sprint(14)", scrum.start_sprint(14));
    show("start_sprint(10)", scrum.start_sprint(10));
    scrum.do_daily_scrum();
    show("review_sprint()", scrum.review_sprint());

    ui::print_report(&RunReport::from_scrum(&scrum));
}
