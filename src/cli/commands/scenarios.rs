//! Scenarios command - Compare every learner against every opponent

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    agents::AgentKind,
    cli::{
        config::ExperimentArgs,
        output::{
            checkpoints, format_mean_std, print_curve_table, print_kv, print_section,
            print_subsection,
        },
    },
    scenario::{Scenario, ScenarioRunner},
};

#[derive(Parser, Debug)]
#[command(about = "Compare learners across the built-in games")]
pub struct ScenariosArgs {
    /// Only run scenarios whose game matches (pd, chicken, tricky)
    #[arg(long, short = 'g')]
    pub game: Option<String>,

    /// Learners to compare (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub learners: Vec<AgentKind>,

    /// Opponents to face (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub opponents: Vec<AgentKind>,

    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Also print intermediate checkpoints for every comparison
    #[arg(long, default_value_t = 0)]
    pub checkpoints: usize,

    /// Show a progress bar per experiment
    #[arg(long)]
    pub progress: bool,
}

fn scenario_matches(scenario: &Scenario, filter: &str) -> bool {
    let name = scenario.game.name().to_lowercase();
    let filter = filter.to_lowercase();
    match filter.as_str() {
        "pd" | "prisoners-dilemma" => name.starts_with("prisoner"),
        other => name.starts_with(other),
    }
}

pub fn execute(args: ScenariosArgs) -> Result<()> {
    let config = args.experiment.resolve()?;

    let mut scenarios = Scenario::builtin()?;
    if let Some(filter) = &args.game {
        scenarios.retain(|s| scenario_matches(s, filter));
        if scenarios.is_empty() {
            bail!("no scenario matches game '{filter}'. Expected one of: pd, chicken, tricky");
        }
    }

    let mut runner = ScenarioRunner::new(config.clone()).with_progress(args.progress);
    if !args.learners.is_empty() {
        runner = runner.with_learners(args.learners.clone());
    }
    if !args.opponents.is_empty() {
        runner = runner.with_opponents(args.opponents.clone());
    }

    for scenario in &scenarios {
        print_section(&scenario.title);
        print_kv("Trials", &config.num_repeats.to_string());
        print_kv("Steps per trial", &config.total_steps.to_string());
        print_kv("Noise", &config.noise.to_string());

        for comparison in runner.run(scenario)? {
            print_subsection(&comparison.title);
            for (learner, curve) in &comparison.curves {
                if let Some((mean, std)) = curve.last() {
                    print_kv(learner.display_name(), &format_mean_std(mean, std));
                }
            }
            if let Some((best, _)) = comparison.best_learner() {
                print_kv("Best", best.display_name());
            }

            if args.checkpoints > 0 {
                let labels: Vec<&str> = comparison
                    .curves
                    .iter()
                    .map(|(learner, _)| learner.display_name())
                    .collect();
                let curves: Vec<_> = comparison.curves.iter().map(|(_, curve)| curve).collect();
                println!();
                print_curve_table(
                    &labels,
                    &curves,
                    &checkpoints(config.total_steps, args.checkpoints),
                );
            }
        }
    }

    Ok(())
}
