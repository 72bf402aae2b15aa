//! Run command - Play one matchup repeatedly and report payoff curves

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    agents::AgentKind,
    cli::{
        config::{ExperimentArgs, GameArgs},
        output::{
            checkpoints, format_number, print_curve_table, print_kv, print_section,
            print_subsection,
        },
    },
    pipeline::{ExperimentPipeline, MetricsObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Run repeated trials of one matchup")]
pub struct RunArgs {
    /// Row player (agent 1)
    #[arg(long, value_enum, default_value = "spam")]
    pub row: AgentKind,

    /// Column player (agent 2)
    #[arg(long, value_enum, default_value = "fp")]
    pub column: AgentKind,

    #[command(flatten)]
    pub game: GameArgs,

    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Number of evenly spaced steps to report
    #[arg(long, default_value_t = 10)]
    pub checkpoints: usize,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = args.experiment.resolve()?;
    let game = Arc::new(args.game.load()?);

    print_section(&format!("{} vs {} on {}", args.row, args.column, game.name()));
    print_kv("Trials", &format_number(config.num_repeats));
    print_kv("Steps per trial", &format_number(config.total_steps));
    print_kv("Noise", &format!("{}", config.noise));
    print_kv("Seed", &config.seed.to_string());
    print_kv("Parallel", &config.parallel.to_string());

    let mut metrics = MetricsObserver::new();
    let parallel = config.parallel;
    let mut pipeline =
        ExperimentPipeline::new(config.clone()).with_observer(Box::new(&mut metrics));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let result = pipeline
        .run(&args.row, &args.column, &game)
        .context("experiment failed")?;
    drop(pipeline);

    print_subsection("Average payoff (mean ± std over trials)");
    let row_label = format!("{} (row)", args.row);
    let column_label = format!("{} (column)", args.column);
    print_curve_table(
        &[row_label.as_str(), column_label.as_str()],
        &[&result.player1, &result.player2],
        &checkpoints(config.total_steps, args.checkpoints),
    );

    let summary = metrics.summary();
    print_subsection("Execution");
    if parallel {
        println!("  Step-level metrics are only collected for sequential runs.");
    } else {
        print_kv(
            "Perturbed actions",
            &format!("{:.2}%", summary.perturbation_rate * 100.0),
        );
        for ((row, column), frequency) in &summary.joint_action_frequencies {
            print_kv(
                &format!(
                    "({}, {})",
                    game.actions().label(*row),
                    game.actions().label(*column)
                ),
                &format!("{:.1}%", frequency * 100.0),
            );
        }
    }

    Ok(())
}
