//! Inspect command - Show a game's payoffs, security values and SPaM target

use anyhow::Result;
use clap::Parser;

use crate::{
    agents::target_joint_action,
    cli::{
        config::GameArgs,
        output::{print_kv, print_section, print_subsection},
    },
    game::Role,
};

#[derive(Parser, Debug)]
#[command(about = "Describe a game")]
pub struct InspectArgs {
    #[command(flatten)]
    pub game: GameArgs,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let game = args.game.load()?;
    let actions = game.actions();

    print_section(game.name());
    print_kv("Actions", &actions.labels().join(", "));

    print_subsection("Payoffs (row, column)");
    print!("  {:>8}", "");
    for column in game.matrix().column_actions() {
        print!("  {column:>12}");
    }
    println!();
    for row in game.matrix().row_actions() {
        print!("  {row:>8}");
        for column in game.matrix().column_actions() {
            if let Some((r, c)) = game.matrix().payoffs(row, column) {
                print!("  {:>12}", format!("({r}, {c})"));
            }
        }
        println!();
    }

    print_subsection("Security values");
    for role in [Role::Row, Role::Column] {
        print_kv(&role.to_string(), &game.security_value(role).to_string());
    }

    let (row, column) = target_joint_action(&game);
    let (r, c) = game.payoffs(row, column);
    print_subsection("SPaM target");
    print_kv(
        "Joint action",
        &format!("({}, {})", actions.label(row), actions.label(column)),
    );
    print_kv("Payoffs", &format!("({r}, {c})"));

    Ok(())
}
