//! Output formatting for the CLI

use crate::analysis::Curve;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a payoff as `mean ± std`
pub fn format_mean_std(mean: f64, std: f64) -> String {
    format!("{mean:>7.3} ± {std:.3}")
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Steps at which to report a curve: `count` evenly spaced points ending at
/// `total_steps`
pub fn checkpoints(total_steps: usize, count: usize) -> Vec<usize> {
    if total_steps == 0 || count == 0 {
        return Vec::new();
    }
    let count = count.min(total_steps);
    let mut steps: Vec<usize> = (1..=count).map(|i| i * total_steps / count).collect();
    steps.dedup();
    steps
}

/// Print labelled curves side by side at the given steps
pub fn print_curve_table(labels: &[&str], curves: &[&Curve], steps: &[usize]) {
    print!("  {:>8}", "step");
    for label in labels {
        print!("  {label:>17}");
    }
    println!();
    for &step in steps {
        print!("  {:>8}", format_number(step));
        for curve in curves {
            match curve.at(step) {
                Some((mean, std)) => print!("  {:>17}", format_mean_std(mean, std)),
                None => print!("  {:>17}", "-"),
            }
        }
        println!();
    }
}
