//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::validation::{validate_dir, DirectoryReport};

use crate::config::QuizkitConfig;

pub fn execute(config: &QuizkitConfig, data_dir: Option<PathBuf>) -> Result<()> {
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());

    anyhow::ensure!(
        data_dir.is_dir(),
        "data directory not found: {}",
        data_dir.display()
    );

    let report = validate_dir(&data_dir)
        .with_context(|| format!("failed to read {}", data_dir.display()))?;

    if report.total_quizzes == 0 {
        println!("No quiz files found in {}", data_dir.display());
        return Ok(());
    }

    print_report(&report, config.max_reported_errors);

    if !report.all_valid() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &DirectoryReport, max_errors: usize) {
    println!("Quiz Validation Report");
    println!("{}", "=".repeat(50));
    println!();

    if report.all_valid() {
        println!("✓ All {} quizzes are valid!", report.total_quizzes);
    } else {
        println!(
            "✗ {}/{} quizzes have errors",
            report.total_quizzes - report.valid_quizzes,
            report.total_quizzes
        );
    }

    let stats = &report.stats;
    println!();
    println!("Statistics:");
    println!("  Total quizzes:     {}", report.total_quizzes);
    println!("  Valid quizzes:     {}", report.valid_quizzes);
    println!("  Total questions:   {}", stats.question_count);
    if stats.question_count > 0 {
        let share = |n: usize| n as f64 / stats.question_count as f64 * 100.0;
        println!("  Multiple choice:   {} ({:.1}%)", stats.mc_count, share(stats.mc_count));
        println!("  True/False:        {} ({:.1}%)", stats.tf_count, share(stats.tf_count));
        println!("  Short answer:      {} ({:.1}%)", stats.sa_count, share(stats.sa_count));
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in report.errors.iter().take(max_errors) {
            println!("  • {error}");
        }
        if report.errors.len() > max_errors {
            println!("  ... and {} more errors", report.errors.len() - max_errors);
        }
    }

    println!();
}
