use colored::Colorize;
use prestage_core::model::SyncOutcome;
use prestage_core::report::RunReport;

pub fn print_report(report: &RunReport) {
    println!();
    for result in &report.results {
        println!(
            "{} {:<12} {:<10} {}",
            outcome_indicator(result.outcome),
            result.descriptor.name,
            outcome_label(result.outcome),
            result.detail
        );
    }
    println!();
    println!(
        "{} ready, {} missing",
        report.ready().count(),
        report.missing.len()
    );

    if report.all_present {
        println!("{}", "All repositories are present.".green().bold());
        if report
            .results
            .iter()
            .any(|result| result.outcome.needs_attention())
        {
            println!(
                "{}",
                "Some repositories need manual attention before they are current."
                    .yellow()
            );
        }
        print_next_steps();
    } else {
        println!(
            "{} {}",
            "Missing repositories:".red().bold(),
            report.missing.join(", ")
        );
        println!("Resolve the failures above and re-run 'prestage' before deploying.");
    }
}

fn outcome_label(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::Cloned => "CLONED",
        SyncOutcome::UpdatedFastForward => "UPDATED",
        SyncOutcome::UpdatedRebase => "REBASED",
        SyncOutcome::SkippedNotVersionControlled => "SKIPPED",
        SyncOutcome::SkippedByMode => "SKIPPED",
        SyncOutcome::ManualResolutionRequired => "ATTENTION",
        SyncOutcome::CloneFailed => "FAILED",
    }
}

fn outcome_indicator(outcome: SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Cloned | SyncOutcome::UpdatedFastForward | SyncOutcome::UpdatedRebase => {
            "■".green().bold().to_string()
        }
        SyncOutcome::SkippedNotVersionControlled | SyncOutcome::SkippedByMode => {
            "■".bright_black().bold().to_string()
        }
        SyncOutcome::ManualResolutionRequired => "■".yellow().bold().to_string(),
        SyncOutcome::CloneFailed => "■".red().bold().to_string(),
    }
}

fn print_next_steps() {
    println!();
    println!("Next steps:");
    println!("  1. Copy each service's .env.example to .env and fill in secrets.");
    println!("  2. Start the stack:   docker compose up -d");
    println!("  3. Follow the logs:   docker compose logs -f");
}
