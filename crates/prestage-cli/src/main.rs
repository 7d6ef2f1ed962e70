use clap::Parser;
use prestage_core::engine::run_sync;
use prestage_core::git::SystemGit;
use prestage_core::model::SyncMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod access;
mod manifest;
mod render;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Ensure the deployment's source repositories are present and up to date"
)]
struct Cli {
    #[arg(
        long,
        default_value = ".",
        help = "Workspace directory the repositories are materialized under"
    )]
    root: PathBuf,
    #[arg(
        long,
        help = "Only clone missing repositories; never touch existing working copies"
    )]
    clone_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("prestage: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let descriptors = manifest::descriptors(&cli.root);
    let mode = SyncMode {
        pull_existing: !cli.clone_only,
    };

    access::advisory_ssh_check(&descriptors);

    let report = run_sync(&SystemGit::new(), &descriptors, mode)?;
    render::print_report(&report);

    Ok(if report.all_present {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_only_flag_selects_restricted_mode() {
        let cli = Cli::parse_from(["prestage", "--clone-only"]);
        assert!(cli.clone_only);
        let cli = Cli::parse_from(["prestage"]);
        assert!(!cli.clone_only);
        assert_eq!(cli.root, PathBuf::from("."));
    }
}
