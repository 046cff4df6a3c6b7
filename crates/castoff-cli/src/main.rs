mod git;
mod jira;
mod output;
mod tui;

use anyhow::Context;
use castoff_core::config::RunConfig;
use castoff_core::workflow::{RunOutcome, Workflow};
use castoff_core::CastoffError;
use clap::Parser;
use git::GitCli;
use jira::JiraSource;
use tui::{TuiPicker, TuiPrompt};

#[derive(Parser)]
#[command(
    name = "castoff",
    about = "Branch, commit, and open a pull request from a one-line change summary",
    version
)]
struct Cli {
    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Print the derived metadata without touching the repository
    #[arg(long)]
    dry_run: bool,

    /// Skip the Jira lookup when building the branch name
    #[arg(long)]
    skip_jira: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = RunConfig::from_env(cli.verbose, cli.dry_run, !cli.skip_jira);

    let default_level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // Log to stderr; stdout carries the dry-run report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&config) {
        eprintln!("error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

fn run(config: &RunConfig) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve the working directory")?;
    let git = GitCli::new(cwd);
    let source = JiraSource::from_env();
    let prompt = TuiPrompt;
    let picker = TuiPicker;
    let workflow = Workflow::new(config, &git, &prompt, &source, &picker, &git);

    match workflow.run()? {
        RunOutcome::DryRun { config, plan } => {
            println!("Flags:");
            output::print_json(&config)?;
            println!("Plan:");
            output::print_json(&plan)?;
        }
        RunOutcome::Completed(plan) => {
            println!("Pushed '{}' and opened a pull request", plan.branch_name);
        }
    }
    Ok(())
}

/// Workflow errors carry their own exit status; anything else exits 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CastoffError>()
        .map(CastoffError::exit_code)
        .unwrap_or(1)
}
