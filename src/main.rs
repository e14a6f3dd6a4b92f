mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{ArgAction, Parser};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::mapping::ProductMappings;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::workflow::release::{ReleaseDispatchArgs, trigger_release_workflows};

#[derive(Parser)]
#[command(
    name = "release-dispatch",
    version,
    about = "Trigger release-branch creation workflows from a Jira release ticket"
)]
struct Cli {
    /// Owner of the repositories receiving release branches.
    #[arg(long)]
    owner: String,
    /// Base branch the release branches are cut from.
    #[arg(long)]
    base_branch: String,
    /// Jira ticket to read product release data from (e.g. MDSO-19142).
    #[arg(long)]
    jira_ticket: String,
    /// Pass true to print the workflow dispatches instead of performing them.
    #[arg(long, action = ArgAction::Set)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if config.jira_token.is_none() {
        eprintln!("Warning: JIRA_TOKEN not set; the ticket fetch will fail authorization.");
    }
    if config.github_token.is_none() && !cli.dry_run {
        eprintln!("Warning: GH_TOKEN not set; workflow dispatches will fail authorization.");
    }

    let mappings = ProductMappings::load(&config.mapping_path)?;

    let issue_tracker = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        config.jira_email.clone(),
        config.jira_token.clone(),
    ));
    let workflow_dispatch = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));

    let context = AppContext::new(config, issue_tracker, workflow_dispatch);

    let args = ReleaseDispatchArgs {
        owner: cli.owner,
        base_branch: cli.base_branch,
        jira_ticket: cli.jira_ticket,
        dry_run: cli.dry_run,
    };

    let outcome = trigger_release_workflows(&context, &mappings, &args).await?;

    if args.dry_run {
        println!(
            "Dry run complete: {} dispatch(es) printed, {} skipped.",
            outcome.dispatched, outcome.skipped
        );
    } else {
        println!(
            "Done: {} workflow(s) dispatched, {} skipped, {} failed.",
            outcome.dispatched, outcome.skipped, outcome.failed
        );
    }

    Ok(())
}
