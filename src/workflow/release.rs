use std::fmt;

use crate::context::AppContext;
use crate::domain::dispatch::DispatchRequest;
use crate::domain::mapping::ProductMappings;
use crate::domain::release::ReleaseEntry;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ReleaseDispatchArgs {
    pub owner: String,
    pub base_branch: String,
    pub jira_ticket: String,
    pub dry_run: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReleaseDispatchOutcome {
    pub dispatched: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// A release entry that cannot be dispatched: either its name does not parse
/// or the derived product has no mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingGap {
    Malformed { entry: String },
    Missing { product: String },
}

impl fmt::Display for MappingGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingGap::Malformed { entry } => {
                write!(f, "Unparseable release entry: '{entry}' (expected '<product> <version>')")
            }
            MappingGap::Missing { product } => {
                write!(f, "Product mapping not found for: {product}")
            }
        }
    }
}

/// Checks every entry against the mapping table without short-circuiting, so
/// a single run reports every gap instead of one per rerun. Full coverage
/// yields the parsed entries in ticket order.
pub fn validate_mappings(
    release_names: &[String],
    mappings: &ProductMappings,
) -> Result<Vec<ReleaseEntry>, Vec<MappingGap>> {
    let mut entries = Vec::with_capacity(release_names.len());
    let mut gaps = Vec::new();

    for name in release_names {
        match ReleaseEntry::parse(name) {
            None => gaps.push(MappingGap::Malformed {
                entry: name.clone(),
            }),
            Some(entry) => {
                if mappings.contains(&entry.product) {
                    entries.push(entry);
                } else {
                    gaps.push(MappingGap::Missing {
                        product: entry.product,
                    });
                }
            }
        }
    }

    if gaps.is_empty() { Ok(entries) } else { Err(gaps) }
}

/// Fetches the ticket, validates mapping coverage, then walks the release
/// entries in order. A failed dispatch is reported and the loop continues;
/// only fetch and validation failures abort the run.
pub async fn trigger_release_workflows(
    ctx: &AppContext,
    mappings: &ProductMappings,
    args: &ReleaseDispatchArgs,
) -> AppResult<ReleaseDispatchOutcome> {
    let ticket = ctx
        .issue_tracker
        .fetch_release_ticket(&args.jira_ticket)
        .await?;

    let entries = match validate_mappings(&ticket.release_names, mappings) {
        Ok(entries) => entries,
        Err(gaps) => {
            for gap in &gaps {
                println!("{gap}");
            }
            return Err(AppError::Validation(format!(
                "{} release entries on {} have no usable mapping; add them to the mapping file and rerun",
                gaps.len(),
                ticket.key
            )));
        }
    };

    let mut outcome = ReleaseDispatchOutcome::default();

    if args.dry_run {
        println!("*** dry run mode - printing workflow dispatch calls ***\n");
    }

    for entry in entries {
        let Some(record) = mappings.get(&entry.product) else {
            continue;
        };
        if record.skip {
            outcome.skipped += 1;
            continue;
        }

        let request = DispatchRequest {
            owner: args.owner.clone(),
            workflow_repo: ctx.config.workflow_repo.clone(),
            workflow_id: ctx.config.workflow_id.clone(),
            base_branch: args.base_branch.clone(),
            repo: record.repo.clone(),
            release_branch: entry.release_branch(),
        };

        if args.dry_run {
            println!("\tProduct: {}", entry.product);
            println!(
                "\tWould dispatch workflow {}/{} (id {}): repo={} base_branch={} release_branch={}\n",
                request.owner,
                request.workflow_repo,
                request.workflow_id,
                request.repo,
                request.base_branch,
                request.release_branch
            );
            outcome.dispatched += 1;
            continue;
        }

        match ctx.workflow_dispatch.dispatch_workflow(&request).await {
            Ok(()) => {
                println!("Workflow dispatched for {}.", entry.product);
                outcome.dispatched += 1;
            }
            Err(err) => {
                eprintln!("Failed to dispatch workflow for {}: {err}", entry.product);
                outcome.failed += 1;
            }
        }
    }

    if args.dry_run {
        println!("*** dry run mode - end workflow dispatch calls ***");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::release::ReleaseTicket;
    use crate::services::{IssueTrackerService, WorkflowDispatchService};

    struct FakeTracker {
        names: Vec<&'static str>,
    }

    #[async_trait]
    impl IssueTrackerService for FakeTracker {
        async fn fetch_release_ticket(&self, key: &str) -> AppResult<ReleaseTicket> {
            Ok(ReleaseTicket {
                key: key.to_string(),
                release_names: self.names.iter().map(|name| name.to_string()).collect(),
            })
        }
    }

    struct FailingTracker;

    #[async_trait]
    impl IssueTrackerService for FailingTracker {
        async fn fetch_release_ticket(&self, key: &str) -> AppResult<ReleaseTicket> {
            Err(AppError::IssueTracker(format!(
                "Jira responded with 404 Not Found for issue {key}"
            )))
        }
    }

    #[derive(Default)]
    struct RecordingDispatcher {
        calls: Mutex<Vec<DispatchRequest>>,
        fail_repos: HashSet<String>,
    }

    impl RecordingDispatcher {
        fn failing_for(repos: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_repos: repos.iter().map(|repo| repo.to_string()).collect(),
            }
        }

        fn calls(&self) -> Vec<DispatchRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WorkflowDispatchService for RecordingDispatcher {
        async fn dispatch_workflow(&self, request: &DispatchRequest) -> AppResult<()> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail_repos.contains(&request.repo) {
                return Err(AppError::WorkflowDispatch(
                    "GitHub responded with 500 Internal Server Error: boom".to_string(),
                ));
            }
            Ok(())
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            github_token: Some("gh-token".to_string()),
            jira_token: Some("jira-token".to_string()),
            jira_email: None,
            jira_base_url: "https://jira.example.com".to_string(),
            github_api_url: "https://api.github.com".to_string(),
            workflow_id: "66795811".to_string(),
            workflow_repo: "pdk-devops".to_string(),
            mapping_path: "product_repo_mappings.json".into(),
        }
    }

    fn test_context(
        tracker: Arc<dyn IssueTrackerService>,
        dispatcher: Arc<RecordingDispatcher>,
    ) -> AppContext {
        AppContext::new(test_config(), tracker, dispatcher)
    }

    fn args(dry_run: bool) -> ReleaseDispatchArgs {
        ReleaseDispatchArgs {
            owner: "acme".to_string(),
            base_branch: "develop".to_string(),
            jira_ticket: "MDSO-19142".to_string(),
            dry_run,
        }
    }

    fn mappings(json: &str) -> ProductMappings {
        ProductMappings::from_json_str(json).unwrap()
    }

    #[test]
    fn validation_reports_every_missing_product() {
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}}"#);
        let names = vec![
            "Alpha 1.0".to_string(),
            "Beta 2.0".to_string(),
            "Gamma 3.0".to_string(),
        ];
        let gaps = validate_mappings(&names, &mappings).unwrap_err();
        assert_eq!(
            gaps,
            vec![
                MappingGap::Missing {
                    product: "beta".to_string()
                },
                MappingGap::Missing {
                    product: "gamma".to_string()
                },
            ]
        );
    }

    #[test]
    fn validation_reports_malformed_entries() {
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}}"#);
        let names = vec!["Alpha 1.0".to_string(), "Solo".to_string()];
        let gaps = validate_mappings(&names, &mappings).unwrap_err();
        assert_eq!(
            gaps,
            vec![MappingGap::Malformed {
                entry: "Solo".to_string()
            }]
        );
    }

    #[test]
    fn validation_passes_with_full_coverage() {
        let mappings = mappings(r#"{"alpha": {"repo": "a"}, "beta tools": {"repo": "b"}}"#);
        let names = vec!["Alpha 1.0".to_string(), "Beta Tools 2.0".to_string()];
        let entries = validate_mappings(&names, &mappings).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].product, "beta tools");
        assert_eq!(entries[1].version, "2.0");
    }

    #[tokio::test]
    async fn dispatches_one_workflow_per_entry() {
        let tracker = Arc::new(FakeTracker {
            names: vec!["Alpha 1.0", "Beta 2.0"],
        });
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = test_context(tracker, dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}, "beta": {"repo": "beta-repo"}}"#);

        let outcome = trigger_release_workflows(&ctx, &mappings, &args(false))
            .await
            .unwrap();

        let calls = dispatcher.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].repo, "alpha-repo");
        assert_eq!(calls[0].release_branch, "release/1.0");
        assert_eq!(calls[0].workflow_repo, "pdk-devops");
        assert_eq!(calls[0].workflow_id, "66795811");
        assert_eq!(calls[1].repo, "beta-repo");
        assert_eq!(calls[1].release_branch, "release/2.0");
        assert_eq!(
            outcome,
            ReleaseDispatchOutcome {
                dispatched: 2,
                skipped: 0,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn skipped_products_are_never_dispatched() {
        let tracker = Arc::new(FakeTracker {
            names: vec!["Alpha 3.0"],
        });
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = test_context(tracker, dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "r1", "skip": "true"}}"#);

        let outcome = trigger_release_workflows(&ctx, &mappings, &args(false))
            .await
            .unwrap();

        assert!(dispatcher.calls().is_empty());
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.dispatched, 0);
    }

    #[tokio::test]
    async fn dry_run_performs_no_dispatch_calls() {
        let tracker = Arc::new(FakeTracker {
            names: vec!["Alpha 1.0", "Beta 2.0"],
        });
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = test_context(tracker, dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "a"}, "beta": {"repo": "b"}}"#);

        let outcome = trigger_release_workflows(&ctx, &mappings, &args(true))
            .await
            .unwrap();

        assert!(dispatcher.calls().is_empty());
        assert_eq!(outcome.dispatched, 2);
    }

    #[tokio::test]
    async fn one_failed_dispatch_does_not_stop_the_rest() {
        let tracker = Arc::new(FakeTracker {
            names: vec!["Alpha 1.0", "Beta 2.0"],
        });
        let dispatcher = Arc::new(RecordingDispatcher::failing_for(&["alpha-repo"]));
        let ctx = test_context(tracker, dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}, "beta": {"repo": "beta-repo"}}"#);

        let outcome = trigger_release_workflows(&ctx, &mappings, &args(false))
            .await
            .unwrap();

        assert_eq!(dispatcher.calls().len(), 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.dispatched, 1);
    }

    #[tokio::test]
    async fn unmapped_product_aborts_before_any_dispatch() {
        let tracker = Arc::new(FakeTracker {
            names: vec!["Alpha 1.0", "Beta 2.0"],
        });
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = test_context(tracker, dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}}"#);

        let err = trigger_release_workflows(&ctx, &mappings, &args(false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(dispatcher.calls().is_empty());
    }

    #[tokio::test]
    async fn ticket_fetch_failure_aborts_before_any_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = test_context(Arc::new(FailingTracker), dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}}"#);

        let err = trigger_release_workflows(&ctx, &mappings, &args(false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IssueTracker(_)));
        assert!(dispatcher.calls().is_empty());
    }

    #[tokio::test]
    async fn ticket_without_release_entries_dispatches_nothing() {
        let tracker = Arc::new(FakeTracker { names: vec![] });
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = test_context(tracker, dispatcher.clone());
        let mappings = mappings(r#"{"alpha": {"repo": "alpha-repo"}}"#);

        let outcome = trigger_release_workflows(&ctx, &mappings, &args(false))
            .await
            .unwrap();

        assert!(dispatcher.calls().is_empty());
        assert_eq!(outcome, ReleaseDispatchOutcome::default());
    }
}
