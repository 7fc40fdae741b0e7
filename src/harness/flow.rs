//! The flow engine: per-row form submission and run-level reporting.
//!
//! One parametrized engine drives every flow. `submit_credentials` handles a
//! single credential row end to end; `run_flow` iterates a whole data set,
//! aggregates outcomes, and guarantees browser teardown whatever happens
//! inside the loop.

use std::collections::BTreeMap;
use std::fs;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::browser::FormDriver;
use crate::credentials::CredentialRow;
use crate::harness::classify::check_outcome;
use crate::harness::types::{
    CaseResult, FlowSpec, HarnessResult, Outcome, RunContext, RunSummary,
};

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Index → outcome mapping for every case that produced a result
    pub outcomes: BTreeMap<usize, Outcome>,

    /// Full manifest, as written to disk
    pub summary: RunSummary,
}

/// Drive one credential row through the flow: navigate, fill each field in
/// order, submit, and classify the outcome.
///
/// Interaction errors (a field or the submit control not appearing within the
/// bounded wait) propagate; detection errors after submission are classified
/// as [`Outcome::Error`] by the classifier and do not.
pub async fn submit_credentials(
    driver: &mut dyn FormDriver,
    spec: &FlowSpec,
    row: &CredentialRow,
    index: usize,
    ctx: &RunContext,
) -> HarnessResult<CaseResult> {
    info!(flow = %spec.name, index, username = %row.username, "Starting test case");

    driver.goto(&spec.url).await?;

    for field in &spec.fields {
        driver
            .fill_field(&field.element_id, field.source.value(row))
            .await?;
    }

    driver.click_submit(&spec.submit_class).await?;

    // The classifier's bounded wait on the notification element is the
    // synchronization point after submission.
    check_outcome(driver, spec, index, ctx).await
}

/// Run every credential row in file order, assigning sequential 1-based
/// indices, then log the summary, tear the session down, and write the run
/// manifest.
///
/// An error escaping a row halts the remaining rows; rows already classified
/// keep their outcomes. Teardown runs unconditionally and closes the browser
/// at most once.
pub async fn run_flow(
    driver: &mut dyn FormDriver,
    spec: &FlowSpec,
    rows: &[CredentialRow],
    ctx: &RunContext,
) -> HarnessResult<RunReport> {
    let started = Utc::now();
    let mut cases: Vec<CaseResult> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let index = i + 1;
        match submit_credentials(driver, spec, row, index, ctx).await {
            Ok(case) => cases.push(case),
            Err(err) => {
                error!(%err, index, "Error during test execution, halting remaining cases");
                break;
            }
        }
    }

    info!("=== TEST SUMMARY ===");
    for case in &cases {
        info!(index = case.index, outcome = %case.outcome, "Case result");
    }

    if let Err(err) = driver.close().await {
        warn!(%err, "Browser teardown failed");
    }

    let summary = RunSummary {
        flow: spec.name.clone(),
        release: ctx.release.clone(),
        hostname: hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string()),
        started,
        finished: Utc::now(),
        cases: cases.clone(),
    };
    write_manifest(&summary, ctx)?;

    let outcomes = cases.iter().map(|c| (c.index, c.outcome)).collect();
    Ok(RunReport { outcomes, summary })
}

/// Write the run manifest as pretty JSON into the release directory.
fn write_manifest(summary: &RunSummary, ctx: &RunContext) -> HarnessResult<()> {
    let release_dir = ctx.release_dir();
    fs::create_dir_all(&release_dir)?;
    let manifest_path = release_dir.join(format!("{}-run.json", summary.flow));
    fs::write(&manifest_path, serde_json::to_string_pretty(summary)?)?;
    info!(path = %manifest_path.display(), "Run manifest written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MockDriver;
    use pretty_assertions::assert_eq;

    fn row(username: &str) -> CredentialRow {
        CredentialRow {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "Pass123!".to_string(),
            confirm_password: "Pass123!".to_string(),
            extra: vec![],
        }
    }

    #[tokio::test]
    async fn test_submit_fills_fields_in_spec_order() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let ctx = RunContext::new("v1.0.0", tmp.path());
        let spec = FlowSpec::signup("https://app.example.com");
        let mut driver = MockDriver::new().push_toast("Toastify__toast success", "ok");

        submit_credentials(&mut driver, &spec, &row("alice"), 1, &ctx)
            .await
            .unwrap();

        assert_eq!(driver.visited, vec!["https://app.example.com/signup".to_string()]);
        let ids: Vec<&str> = driver.filled.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["username", "email", "password", "confirmPassword"]);
        assert_eq!(driver.filled[1].1, "alice@example.com");
        assert_eq!(driver.clicked, vec!["sign-up".to_string()]);
    }

    #[tokio::test]
    async fn test_run_flow_writes_manifest() {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let ctx = RunContext::new("v1.0.0", tmp.path());
        let spec = FlowSpec::signup("https://app.example.com");
        let mut driver = MockDriver::new().push_toast("Toastify__toast success", "ok");

        let report = run_flow(&mut driver, &spec, &[row("alice")], &ctx)
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 1);
        let manifest = tmp.path().join("v1.0.0").join("signup-run.json");
        assert!(manifest.exists(), "Run manifest not written");

        let parsed: RunSummary =
            serde_json::from_str(&std::fs::read_to_string(manifest).unwrap()).unwrap();
        assert_eq!(parsed.flow, "signup");
        assert_eq!(parsed.cases.len(), 1);
        assert_eq!(parsed.cases[0].outcome, Outcome::Success);
    }
}
