pub mod classify;
pub mod flow;
pub mod types;

pub use classify::{check_outcome, classify_class, screenshot_name, SUCCESS_CLASS_MARKER};
pub use flow::{run_flow, submit_credentials, RunReport};
pub use types::{
    CaseResult, CredentialField, FieldSpec, FlowSpec, HarnessError, HarnessResult, Outcome,
    RunContext, RunSummary,
};
