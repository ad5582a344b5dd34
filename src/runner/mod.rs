//! Run orchestration: the resolution context, bounded retry, and the
//! end-to-end setup workflow.

pub mod context;
pub mod retry;
pub mod workflow;

pub use context::ResolutionContext;
pub use retry::{resolve_version, RetryPolicy};
pub use workflow::{RunOptions, SetupWorkflow, WorkflowContext};
