pub mod actions;
pub mod client;
pub mod error;
pub mod repository;
pub mod response;
pub mod workflow;

// Re-exports
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use repository::Repository;
pub use response::{Rate, Response, ResponseMeta};
pub use workflow::{
    CreateWorkflowDispatchEventRequest, ListOptions, Workflow, WorkflowBill, WorkflowEnvironment,
    WorkflowId, WorkflowUsage, Workflows,
};
