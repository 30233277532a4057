//! GitHub Actions workflow endpoints.
//!
//! Every operation comes in an `_by_id` and a `_by_file_name` flavour. Both
//! resolve through one private path builder, so the only difference is
//! the shape of the `{workflow_id}` path segment.

use crate::{
    CreateWorkflowDispatchEventRequest, GitHubClient, ListOptions, Response, Result, Workflow,
    WorkflowId, WorkflowUsage, Workflows,
};
use reqwest::Method;
use url::Url;

impl GitHubClient {
    /// `/repos/{owner}/{repo}/actions/workflows[/{workflow}[/{action}]]`
    fn workflow_url(
        &self,
        owner: &str,
        repo: &str,
        workflow: Option<&WorkflowId>,
        action: Option<&str>,
    ) -> Result<Url> {
        let segment = workflow.map(WorkflowId::segment);
        let mut segments = vec!["repos", owner, repo, "actions", "workflows"];
        segments.extend(segment.as_deref());
        segments.extend(action);

        self.endpoint(&segments)
    }

    /// List the workflows defined in a repository, one page at a time.
    pub async fn list_workflows(
        &self,
        owner: &str,
        repo: &str,
        opts: &ListOptions,
    ) -> Result<Response<Workflows>> {
        let mut url = self.workflow_url(owner, repo, None, None)?;
        opts.append_to(&mut url);

        let request = self.build_request(Method::GET, url)?;
        self.execute(request).await
    }

    pub async fn get_workflow_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
    ) -> Result<Response<Workflow>> {
        self.get_workflow(owner, repo, &WorkflowId::Id(workflow_id))
            .await
    }

    pub async fn get_workflow_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
    ) -> Result<Response<Workflow>> {
        self.get_workflow(owner, repo, &WorkflowId::from(file_name))
            .await
    }

    /// Fetch a single workflow by either identifier form.
    pub async fn get_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow: &WorkflowId,
    ) -> Result<Response<Workflow>> {
        let url = self.workflow_url(owner, repo, Some(workflow), None)?;
        let request = self.build_request(Method::GET, url)?;
        self.execute(request).await
    }

    pub async fn get_workflow_usage_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
    ) -> Result<Response<WorkflowUsage>> {
        self.get_workflow_usage(owner, repo, &WorkflowId::Id(workflow_id))
            .await
    }

    pub async fn get_workflow_usage_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
    ) -> Result<Response<WorkflowUsage>> {
        self.get_workflow_usage(owner, repo, &WorkflowId::from(file_name))
            .await
    }

    /// Billable minutes for the current billing cycle, split by runner OS.
    pub async fn get_workflow_usage(
        &self,
        owner: &str,
        repo: &str,
        workflow: &WorkflowId,
    ) -> Result<Response<WorkflowUsage>> {
        let url = self.workflow_url(owner, repo, Some(workflow), Some("timing"))?;
        let request = self.build_request(Method::GET, url)?;
        self.execute(request).await
    }

    pub async fn create_workflow_dispatch_event_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
        event: &CreateWorkflowDispatchEventRequest,
    ) -> Result<Response<()>> {
        self.create_workflow_dispatch_event(owner, repo, &WorkflowId::Id(workflow_id), event)
            .await
    }

    pub async fn create_workflow_dispatch_event_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
        event: &CreateWorkflowDispatchEventRequest,
    ) -> Result<Response<()>> {
        self.create_workflow_dispatch_event(owner, repo, &WorkflowId::from(file_name), event)
            .await
    }

    /// Trigger a `workflow_dispatch` run on `event.ref_`.
    pub async fn create_workflow_dispatch_event(
        &self,
        owner: &str,
        repo: &str,
        workflow: &WorkflowId,
        event: &CreateWorkflowDispatchEventRequest,
    ) -> Result<Response<()>> {
        let url = self.workflow_url(owner, repo, Some(workflow), Some("dispatches"))?;
        let request = self.build_json_request(Method::POST, url, event)?;

        tracing::info!(
            "Dispatching workflow {} on {} for {}/{}",
            workflow,
            event.ref_,
            owner,
            repo
        );

        self.execute_empty(request).await
    }

    pub async fn enable_workflow_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
    ) -> Result<Response<()>> {
        self.set_workflow_state(owner, repo, &WorkflowId::Id(workflow_id), "enable")
            .await
    }

    pub async fn enable_workflow_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
    ) -> Result<Response<()>> {
        self.set_workflow_state(owner, repo, &WorkflowId::from(file_name), "enable")
            .await
    }

    pub async fn disable_workflow_by_id(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: i64,
    ) -> Result<Response<()>> {
        self.set_workflow_state(owner, repo, &WorkflowId::Id(workflow_id), "disable")
            .await
    }

    pub async fn disable_workflow_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
    ) -> Result<Response<()>> {
        self.set_workflow_state(owner, repo, &WorkflowId::from(file_name), "disable")
            .await
    }

    pub async fn enable_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow: &WorkflowId,
    ) -> Result<Response<()>> {
        self.set_workflow_state(owner, repo, workflow, "enable").await
    }

    pub async fn disable_workflow(
        &self,
        owner: &str,
        repo: &str,
        workflow: &WorkflowId,
    ) -> Result<Response<()>> {
        self.set_workflow_state(owner, repo, workflow, "disable").await
    }

    // Sent with no body, not even `{}`.
    async fn set_workflow_state(
        &self,
        owner: &str,
        repo: &str,
        workflow: &WorkflowId,
        action: &str,
    ) -> Result<Response<()>> {
        let url = self.workflow_url(owner, repo, Some(workflow), Some(action))?;
        let request = self.build_request(Method::PUT, url)?;

        tracing::info!("{} workflow {} in {}/{}", action, workflow, owner, repo);

        self.execute_empty(request).await
    }
}
