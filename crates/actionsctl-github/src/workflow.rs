use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// A workflow definition as reported by the Actions API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_url: Option<String>,
}

/// One page of workflows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workflows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable: Option<WorkflowEnvironment>,
}

/// Billable time per runner operating system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEnvironment {
    #[serde(rename = "UBUNTU", default, skip_serializing_if = "Option::is_none")]
    pub ubuntu: Option<WorkflowBill>,
    #[serde(rename = "MACOS", default, skip_serializing_if = "Option::is_none")]
    pub macos: Option<WorkflowBill>,
    #[serde(rename = "WINDOWS", default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<WorkflowBill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowBill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_ms: Option<i64>,
}

/// Body of a `workflow_dispatch` trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorkflowDispatchEventRequest {
    #[serde(rename = "ref")]
    pub ref_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<HashMap<String, Value>>,
}

impl CreateWorkflowDispatchEventRequest {
    pub fn new(ref_: impl Into<String>) -> Self {
        Self {
            ref_: ref_.into(),
            inputs: None,
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Pagination parameters. Unset fields are left off the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub(crate) fn append_to(&self, url: &mut Url) {
        let pairs: Vec<(&str, String)> = [("page", self.page), ("per_page", self.per_page)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
            .collect();

        // query_pairs_mut() leaves a bare `?` behind even when nothing is appended
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }
}

/// Either form the API accepts in the `{workflow_id}` path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkflowId {
    Id(i64),
    FileName(String),
}

impl WorkflowId {
    /// Reads an all-digit argument as an ID and anything else as a file name.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::FileName(raw.to_string()),
        }
    }

    pub(crate) fn segment(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::FileName(name) => name.clone(),
        }
    }
}

impl From<i64> for WorkflowId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for WorkflowId {
    fn from(name: &str) -> Self {
        Self::FileName(name.to_string())
    }
}

impl From<String> for WorkflowId {
    fn from(name: String) -> Self {
        Self::FileName(name)
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::FileName(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_workflow_decodes_timestamps() {
        let workflow: Workflow = serde_json::from_str(
            r#"{"id":72844,"created_at":"2019-01-02T15:04:05Z","updated_at":"2020-01-02T15:04:05Z"}"#,
        )
        .unwrap();

        assert_eq!(workflow.id, Some(72844));
        assert_eq!(
            workflow.created_at,
            Some(Utc.with_ymd_and_hms(2019, 1, 2, 15, 4, 5).unwrap())
        );
        assert_eq!(
            workflow.updated_at,
            Some(Utc.with_ymd_and_hms(2020, 1, 2, 15, 4, 5).unwrap())
        );
        assert_eq!(workflow.name, None);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let workflow: Workflow = serde_json::from_str("{}").unwrap();
        assert_eq!(workflow, Workflow::default());
        assert_eq!(serde_json::to_value(&workflow).unwrap(), json!({}));

        let zero: Workflow = serde_json::from_str(r#"{"id":0}"#).unwrap();
        assert_eq!(zero.id, Some(0));
        assert_eq!(serde_json::to_value(&zero).unwrap(), json!({"id": 0}));
    }

    #[test]
    fn test_malformed_timestamp_is_decode_error() {
        let result = serde_json::from_str::<Workflow>(r#"{"created_at":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_usage_keeps_os_buckets_apart() {
        let usage: WorkflowUsage = serde_json::from_str(
            r#"{"billable":{"UBUNTU":{"total_ms":180000},"WINDOWS":{}}}"#,
        )
        .unwrap();

        let billable = usage.billable.unwrap();
        assert_eq!(billable.ubuntu.unwrap().total_ms, Some(180000));
        assert_eq!(billable.macos, None);
        assert_eq!(billable.windows, Some(WorkflowBill { total_ms: None }));
    }

    #[test]
    fn test_dispatch_request_field_names() {
        let event = CreateWorkflowDispatchEventRequest::new("d4cfb6e7").with_input("key", "value");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"ref": "d4cfb6e7", "inputs": {"key": "value"}})
        );

        let bare = CreateWorkflowDispatchEventRequest::new("main");
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({"ref": "main"}));
    }

    #[test]
    fn test_list_options_query() {
        let base = Url::parse("https://api.github.com/repos/o/r/actions/workflows").unwrap();

        let mut url = base.clone();
        ListOptions::new(2, 2).append_to(&mut url);
        assert_eq!(url.query(), Some("page=2&per_page=2"));

        let mut url = base.clone();
        ListOptions {
            page: None,
            per_page: Some(50),
        }
        .append_to(&mut url);
        assert_eq!(url.query(), Some("per_page=50"));

        let mut url = base;
        ListOptions::default().append_to(&mut url);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_workflow_id_parse() {
        assert_eq!(WorkflowId::parse("72844"), WorkflowId::Id(72844));
        assert_eq!(
            WorkflowId::parse("main.yml"),
            WorkflowId::FileName("main.yml".to_string())
        );
        assert_eq!(WorkflowId::from(7).to_string(), "7");
    }
}
