//! Workspace-database HTTP client
//!
//! Talks to the Notion-style data-source API: queries the tasks and projects
//! data sources and patches per-task Printed/Done properties. Everything the
//! rest of the service sees is the typed [`Task`] model.

use std::collections::{HashMap, HashSet};

use chrono::Local;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument};

use super::cache::ProjectCache;
use super::model::Task;
use super::parse::{parse_task_page, referenced_project_ids};
use super::sort::{is_print_eligible, is_summary_eligible, sort_tasks};
use crate::utils::AppError;

const API_BASE: &str = "https://api.notion.com/v1";
const API_VERSION: &str = "2025-09-03";

#[derive(Debug, Error)]
pub enum TaskStoreError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Task not found: {0}")]
    NotFound(String),
}

pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

impl From<TaskStoreError> for AppError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// Workspace database client
///
/// Owns the project-name cache; see [`ProjectCache`] for the
/// invalidate-on-miss policy.
pub struct TaskStore {
    http: reqwest::Client,
    api_base: String,
    token: String,
    tasks_source: String,
    projects_source: String,
    projects: ProjectCache,
}

impl TaskStore {
    pub fn new(
        token: impl Into<String>,
        tasks_source: impl Into<String>,
        projects_source: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: API_BASE.to_string(),
            token: token.into(),
            tasks_source: tasks_source.into(),
            projects_source: projects_source.into(),
            projects: ProjectCache::new(),
        }
    }

    /// Point the client at a different API base (for tests against a stub)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    // ========== Task queries ==========

    /// Tasks eligible for the print batch, in print order
    ///
    /// Not done, planned start absent or no later than today, not printed.
    #[instrument(skip(self))]
    pub async fn eligible_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let today = Local::now().date_naive();
        let mut tasks = self.fetch_tasks(eligibility_filter(true)).await?;
        // The server-side filter already enforces this; re-check locally so a
        // lagging upstream index can never double-print a task
        tasks.retain(|t| is_print_eligible(t, today));
        Ok(tasks)
    }

    /// Tasks for the daily summary, in print order
    ///
    /// Same as the print batch but ignores the printed flag.
    #[instrument(skip(self))]
    pub async fn summary_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let today = Local::now().date_naive();
        let mut tasks = self.fetch_tasks(eligibility_filter(false)).await?;
        tasks.retain(|t| is_summary_eligible(t, today));
        Ok(tasks)
    }

    /// Retrieve one task by id
    #[instrument(skip(self))]
    pub async fn task_details(&self, id: &str) -> TaskStoreResult<Task> {
        let url = format!("{}/pages/{}", self.api_base, id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", API_VERSION)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(TaskStoreError::NotFound(id.to_string()));
        }
        let page: Value = Self::checked_json(response).await?;

        let ids = referenced_project_ids(std::slice::from_ref(&page));
        let projects = self.projects_for(&ids).await?;
        Ok(parse_task_page(&page, &projects))
    }

    // ========== Task updates ==========

    /// Set the task's Printed checkbox
    #[instrument(skip(self))]
    pub async fn mark_printed(&self, id: &str) -> TaskStoreResult<()> {
        self.update_page(id, json!({ "Printed": { "checkbox": true } }))
            .await
    }

    /// Clear the task's Printed checkbox
    #[instrument(skip(self))]
    pub async fn unmark_printed(&self, id: &str) -> TaskStoreResult<()> {
        self.update_page(id, json!({ "Printed": { "checkbox": false } }))
            .await
    }

    /// Move the task to the Done status
    #[instrument(skip(self))]
    pub async fn mark_done(&self, id: &str) -> TaskStoreResult<()> {
        self.update_page(id, json!({ "Done": { "status": { "name": "Done" } } }))
            .await
    }

    // ========== Internals ==========

    async fn fetch_tasks(&self, filter: Value) -> TaskStoreResult<Vec<Task>> {
        let pages = self.query_source(&self.tasks_source, filter).await?;

        let ids = referenced_project_ids(&pages);
        let projects = self.projects_for(&ids).await?;

        let mut tasks: Vec<Task> = pages
            .iter()
            .map(|page| parse_task_page(page, &projects))
            .collect();
        sort_tasks(&mut tasks);

        debug!(count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    /// Resolve project names for the referenced ids, refetching the cache
    /// once when it does not cover them
    async fn projects_for(
        &self,
        ids: &HashSet<String>,
    ) -> TaskStoreResult<HashMap<String, String>> {
        if let Some(map) = self.projects.get_covering(ids).await {
            return Ok(map);
        }

        self.projects.invalidate().await;
        let map = self.fetch_projects().await?;
        self.projects.store(map.clone()).await;
        Ok(map)
    }

    /// Fetch the full (non-archived) project id → name map
    async fn fetch_projects(&self) -> TaskStoreResult<HashMap<String, String>> {
        let filter = json!({
            "property": "Archive",
            "checkbox": { "equals": false }
        });
        let pages = self.query_source(&self.projects_source, filter).await?;

        let map = pages
            .iter()
            .filter_map(|page| {
                let id = page["id"].as_str()?;
                let name = page["properties"]["Name"]["title"]
                    .as_array()
                    .and_then(|a| a.first())
                    .and_then(|f| f["plain_text"].as_str())
                    .unwrap_or_default();
                Some((id.to_string(), name.to_string()))
            })
            .collect();

        debug!("Projects cache refreshed");
        Ok(map)
    }

    async fn query_source(&self, source_id: &str, filter: Value) -> TaskStoreResult<Vec<Value>> {
        let url = format!("{}/data_sources/{}/query", self.api_base, source_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", API_VERSION)
            .json(&json!({ "filter": filter }))
            .send()
            .await?;

        let body: Value = Self::checked_json(response).await?;
        Ok(body["results"].as_array().cloned().unwrap_or_default())
    }

    async fn update_page(&self, id: &str, properties: Value) -> TaskStoreResult<()> {
        let url = format!("{}/pages/{}", self.api_base, id);
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", API_VERSION)
            .json(&json!({ "properties": properties }))
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(TaskStoreError::NotFound(id.to_string()));
        }
        Self::checked_json::<Value>(response).await?;
        Ok(())
    }

    async fn checked_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> TaskStoreResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TaskStoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

/// Build the eligibility filter for the tasks data source
///
/// Two OR branches because the API cannot express "absent or on-or-before"
/// in one date condition: one branch for planned start on or before today,
/// one for no planned start at all. `require_unprinted` adds the printed
/// clause used by the print batch and dropped by the summary.
fn eligibility_filter(require_unprinted: bool) -> Value {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    let mut started = vec![
        json!({ "property": "Done", "status": { "does_not_equal": "Done" } }),
        json!({ "property": "Planned start", "date": { "on_or_before": today } }),
    ];
    let mut unplanned = vec![
        json!({ "property": "Done", "status": { "does_not_equal": "Done" } }),
        json!({ "property": "Planned start", "date": { "is_empty": true } }),
    ];

    if require_unprinted {
        let unprinted = json!({ "property": "Printed", "checkbox": { "equals": false } });
        started.push(unprinted.clone());
        unplanned.push(unprinted);
    }

    json!({
        "or": [
            { "and": started },
            { "and": unplanned },
        ]
    })
}
