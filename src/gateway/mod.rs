//! Gateway orchestration.
//!
//! [`Gateway`] ties the pipeline together for every operation: compose a
//! prompt from domain objects, check the response cache, call the
//! completion endpoint, recover structure where the operation is
//! structured, apply contract defaults, and store the result. Free-text
//! operations skip extraction; analysis-style operations over live project
//! state skip the cache (stale summaries are worse than a second call).

mod builder;

pub use builder::{Muninn, MuninnBuilder};

use serde_json::{Map, Value};

use crate::cache::{RequestIdentity, ResponseCache, derive_key};
use crate::client::CompletionClient;
use crate::contracts::{Contract, DefaultContext};
use crate::prompt;
use crate::types::{ChatTurn, Project, Resource, Task};
use crate::{MuninnError, Result};

/// Orchestrates completion calls with caching and structured recovery.
///
/// Build one per process via [`Muninn::builder`] and share it; all methods
/// take `&self`.
#[derive(Debug)]
pub struct Gateway {
    client: CompletionClient,
    cache: ResponseCache,
}

impl Gateway {
    pub(crate) fn new(client: CompletionClient, cache: ResponseCache) -> Self {
        Self { client, cache }
    }

    /// The response cache, for operability endpoints (stats, clear).
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Probe the completion endpoint with a tiny generation request.
    pub async fn ping(&self) -> Result<()> {
        self.client.ping().await
    }

    /// Analyze a task into its structured parameters (type, keywords,
    /// complexity, time estimate).
    ///
    /// Cached per task id: repeated analyses of the same task return the
    /// stored object without an upstream call.
    pub async fn analyze_task(&self, task: &Task) -> Result<Map<String, Value>> {
        let key = derive_key(&format!("task_analysis:{}", task.id));
        if let Some(Value::Object(cached)) = self.cache.get(&key) {
            return Ok(cached);
        }

        let prompt = prompt::task_analysis(task);
        let ctx = DefaultContext {
            task: Some(task),
            resources: &[],
        };
        let object = self
            .client
            .complete_structured(&prompt, Some(Contract::TaskAnalysis), &ctx)
            .await?;
        self.cache.set(&key, Value::Object(object.clone()), None);
        Ok(object)
    }

    /// Pick the most suitable resource for a single task.
    ///
    /// Cached per task id. Candidates must include at least one available
    /// human resource; the composed prompt requires the model to assign a
    /// developer from that list.
    ///
    /// # Errors
    ///
    /// [`MuninnError::InvalidInput`] when no candidate is an available
    /// human resource.
    pub async fn assign_task_resources(
        &self,
        task: &Task,
        resources: &[Resource],
    ) -> Result<Map<String, Value>> {
        require_available_human(resources)?;

        let key = derive_key(&format!("resource_assignment:{}", task.id));
        if let Some(Value::Object(cached)) = self.cache.get(&key) {
            return Ok(cached);
        }

        let prompt = prompt::resource_assignment(task, resources);
        let ctx = DefaultContext {
            task: Some(task),
            resources,
        };
        let object = self
            .client
            .complete_structured(&prompt, Some(Contract::ResourceAssignment), &ctx)
            .await?;
        self.cache.set(&key, Value::Object(object.clone()), None);
        Ok(object)
    }

    /// Assign resources across all of a project's tasks.
    ///
    /// Uncached: the answer depends on the full task/resource snapshot, not
    /// on a stable identity.
    pub async fn assign_project_resources(
        &self,
        project: &Project,
        tasks: &[Task],
        resources: &[Resource],
    ) -> Result<Map<String, Value>> {
        require_available_human(resources)?;

        let prompt = prompt::project_resource_assignment(project, tasks, resources);
        self.client
            .complete_structured(&prompt, None, &DefaultContext::default())
            .await
    }

    /// Generate an executive report over a project's current state.
    ///
    /// Uncached: it summarizes live progress.
    pub async fn analyze_project(&self, project: &Project, tasks: &[Task]) -> Result<String> {
        let prompt = prompt::project_analysis(project, tasks);
        self.client.complete(&prompt, None).await
    }

    /// Generate technical documentation for a task. Uncached.
    pub async fn document_task(&self, task: &Task) -> Result<String> {
        let prompt = prompt::task_documentation(task);
        self.client.complete(&prompt, None).await
    }

    /// Estimate how long a task will take, optionally tailored to the
    /// developer who would do it.
    ///
    /// Uncached: the estimate depends on which developer is passed.
    pub async fn estimate_task_time(
        &self,
        task: &Task,
        developer: Option<&Resource>,
    ) -> Result<Map<String, Value>> {
        let prompt = prompt::time_estimation(task, developer);
        let ctx = DefaultContext {
            task: Some(task),
            resources: &[],
        };
        self.client
            .complete_structured(&prompt, Some(Contract::TimeEstimation), &ctx)
            .await
    }

    /// Continue a free-form chat conversation.
    ///
    /// `identity.prompt` is the user's current message; `history` holds the
    /// prior turns in any order (they are linearized oldest-first). Cached
    /// by the full identity, so the same message in a different task or
    /// project scope is a separate entry.
    pub async fn continue_chat(
        &self,
        identity: &RequestIdentity,
        history: &[ChatTurn],
    ) -> Result<String> {
        let key = derive_key(identity);
        if let Some(Value::String(cached)) = self.cache.get(&key) {
            return Ok(cached);
        }

        let prompt = prompt::chat_continuation(&identity.prompt, history);
        let text = self.client.complete(&prompt, None).await?;
        self.cache.set(&key, Value::String(text.clone()), None);
        Ok(text)
    }

    /// Generate code for a request, optionally grounded in a task's
    /// context. Cached by the full identity.
    pub async fn suggest_code(
        &self,
        identity: &RequestIdentity,
        task: Option<&Task>,
    ) -> Result<String> {
        let key = derive_key(identity);
        if let Some(Value::String(cached)) = self.cache.get(&key) {
            return Ok(cached);
        }

        let prompt = prompt::code_suggestion(&identity.prompt, task);
        let text = self.client.complete(&prompt, None).await?;
        self.cache.set(&key, Value::String(text.clone()), None);
        Ok(text)
    }
}

fn require_available_human(resources: &[Resource]) -> Result<()> {
    if resources.iter().any(|r| r.is_human && r.is_available) {
        Ok(())
    } else {
        Err(MuninnError::InvalidInput(
            "no available human resource among the candidates".to_string(),
        ))
    }
}
