//! Task domain type and the upstream field-mapping table.
//!
//! The project-management backend has shipped several generations of its
//! task payload (`status` vs `statusDisplay`, `type` vs `typeDisplay`, …).
//! Rather than hardcoding one generation, [`TaskFieldMap`] declares, per
//! logical field, the upstream field names to try in order. The default
//! map prefers the display-name fields of the latest payloads and falls
//! back to the raw fields of older ones. Deployments can override the map
//! in configuration (`[fields]` section).

use serde::{Deserialize, Serialize};

use crate::{MuninnError, Result};
use serde_json::Value;

/// A task as handed to prompt composition and domain defaulting.
///
/// All fields except `id` are optional; composition renders explicit
/// "not specified" markers for anything missing rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Name of the project the task belongs to.
    pub project_name: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub task_type: Option<String>,
    pub phase: Option<String>,
    pub tags: Vec<String>,
    /// Numeric difficulty on a 1–5 scale.
    pub difficulty: Option<u8>,
    /// Estimated duration in days.
    pub estimated_duration: Option<u32>,
}

impl Task {
    /// Map a raw upstream JSON payload into a validated `Task`.
    ///
    /// Returns `InvalidInput` when the payload is not an object or has no
    /// usable id. Every other field defaults to absent when the mapped
    /// upstream fields are missing or have an unusable shape.
    pub fn from_value(value: &Value, fields: &TaskFieldMap) -> Result<Self> {
        if !value.is_object() {
            return Err(MuninnError::InvalidInput(
                "task payload is not a JSON object".into(),
            ));
        }

        let id = first_scalar(value, &fields.id).ok_or_else(|| {
            MuninnError::InvalidInput("task payload has no usable id field".into())
        })?;

        Ok(Self {
            id,
            title: first_string(value, &fields.title),
            description: first_string(value, &fields.description),
            project_name: first_string(value, &fields.project_name),
            status: first_string(value, &fields.status),
            priority: first_string(value, &fields.priority),
            task_type: first_string(value, &fields.task_type),
            phase: first_string(value, &fields.phase),
            tags: first_tags(value, &fields.tags),
            difficulty: first_u64(value, &fields.difficulty).map(|d| d.min(u8::MAX as u64) as u8),
            estimated_duration: first_u64(value, &fields.estimated_duration)
                .map(|d| d.min(u32::MAX as u64) as u32),
        })
    }
}

/// Upstream field names per logical task field, tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFieldMap {
    pub id: Vec<String>,
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub project_name: Vec<String>,
    pub status: Vec<String>,
    pub priority: Vec<String>,
    pub task_type: Vec<String>,
    pub phase: Vec<String>,
    pub tags: Vec<String>,
    pub difficulty: Vec<String>,
    pub estimated_duration: Vec<String>,
}

impl Default for TaskFieldMap {
    fn default() -> Self {
        Self {
            id: names(&["id"]),
            title: names(&["title"]),
            description: names(&["description"]),
            project_name: names(&["project.name", "projectName"]),
            status: names(&["statusDisplay", "status"]),
            priority: names(&["priorityDisplay", "priority"]),
            task_type: names(&["typeDisplay", "type"]),
            phase: names(&["phaseDisplay", "phase"]),
            tags: names(&["tags"]),
            difficulty: names(&["difficulty"]),
            estimated_duration: names(&["estimatedDuration"]),
        }
    }
}

fn names(n: &[&str]) -> Vec<String> {
    n.iter().map(|s| s.to_string()).collect()
}

/// Resolve a dotted path (`project.name`) against a JSON object.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, segment| v.get(segment))
}

fn first_value<'a>(value: &'a Value, candidates: &[String]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| lookup(value, path))
        .find(|v| !v.is_null())
}

fn first_string(value: &Value, candidates: &[String]) -> Option<String> {
    match first_value(value, candidates)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Accept a string or a number as an identifier.
fn first_scalar(value: &Value, candidates: &[String]) -> Option<String> {
    match first_value(value, candidates)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_u64(value: &Value, candidates: &[String]) -> Option<u64> {
    match first_value(value, candidates)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Tags arrive as an array of strings in current payloads and as a
/// comma-separated string in older ones.
fn first_tags(value: &Value, candidates: &[String]) -> Vec<String> {
    match first_value(value, candidates) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
