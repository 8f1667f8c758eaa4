//! Domain defaulting for structured-output contracts.
//!
//! LLM output is unreliable: fields come back missing, empty, or stubbed
//! with placeholder text. Each contract here defines, once, which fields
//! are required and how to fill a gap from the original request context —
//! the policy is best-effort usable result over fail fast, so defaulting
//! absorbs incompleteness and never raises.
//!
//! Defaulting is strictly fill-in-the-gaps: a field that is present and
//! non-placeholder is never overwritten, even when the context holds
//! different data. Applying the same defaults twice is a no-op.

use serde_json::{Map, Value};

use crate::telemetry;
use crate::types::{Resource, Task};

/// Placeholder strings models echo back instead of real values.
const PLACEHOLDER_SENTINELS: &[&str] = &["No title provided", "No estimate provided"];

/// A structured-output contract with known defaulting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    TaskAnalysis,
    ResourceAssignment,
    TimeEstimation,
}

impl Contract {
    /// Resolve a contract hint by name. Unknown hints yield `None`, which
    /// makes [`apply_defaults`] a passthrough.
    pub fn parse(hint: &str) -> Option<Self> {
        match hint {
            "task_analysis" => Some(Self::TaskAnalysis),
            "resource_assignment" => Some(Self::ResourceAssignment),
            "time_estimation" => Some(Self::TimeEstimation),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskAnalysis => "task_analysis",
            Self::ResourceAssignment => "resource_assignment",
            Self::TimeEstimation => "time_estimation",
        }
    }
}

/// The original request context defaulting draws fills from.
///
/// Cheap read-only view; an empty context is valid and degrades every fill
/// to its static fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContext<'a> {
    pub task: Option<&'a Task>,
    pub resources: &'a [Resource],
}

/// Fill missing, empty, or placeholder fields of a parsed payload.
///
/// Only operates when `contract` names known rules; `None` (or a contract
/// without fill rules) passes the object through untouched. Never fails,
/// never touches network or cache.
pub fn apply_defaults(
    contract: Option<Contract>,
    mut object: Map<String, Value>,
    ctx: &DefaultContext<'_>,
) -> Map<String, Value> {
    match contract {
        Some(Contract::TaskAnalysis) => {
            apply_task_analysis(&mut object, ctx);
            object
        }
        Some(Contract::ResourceAssignment) => {
            apply_resource_assignment(&mut object, ctx);
            object
        }
        // Known contract, no fill rules.
        Some(Contract::TimeEstimation) => object,
        None => object,
    }
}

/// Map a 1–5 difficulty rating to the fixed three-level complexity band.
pub fn difficulty_band(difficulty: u8) -> &'static str {
    match difficulty {
        1 | 2 => "Baja",
        3 => "Media",
        _ => "Alta",
    }
}

fn apply_task_analysis(object: &mut Map<String, Value>, ctx: &DefaultContext<'_>) {
    let task = ctx.task;

    let title = task
        .and_then(|t| t.title.clone())
        .unwrap_or_else(|| "No title provided".to_string());
    fill(object, Contract::TaskAnalysis, "tarea", || {
        Value::String(title.clone())
    });

    fill(object, Contract::TaskAnalysis, "tipo", || {
        Value::String(
            task.and_then(|t| t.task_type.clone())
                .unwrap_or_else(|| "Unspecified".to_string()),
        )
    });

    fill(object, Contract::TaskAnalysis, "palabras_clave", || {
        let tags: Vec<Value> = task
            .map(|t| t.tags.iter().map(|tag| Value::String(tag.clone())).collect())
            .unwrap_or_default();
        if tags.is_empty() {
            Value::Array(vec![Value::String("unspecified".to_string())])
        } else {
            Value::Array(tags)
        }
    });

    fill(object, Contract::TaskAnalysis, "complejidad", || {
        Value::String(
            task.and_then(|t| t.difficulty)
                .map(difficulty_band)
                .unwrap_or("Media")
                .to_string(),
        )
    });

    fill(object, Contract::TaskAnalysis, "tiempo_estimado", || {
        Value::String(
            task.and_then(|t| t.estimated_duration)
                .map(|days| format!("{days} días"))
                .unwrap_or_else(|| "3 días".to_string()),
        )
    });
}

fn apply_resource_assignment(object: &mut Map<String, Value>, ctx: &DefaultContext<'_>) {
    if let Some(title) = ctx.task.and_then(|t| t.title.clone()) {
        fill(object, Contract::ResourceAssignment, "tarea", || {
            Value::String(title.clone())
        });
    }

    // The whole point of this contract is a named developer. When the model
    // skipped or stubbed the assignment, rebuild it from the first available
    // human resource in context.
    let has_developer = object
        .get("recurso_asignado")
        .and_then(|v| v.get("desarrollador"))
        .is_some_and(|v| !is_placeholder(v));
    if has_developer {
        return;
    }

    let Some(human) = ctx.resources.iter().find(|r| r.is_human && r.is_available) else {
        // Nothing to fill from; leave the payload as the model produced it.
        return;
    };

    let mut assignment = Map::new();
    assignment.insert(
        "desarrollador".to_string(),
        Value::String(human.name.clone()),
    );
    assignment.insert(
        "nivel".to_string(),
        Value::String(
            human
                .experience
                .clone()
                .unwrap_or_else(|| "No especificado".to_string()),
        ),
    );
    assignment.insert(
        "tecnología".to_string(),
        Value::String(
            human
                .technologies
                .first()
                .cloned()
                .unwrap_or_else(|| "No especificado".to_string()),
        ),
    );
    assignment.insert("herramientas".to_string(), Value::Array(Vec::new()));

    note_fill(Contract::ResourceAssignment, "recurso_asignado");
    object.insert("recurso_asignado".to_string(), Value::Object(assignment));
}

/// Insert `value()` under `field` when the current value is absent, empty,
/// or a placeholder. Present non-placeholder values are left untouched.
fn fill<F>(object: &mut Map<String, Value>, contract: Contract, field: &str, value: F)
where
    F: FnOnce() -> Value,
{
    let needs_fill = object.get(field).is_none_or(is_placeholder);
    if needs_fill {
        note_fill(contract, field);
        object.insert(field.to_string(), value());
    }
}

fn note_fill(contract: Contract, field: &str) {
    tracing::warn!(
        contract = contract.name(),
        field,
        "missing or placeholder field in model output, filling from context"
    );
    metrics::counter!(
        telemetry::DEFAULTED_FIELDS_TOTAL,
        "contract" => contract.name(),
        "field" => field.to_string(),
    )
    .increment(1);
}

fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || PLACEHOLDER_SENTINELS.contains(&s.as_str()),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
