//! Tests for contract defaulting — fill-in-the-gaps from request context.

use muninn::types::{Resource, Task};
use muninn::{Contract, DefaultContext, apply_defaults};
use serde_json::{Map, Value, json};

fn as_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}

fn sample_task() -> Task {
    Task {
        id: "42".to_string(),
        title: Some("Fix login bug".to_string()),
        task_type: Some("Bugfix".to_string()),
        tags: vec!["auth".to_string(), "backend".to_string()],
        difficulty: Some(4),
        estimated_duration: Some(2),
        ..Task::default()
    }
}

// =========================================================================
// Task analysis
// =========================================================================

#[test]
fn placeholder_and_empty_fields_are_filled_from_context() {
    let payload = as_map(json!({
        "tarea": "No title provided",
        "complejidad": "",
        "tipo": "Bugfix",
    }));
    let task = sample_task();
    let ctx = DefaultContext {
        task: Some(&task),
        resources: &[],
    };

    let result = apply_defaults(Some(Contract::TaskAnalysis), payload, &ctx);

    assert_eq!(result["tarea"], json!("Fix login bug"));
    assert_eq!(result["complejidad"], json!("Alta"));
    // Present non-placeholder value is untouched.
    assert_eq!(result["tipo"], json!("Bugfix"));
    // Absent fields get context-derived fills.
    assert_eq!(result["palabras_clave"], json!(["auth", "backend"]));
    assert_eq!(result["tiempo_estimado"], json!("2 días"));
}

#[test]
fn present_fields_are_never_overwritten_even_when_context_disagrees() {
    let payload = as_map(json!({
        "tarea": "Otra tarea",
        "tipo": "Feature",
        "palabras_clave": ["x"],
        "complejidad": "Baja",
        "tiempo_estimado": "10 días",
    }));
    let task = sample_task();
    let ctx = DefaultContext {
        task: Some(&task),
        resources: &[],
    };

    let result = apply_defaults(Some(Contract::TaskAnalysis), payload.clone(), &ctx);
    assert_eq!(result, payload);
}

#[test]
fn defaulting_is_idempotent() {
    let payload = as_map(json!({ "tarea": null }));
    let task = sample_task();
    let ctx = DefaultContext {
        task: Some(&task),
        resources: &[],
    };

    let once = apply_defaults(Some(Contract::TaskAnalysis), payload, &ctx);
    let twice = apply_defaults(Some(Contract::TaskAnalysis), once.clone(), &ctx);
    assert_eq!(once, twice);
}

#[test]
fn empty_context_degrades_to_static_fallbacks() {
    let payload = Map::new();
    let result = apply_defaults(
        Some(Contract::TaskAnalysis),
        payload,
        &DefaultContext::default(),
    );

    assert_eq!(result["tarea"], json!("No title provided"));
    assert_eq!(result["tipo"], json!("Unspecified"));
    assert_eq!(result["palabras_clave"], json!(["unspecified"]));
    assert_eq!(result["complejidad"], json!("Media"));
    assert_eq!(result["tiempo_estimado"], json!("3 días"));
}

#[test]
fn difficulty_maps_to_complexity_bands() {
    for (difficulty, band) in [(1, "Baja"), (2, "Baja"), (3, "Media"), (4, "Alta"), (5, "Alta")] {
        let task = Task {
            id: "1".to_string(),
            difficulty: Some(difficulty),
            ..Task::default()
        };
        let ctx = DefaultContext {
            task: Some(&task),
            resources: &[],
        };
        let result = apply_defaults(Some(Contract::TaskAnalysis), Map::new(), &ctx);
        assert_eq!(result["complejidad"], json!(band), "difficulty {difficulty}");
    }
}

// =========================================================================
// Resource assignment
// =========================================================================

#[test]
fn skipped_assignment_is_rebuilt_from_first_available_human() {
    let payload = as_map(json!({ "tarea": "Fix login bug" }));
    let mut ana = Resource::human("Ana");
    ana.experience = Some("Senior".to_string());
    ana.technologies = vec!["Rust".to_string(), "Postgres".to_string()];
    let mut busy = Resource::human("Luis");
    busy.is_available = false;
    let task = sample_task();
    let resources = vec![busy, ana];
    let ctx = DefaultContext {
        task: Some(&task),
        resources: &resources,
    };

    let result = apply_defaults(Some(Contract::ResourceAssignment), payload, &ctx);

    let assignment = &result["recurso_asignado"];
    assert_eq!(assignment["desarrollador"], json!("Ana"));
    assert_eq!(assignment["nivel"], json!("Senior"));
    assert_eq!(assignment["tecnología"], json!("Rust"));
    assert_eq!(assignment["herramientas"], json!([]));
}

#[test]
fn a_real_assignment_is_left_alone() {
    let payload = as_map(json!({
        "tarea": "Fix login bug",
        "recurso_asignado": {
            "desarrollador": "Luis",
            "nivel": "Mid",
            "tecnología": "TypeScript",
            "herramientas": ["npm"],
        },
    }));
    let ana = Resource::human("Ana");
    let task = sample_task();
    let resources = vec![ana];
    let ctx = DefaultContext {
        task: Some(&task),
        resources: &resources,
    };

    let result = apply_defaults(Some(Contract::ResourceAssignment), payload.clone(), &ctx);
    assert_eq!(result, payload);
}

#[test]
fn no_candidate_human_leaves_the_payload_as_produced() {
    let payload = as_map(json!({ "tarea": "Fix login bug" }));
    let ctx = DefaultContext::default();

    let result = apply_defaults(Some(Contract::ResourceAssignment), payload.clone(), &ctx);
    assert_eq!(result, payload);
}

// =========================================================================
// Passthrough behavior
// =========================================================================

#[test]
fn unknown_contract_is_a_passthrough() {
    let payload = as_map(json!({ "anything": null, "x": "" }));
    let result = apply_defaults(None, payload.clone(), &DefaultContext::default());
    assert_eq!(result, payload);
}

#[test]
fn time_estimation_has_no_fill_rules() {
    let payload = as_map(json!({ "estimacion_probable": "" }));
    let result = apply_defaults(
        Some(Contract::TimeEstimation),
        payload.clone(),
        &DefaultContext::default(),
    );
    assert_eq!(result, payload);
}

#[test]
fn contract_hints_parse_by_name() {
    assert_eq!(Contract::parse("task_analysis"), Some(Contract::TaskAnalysis));
    assert_eq!(
        Contract::parse("resource_assignment"),
        Some(Contract::ResourceAssignment)
    );
    assert_eq!(Contract::parse("time_estimation"), Some(Contract::TimeEstimation));
    assert_eq!(Contract::parse("weather_report"), None);
}
