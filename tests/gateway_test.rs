//! End-to-end gateway tests: compose → complete → extract → default →
//! cache, against a mocked completion endpoint.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use muninn::types::{ChatTurn, Resource, Task};
use muninn::{CacheConfig, Gateway, Muninn, MuninnError, RequestIdentity};

fn sample_task() -> Task {
    Task {
        id: "42".to_string(),
        title: Some("Fix login bug".to_string()),
        difficulty: Some(4),
        tags: vec!["auth".to_string()],
        ..Task::default()
    }
}

async fn gateway_for(server: &MockServer) -> Gateway {
    Muninn::builder()
        .endpoint(server.uri())
        .model("test-model")
        .build()
        .expect("builder should succeed")
}

#[tokio::test]
async fn analyze_task_extracts_defaults_and_caches() {
    let mock_server = MockServer::start().await;

    // Model output wrapped in prose, with a placeholder title and a missing
    // complexity: the pipeline must recover the object, keep real fields,
    // and fill the gaps from the task.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Claro:\n{\"tarea\": \"No title provided\", \"tipo\": \"Bugfix\", \"palabras_clave\": [\"login\"], \"tiempo_estimado\": \"4 días\"}",
        })))
        .expect(1) // the second call below must be served from cache
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let task = sample_task();

    let first = gateway.analyze_task(&task).await.expect("analysis should succeed");
    assert_eq!(first["tarea"], json!("Fix login bug"));
    assert_eq!(first["tipo"], json!("Bugfix"));
    assert_eq!(first["palabras_clave"], json!(["login"]));
    assert_eq!(first["complejidad"], json!("Alta"));
    assert_eq!(first["tiempo_estimado"], json!("4 días"));

    let second = gateway.analyze_task(&task).await.expect("cached analysis");
    assert_eq!(first, second);
}

#[tokio::test]
async fn analyses_of_different_tasks_do_not_share_cache_entries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"tipo\": \"Bugfix\"}",
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let mut other = sample_task();
    other.id = "43".to_string();

    gateway.analyze_task(&sample_task()).await.unwrap();
    gateway.analyze_task(&other).await.unwrap();
}

#[tokio::test]
async fn disabled_cache_calls_upstream_every_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"tipo\": \"Bugfix\"}",
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gateway = Muninn::builder()
        .endpoint(mock_server.uri())
        .cache(CacheConfig::new().disabled())
        .build()
        .unwrap();

    let task = sample_task();
    gateway.analyze_task(&task).await.unwrap();
    gateway.analyze_task(&task).await.unwrap();
}

#[tokio::test]
async fn assign_task_resources_requires_an_available_human() {
    let mock_server = MockServer::start().await;
    let gateway = gateway_for(&mock_server).await;

    let mut busy = Resource::human("Ana");
    busy.is_available = false;
    let resources = vec![busy, Resource::material("Servidor CI")];

    let err = gateway
        .assign_task_resources(&sample_task(), &resources)
        .await
        .unwrap_err();
    assert!(matches!(err, MuninnError::InvalidInput(_)));

    // The precondition fails before any upstream call.
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn assign_task_resources_rebuilds_a_stubbed_assignment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"tarea\": \"Fix login bug\", \"recurso_asignado\": {\"desarrollador\": \"\"}}",
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let mut ana = Resource::human("Ana");
    ana.experience = Some("Senior".to_string());
    ana.technologies = vec!["Rust".to_string()];

    let result = gateway
        .assign_task_resources(&sample_task(), &[ana])
        .await
        .expect("assignment should succeed");
    assert_eq!(result["recurso_asignado"]["desarrollador"], json!("Ana"));
    assert_eq!(result["recurso_asignado"]["nivel"], json!("Senior"));
}

#[tokio::test]
async fn upstream_failures_propagate_and_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2) // failure is not stored; retry hits upstream again
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let task = sample_task();

    let err = gateway.analyze_task(&task).await.unwrap_err();
    assert!(matches!(
        err,
        MuninnError::UpstreamInvalidResponse { status: Some(503), .. }
    ));

    let err = gateway.analyze_task(&task).await.unwrap_err();
    assert!(matches!(err, MuninnError::UpstreamInvalidResponse { .. }));
}

#[tokio::test]
async fn continue_chat_caches_by_full_identity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Puedes usar índices compuestos.",
        })))
        .expect(2) // same message, different task scope → two entries
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let history = [ChatTurn::user("Hola", std::time::SystemTime::UNIX_EPOCH)];

    let in_task_7 = RequestIdentity::new("¿Cómo optimizo esta consulta?", "chat").task_id("7");
    let in_task_8 = RequestIdentity::new("¿Cómo optimizo esta consulta?", "chat").task_id("8");

    let first = gateway.continue_chat(&in_task_7, &history).await.unwrap();
    // Same identity: served from cache, no extra upstream call.
    let again = gateway.continue_chat(&in_task_7, &history).await.unwrap();
    assert_eq!(first, again);

    // Different scope: separate cache entry, one more upstream call.
    gateway.continue_chat(&in_task_8, &history).await.unwrap();
}

#[tokio::test]
async fn suggest_code_returns_text_and_caches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "```rust\nfn main() {}\n```",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let identity = RequestIdentity::new("Escribe un main vacío", "code");

    let first = gateway.suggest_code(&identity, Some(&sample_task())).await.unwrap();
    assert!(first.contains("fn main"));

    let again = gateway.suggest_code(&identity, Some(&sample_task())).await.unwrap();
    assert_eq!(first, again);
}

#[tokio::test]
async fn free_text_operations_skip_the_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "# Informe\nTodo en orden.",
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let task = sample_task();

    let doc = gateway.document_task(&task).await.unwrap();
    assert!(doc.contains("Informe"));
    gateway.document_task(&task).await.unwrap();

    assert_eq!(gateway.cache().stats().size, 0);
}

#[tokio::test]
async fn estimate_task_time_returns_the_structured_estimate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "{\"estimacion_probable\": \"4 días\", \"confianza\": 7}",
        })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    let dev = Resource::human("Ana");

    let estimate = gateway
        .estimate_task_time(&sample_task(), Some(&dev))
        .await
        .expect("estimation should succeed");
    assert_eq!(estimate["estimacion_probable"], json!("4 días"));
    assert_eq!(estimate["confianza"], json!(7));
}

#[tokio::test]
async fn ping_round_trips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "pong" })))
        .mount(&mock_server)
        .await;

    let gateway = gateway_for(&mock_server).await;
    gateway.ping().await.expect("ping should succeed");
}
