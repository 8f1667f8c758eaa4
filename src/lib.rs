//! Muninn - completion orchestration core for project-management AI
//! features.
//!
//! This crate sits between a project-management backend and an
//! Ollama-style completion endpoint. It composes domain prompts (task
//! analysis, resource assignment, time estimation, documentation, project
//! reports, chat, code suggestions), calls the endpoint, recovers
//! structured JSON from free-form model output, fills contract-mandated
//! gaps from known request context, and caches responses under stable
//! content-derived keys.
//!
//! # Example
//!
//! ```rust,no_run
//! use muninn::{Muninn, types::Task};
//!
//! #[tokio::main]
//! async fn main() -> muninn::Result<()> {
//!     let gateway = Muninn::builder()
//!         .endpoint("http://localhost:11434")
//!         .model("deepseek-coder")
//!         .build()?;
//!
//!     let task = Task {
//!         id: "42".to_string(),
//!         title: Some("Fix login bug".to_string()),
//!         difficulty: Some(4),
//!         ..Task::default()
//!     };
//!
//!     let analysis = gateway.analyze_task(&task).await?;
//!     println!("{}", serde_json::Value::Object(analysis));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod prompt;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheStats, RequestIdentity, ResponseCache, derive_key};
pub use client::CompletionClient;
pub use config::Config;
pub use contracts::{Contract, DefaultContext, apply_defaults};
pub use error::{MuninnError, Result};
pub use extract::extract;
pub use gateway::{Gateway, Muninn, MuninnBuilder};
