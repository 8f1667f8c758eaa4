//! Public types for the Muninn API.

mod chat;
mod options;
mod project;
mod resource;
mod task;

pub use chat::{ChatTurn, Speaker};
pub use options::GenerateOptions;
pub use project::Project;
pub use resource::Resource;
pub use task::{Task, TaskFieldMap};
