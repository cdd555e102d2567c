// Advice module: summary formatting, prompt assembly and the query orchestrator.
// Retrieval lives in crate::retrieval; network collaborators are injected.

pub mod formatter;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;

pub use orchestrator::{AdviceOrchestrator, RetrievalLimits};
