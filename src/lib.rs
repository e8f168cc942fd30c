//! EchoDraft — classification-then-action pipeline core.
//!
//! Incoming items are triaged, then either dropped, queued for human review,
//! or drafted. Human edits to drafts feed back into persisted style rules
//! that shape future generation.

pub mod classify;
pub mod config;
pub mod error;
pub mod eval;
pub mod feedback;
pub mod generate;
pub mod llm;
pub mod pipeline;
pub mod store;
