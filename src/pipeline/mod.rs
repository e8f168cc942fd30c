//! Routing pipeline: types, heuristics, prompts, and the engine.

pub mod engine;
pub mod heuristics;
pub mod prompts;
pub mod types;

pub use engine::{RoutingEngine, route_after_triage};
pub use types::{
    DraftParams, Item, PipelineResult, Route, RouteOutcome, Surface, TriageDecision, TriageLabel,
    TriageSignal,
};
