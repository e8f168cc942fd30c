//! Persistence: key-value backend, review queue, and style rules.

pub mod kv;
pub mod review;
pub mod rules;

pub use kv::{FileKvStore, KvStore};
pub use review::{ReviewQueue, ReviewTask};
pub use rules::{Replacement, StyleRuleSet, StyleRuleStore};
