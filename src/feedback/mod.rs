//! Edit-feedback loop: line diffs mined into style rules.

pub mod diff;
pub mod miner;

pub use diff::{EditOp, line_diff};
pub use miner::{mine_and_save, mine_rules};
