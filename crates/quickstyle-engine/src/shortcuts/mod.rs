//! Formatting shortcuts: an ordered trigger table and the engine that applies it.

pub mod engine;
pub mod patterns;

pub use engine::{BeforeInsert, ShortcutEngine};
pub use patterns::{PatternError, PatternMatch, PatternTable, StyleExclusion, StyleTarget, TriggerPattern};
